//! DE generation step.

use super::config::{De, Mutation};
use crate::core::{
    argmin, fitness_spread, Budget, Individual, Objective, Problem, State, Strategy,
};
use crate::error::Result;
use crate::operators::binomial_crossover;
use crate::random::distinct_indices;
use rand::Rng;

/// Builds the donor vector for target `i`.
fn donor<R: Rng + ?Sized>(
    mutation: Mutation,
    f: f64,
    i: usize,
    population: &[Individual],
    best: &[f64],
    rng: &mut R,
) -> Vec<f64> {
    let r = distinct_indices(i, mutation.vectors_needed(), population.len(), rng);
    let x = |k: usize| &population[r[k]].x;
    let dim = best.len();
    (0..dim)
        .map(|j| match mutation {
            Mutation::Rand1 => x(0)[j] + f * (x(1)[j] - x(2)[j]),
            Mutation::Rand2 => x(0)[j] + f * (x(1)[j] - x(2)[j]) + f * (x(3)[j] - x(4)[j]),
            Mutation::Best1 => best[j] + f * (x(0)[j] - x(1)[j]),
            Mutation::Best2 => best[j] + f * (x(0)[j] - x(1)[j]) + f * (x(2)[j] - x(3)[j]),
            Mutation::RandToBest1 => {
                x(0)[j] + f * (best[j] - x(0)[j]) + f * (x(1)[j] - x(2)[j])
            }
        })
        .collect()
}

impl Strategy for De {
    type Solution = Individual;
    type Memory = ();

    fn name(&self) -> &'static str {
        "DE"
    }

    fn validate(&self, dim: usize) -> Result<()> {
        self.validate_for(dim)
    }

    fn default_budget(&self, dim: usize) -> Budget {
        Budget {
            f_calls_limit: 10_000 * dim,
            iterations: 0,
        }
    }

    fn initialize<O, R>(
        &self,
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<(Vec<Individual>, ())>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = self.resolved_population(problem.dim());
        let xs = problem.bounds().sample_n(n, rng);
        Ok((problem.evaluate_all(xs)?, ()))
    }

    fn step<O, R>(
        &self,
        state: &mut State<Individual>,
        _memory: &mut (),
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let population = &state.population;
        let n = population.len();
        let best = population[argmin(population)].x.clone();

        let trials: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let v = donor(self.mutation, self.f, i, population, &best, rng);
                let mut u = binomial_crossover(&population[i].x, &v, self.cr, rng);
                problem.bounds().clamp(&mut u);
                u
            })
            .collect();

        let offspring: Vec<Individual> = problem.evaluate_all(trials)?;
        let mut improved = 0usize;
        for (target, trial) in state.population.iter_mut().zip(offspring) {
            if trial.key() <= target.key() {
                if trial.key() < target.key() {
                    improved += 1;
                }
                *target = trial;
            }
        }
        state.success_rate = improved as f64 / n as f64;
        Ok(())
    }

    fn has_converged(&self, state: &State<Individual>, _memory: &()) -> bool {
        self.stagnation_tol > 0.0 && fitness_spread(&state.population) < self.stagnation_tol
    }
}
