//! MOEA/D-DE subproblem updates.

use super::config::MoeadDe;
use super::weights::{das_dennis, divisions_for, neighborhoods};
use crate::core::{Budget, Fgh, MoIndividual, Objective, Problem, State, Strategy};
use crate::error::{OptimizeError, Result};
use crate::operators::{binomial_crossover, polynomial_mutation};
use crate::random::distinct_indices;
use rand::seq::SliceRandom;
use rand::Rng;

/// Per-run decomposition memory.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// One weight vector per subproblem.
    pub weights: Vec<Vec<f64>>,
    /// Neighbor subproblems of each subproblem, nearest first.
    pub neighbors: Vec<Vec<usize>>,
    /// Componentwise best objective value seen so far.
    pub ideal: Vec<f64>,
}

/// Penalized Tchebycheff value of `solution` for weight `lambda` and ideal
/// point `ideal`: `max_k λ_k·|f_k - z_k|` plus the total violation.
pub fn tchebycheff(solution: &MoIndividual, lambda: &[f64], ideal: &[f64]) -> f64 {
    let scalar = solution
        .f
        .iter()
        .zip(lambda)
        .zip(ideal)
        .map(|((f, l), z)| l * (f - z).abs())
        .fold(f64::NEG_INFINITY, f64::max);
    scalar + solution.sum_violations
}

impl MoeadDe {
    fn check_objectives(&self, solution: &MoIndividual) -> Result<()> {
        if solution.f.len() != self.n_objectives {
            return Err(OptimizeError::conflict(format!(
                "objective returned {} values, n_objectives is {}",
                solution.f.len(),
                self.n_objectives
            )));
        }
        Ok(())
    }
}

fn update_ideal(ideal: &mut [f64], f: &[f64]) {
    for (z, &v) in ideal.iter_mut().zip(f) {
        if v < *z {
            *z = v;
        }
    }
}

impl Strategy for MoeadDe {
    type Solution = MoIndividual;
    type Memory = Decomposition;

    fn name(&self) -> &'static str {
        "MOEA/D-DE"
    }

    fn validate(&self, dim: usize) -> Result<()> {
        self.validate_for(dim)
    }

    fn default_budget(&self, _dim: usize) -> Budget {
        Budget {
            f_calls_limit: 0,
            iterations: 500,
        }
    }

    fn initialize<O, R>(
        &self,
        problem: &mut Problem<'_, O, Fgh>,
        rng: &mut R,
    ) -> Result<(Vec<MoIndividual>, Decomposition)>
    where
        O: Objective<Fgh> + ?Sized,
        R: Rng + ?Sized,
    {
        let h = divisions_for(self.population_size, self.n_objectives);
        let weights = das_dennis(h, self.n_objectives);
        let neighbors = neighborhoods(&weights, self.t);

        let xs = problem.bounds().sample_n(weights.len(), rng);
        let population: Vec<MoIndividual> = problem.evaluate_all(xs)?;
        let mut ideal = vec![f64::INFINITY; self.n_objectives];
        for solution in &population {
            self.check_objectives(solution)?;
            update_ideal(&mut ideal, &solution.f);
        }

        let memory = Decomposition {
            weights,
            neighbors,
            ideal,
        };
        Ok((population, memory))
    }

    fn step<O, R>(
        &self,
        state: &mut State<MoIndividual>,
        memory: &mut Decomposition,
        problem: &mut Problem<'_, O, Fgh>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<Fgh> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = state.population.len();
        let p_m = self.mutation_rate(problem.dim());
        let mut improved = 0usize;

        for i in 0..n {
            let mut pool: Vec<usize> = if rng.random::<f64>() < self.delta {
                memory.neighbors[i].clone()
            } else {
                (0..n).collect()
            };
            let own = pool.iter().position(|&k| k == i).unwrap_or(0);
            let r = distinct_indices(own, 2, pool.len(), rng);

            let x = &state.population[i].x;
            let a = &state.population[pool[r[0]]].x;
            let b = &state.population[pool[r[1]]].x;
            let mutant: Vec<f64> = x
                .iter()
                .zip(a.iter().zip(b))
                .map(|(xi, (ai, bi))| xi + self.f * (ai - bi))
                .collect();
            let mut y = binomial_crossover(x, &mutant, self.cr, rng);
            problem.bounds().clamp(&mut y);
            polynomial_mutation(&mut y, self.eta_m, p_m, problem.bounds(), rng);

            let child: MoIndividual = problem.evaluate(y)?;
            self.check_objectives(&child)?;
            update_ideal(&mut memory.ideal, &child.f);

            pool.shuffle(rng);
            let mut replaced = 0;
            for j in pool {
                if replaced >= self.n_r {
                    break;
                }
                let lambda = &memory.weights[j];
                if tchebycheff(&child, lambda, &memory.ideal)
                    <= tchebycheff(&state.population[j], lambda, &memory.ideal)
                {
                    state.population[j] = child.clone();
                    replaced += 1;
                }
            }
            if replaced > 0 {
                improved += 1;
            }
        }

        state.success_rate = improved as f64 / n as f64;
        Ok(())
    }
}
