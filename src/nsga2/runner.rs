//! NSGA-II generation step and environmental selection.

use super::config::Nsga2;
use crate::core::{Budget, Fgh, MoIndividual, Objective, Problem, State, Strategy};
use crate::error::{OptimizeError, Result};
use crate::operators::{polynomial_mutation, sbx_crossover};
use crate::pareto::{front_crowding, sort_population};
use rand::Rng;

/// Rank and crowding distance of each member of the current population.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Front index (0 = non-dominated).
    pub ranks: Vec<usize>,
    /// Crowding distance within the member's front.
    pub crowding: Vec<f64>,
}

impl Ranking {
    /// Ranks `population` under constrained dominance.
    pub fn of(population: &[MoIndividual]) -> Self {
        let sorted = sort_population(population);
        let mut crowding = vec![0.0; population.len()];
        for front in &sorted.fronts {
            for (&i, d) in front.iter().zip(front_crowding(population, front)) {
                crowding[i] = d;
            }
        }
        Self {
            ranks: sorted.ranks,
            crowding,
        }
    }

    /// `true` when `a` wins a tournament against `b`.
    fn prefers(&self, a: usize, b: usize) -> bool {
        self.ranks[a] < self.ranks[b]
            || (self.ranks[a] == self.ranks[b] && self.crowding[a] >= self.crowding[b])
    }

    fn tournament<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let n = self.ranks.len();
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if self.prefers(a, b) {
            a
        } else {
            b
        }
    }
}

/// Checks that every solution carries `expected` objective values.
fn check_objectives(solutions: &[MoIndividual], expected: usize) -> Result<()> {
    match solutions.iter().find(|s| s.f.len() != expected) {
        Some(s) => Err(OptimizeError::conflict(format!(
            "objective returned {} values, expected {expected}",
            s.f.len()
        ))),
        None => Ok(()),
    }
}

/// Keeps `n` members of `combined`: whole fronts in rank order, then the
/// least crowded members of the first front that does not fit.
///
/// Returns the indices of the survivors.
pub fn select_survivors(combined: &[MoIndividual], n: usize) -> Vec<usize> {
    let sorted = sort_population(combined);
    let mut survivors = Vec::with_capacity(n);
    for front in &sorted.fronts {
        if survivors.len() + front.len() <= n {
            survivors.extend_from_slice(front);
            continue;
        }
        let distance = front_crowding(combined, front);
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| distance[b].total_cmp(&distance[a]));
        let missing = n - survivors.len();
        survivors.extend(order.into_iter().take(missing).map(|k| front[k]));
        break;
    }
    survivors
}

impl Strategy for Nsga2 {
    type Solution = MoIndividual;
    type Memory = Ranking;

    fn name(&self) -> &'static str {
        "NSGA-II"
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
    ) -> Result<(Vec<MoIndividual>, Ranking)>
    where
        O: Objective<Fgh> + ?Sized,
        R: Rng + ?Sized,
    {
        let xs = problem.bounds().sample_n(self.population_size, rng);
        let population: Vec<MoIndividual> = problem.evaluate_all(xs)?;
        let expected = population.first().map_or(0, |s| s.f.len());
        if expected == 0 {
            return Err(OptimizeError::conflict("objective returned no values"));
        }
        check_objectives(&population, expected)?;
        let ranking = Ranking::of(&population);
        Ok((population, ranking))
    }

    fn step<O, R>(
        &self,
        state: &mut State<MoIndividual>,
        ranking: &mut Ranking,
        problem: &mut Problem<'_, O, Fgh>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<Fgh> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = state.population.len();
        let p_m = self.mutation_rate(problem.dim());

        let mut children = Vec::with_capacity(n + 1);
        while children.len() < n {
            let p1 = &state.population[ranking.tournament(rng)].x;
            let p2 = &state.population[ranking.tournament(rng)].x;
            let (mut c1, mut c2) =
                sbx_crossover(p1, p2, self.eta_cr, self.p_cr, problem.bounds(), rng);
            polynomial_mutation(&mut c1, self.eta_m, p_m, problem.bounds(), rng);
            polynomial_mutation(&mut c2, self.eta_m, p_m, problem.bounds(), rng);
            children.push(c1);
            children.push(c2);
        }
        children.truncate(n);

        let offspring: Vec<MoIndividual> = problem.evaluate_all(children)?;
        check_objectives(&offspring, state.population[0].f.len())?;
        let mut combined = std::mem::take(&mut state.population);
        combined.extend(offspring);

        let survivors = select_survivors(&combined, n);
        let newcomers = survivors.iter().filter(|&&i| i >= n).count();
        state.success_rate = newcomers as f64 / n as f64;
        state.population = survivors.into_iter().map(|i| combined[i].clone()).collect();
        *ranking = Ranking::of(&state.population);
        Ok(())
    }
}
