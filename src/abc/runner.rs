//! ABC employed, onlooker and scout phases.

use super::config::Abc;
use crate::core::{Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use crate::random::uniform;
use rand::seq::SliceRandom;
use rand::Rng;

/// Per-run colony memory.
#[derive(Debug, Clone)]
pub struct Hive {
    /// Consecutive failed trials of each food source.
    pub trials: Vec<usize>,
}

/// `v = x_i` with one coordinate moved by `φ·(x_ij - x_kj)`, `φ ~ U(-1, 1)`.
fn neighbor_search<R: Rng + ?Sized>(i: usize, sources: &[Individual], rng: &mut R) -> Vec<f64> {
    let n = sources.len();
    let mut k = rng.random_range(0..n - 1);
    if k >= i {
        k += 1;
    }
    let x = &sources[i].x;
    let j = rng.random_range(0..x.len());
    let phi = uniform(rng, -1.0, 1.0);
    let mut v = x.clone();
    v[j] = x[j] + phi * (x[j] - sources[k].x[j]);
    v
}

/// Picks a source with probability proportional to `N - rank`.
fn rank_select<R: Rng + ?Sized>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    let total = (n * (n + 1) / 2) as f64;
    let mut spin = rng.random::<f64>() * total;
    for (rank, &idx) in order.iter().enumerate() {
        spin -= (n - rank) as f64;
        if spin < 0.0 {
            return idx;
        }
    }
    order[n - 1]
}

impl Abc {
    /// Evaluates `candidates` for the given sources and applies greedy
    /// replacement in order. Returns the number of improvements.
    fn exploit<O>(
        &self,
        targets: &[usize],
        candidates: Vec<Vec<f64>>,
        sources: &mut [Individual],
        hive: &mut Hive,
        problem: &mut Problem<'_, O, f64>,
    ) -> Result<usize>
    where
        O: Objective<f64> + ?Sized,
    {
        let evaluated: Vec<Individual> = problem.evaluate_all(candidates)?;
        let mut improved = 0;
        for (&i, candidate) in targets.iter().zip(evaluated) {
            if candidate.is_better_than(&sources[i]) {
                sources[i] = candidate;
                hive.trials[i] = 0;
                improved += 1;
            } else {
                hive.trials[i] += 1;
            }
        }
        Ok(improved)
    }
}

impl Strategy for Abc {
    type Solution = Individual;
    type Memory = Hive;

    fn name(&self) -> &'static str {
        "ABC"
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
    ) -> Result<(Vec<Individual>, Hive)>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let xs = problem.bounds().sample_n(self.population_size, rng);
        let sources: Vec<Individual> = problem.evaluate_all(xs)?;
        let hive = Hive {
            trials: vec![0; sources.len()],
        };
        Ok((sources, hive))
    }

    fn step<O, R>(
        &self,
        state: &mut State<Individual>,
        hive: &mut Hive,
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = state.population.len();
        let mut improved = 0;

        // Employed bees.
        let mut employed: Vec<usize> = (0..n).collect();
        employed.shuffle(rng);
        employed.truncate(self.employed_bees());
        let candidates: Vec<Vec<f64>> = employed
            .iter()
            .map(|&i| {
                let mut v = neighbor_search(i, &state.population, rng);
                problem.bounds().clamp(&mut v);
                v
            })
            .collect();
        improved += self.exploit(&employed, candidates, &mut state.population, hive, problem)?;

        // Onlooker bees.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| state.population[a].cmp_fitness(&state.population[b]));
        let onlookers: Vec<usize> = (0..self.onlooker_bees())
            .map(|_| rank_select(&order, rng))
            .collect();
        let candidates: Vec<Vec<f64>> = onlookers
            .iter()
            .map(|&i| {
                let mut v = neighbor_search(i, &state.population, rng);
                problem.bounds().clamp(&mut v);
                v
            })
            .collect();
        improved += self.exploit(&onlookers, candidates, &mut state.population, hive, problem)?;

        // Scouts.
        let abandoned: Vec<usize> = (0..n).filter(|&i| hive.trials[i] > self.limit).collect();
        if !abandoned.is_empty() {
            // Improvements made earlier in this step are not in the best
            // record yet.
            for &i in &abandoned {
                let source = state.population[i].clone();
                state.observe(&source);
            }
            let xs = problem.bounds().sample_n(abandoned.len(), rng);
            let fresh: Vec<Individual> = problem.evaluate_all(xs)?;
            for (&i, source) in abandoned.iter().zip(fresh) {
                state.population[i] = source;
                hive.trials[i] = 0;
            }
        }

        let bees = employed.len() + onlookers.len();
        state.success_rate = improved as f64 / bees.max(1) as f64;
        Ok(())
    }
}
