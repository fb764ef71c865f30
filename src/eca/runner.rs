//! ECA update rule.

use super::config::Eca;
use crate::core::{fitness_spread, Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use crate::random::{normal, uniform};
use rand::seq::SliceRandom;
use rand::Rng;

/// Converts objective values (lower is better) into normalized masses.
///
/// Negative values are shifted up by `2·|min|`, then each mass is
/// `2·max - f`. Falls back to uniform masses when the total is zero or not
/// finite.
pub fn fitness_to_mass(fitness: &[f64]) -> Vec<f64> {
    let n = fitness.len();
    if n == 0 {
        return Vec::new();
    }
    let uniform_mass = vec![1.0 / n as f64; n];

    let min = fitness.iter().cloned().fold(f64::INFINITY, f64::min);
    let shifted: Vec<f64> = if min < 0.0 {
        fitness.iter().map(|f| f + 2.0 * min.abs()).collect()
    } else {
        fitness.to_vec()
    };
    let max = shifted.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mass: Vec<f64> = shifted.iter().map(|f| 2.0 * max - f).collect();
    let total: f64 = mass.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return uniform_mass;
    }
    mass.into_iter().map(|m| m / total).collect()
}

/// Mass-weighted center of the given members.
fn center(members: &[&Individual], mass: &[f64], dim: usize) -> Vec<f64> {
    let total: f64 = mass.iter().sum();
    let mut c = vec![0.0; dim];
    if total > 0.0 && total.is_finite() {
        for (ind, &m) in members.iter().zip(mass) {
            for (cj, xj) in c.iter_mut().zip(&ind.x) {
                *cj += m * xj / total;
            }
        }
    } else {
        for ind in members {
            for (cj, xj) in c.iter_mut().zip(&ind.x) {
                *cj += xj / members.len() as f64;
            }
        }
    }
    c
}

impl Strategy for Eca {
    type Solution = Individual;
    type Memory = ();

    fn name(&self) -> &'static str {
        "ECA"
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
        let n = state.population.len();
        let dim = problem.dim();
        let k = self.k.min(n);
        let t = problem.progress(state.iteration);

        let fitness: Vec<f64> = state.population.iter().map(Individual::key).collect();
        let mass = fitness_to_mass(&fitness);

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut candidates = Vec::with_capacity(n);
        for (i, x) in state.population.iter().enumerate() {
            let ids: Vec<usize> = (0..k).map(|j| order[(i + j) % n]).collect();
            let members: Vec<&Individual> = ids.iter().map(|&u| &state.population[u]).collect();
            let member_mass: Vec<f64> = ids.iter().map(|&u| mass[u]).collect();
            let u_best = members
                .iter()
                .copied()
                .min_by(|a, b| a.cmp_fitness(b))
                .unwrap_or(x);
            let u_worst = members
                .iter()
                .copied()
                .max_by(|a, b| a.cmp_fitness(b))
                .unwrap_or(x);

            let c = center(&members, &member_mass, dim);
            let eta = uniform(rng, 0.0, self.eta_max);

            let mut y: Vec<f64> = if rng.random::<f64>() < self.p_exploit {
                x.x.iter()
                    .zip(c.iter().zip(&u_worst.x))
                    .map(|(xj, (cj, wj))| xj + eta * (cj - wj))
                    .collect()
            } else {
                let scale = (1.0 - t.powi(5)) * eta;
                x.x.iter().map(|xj| xj + scale * normal(rng)).collect()
            };

            for (yj, bj) in y.iter_mut().zip(&u_best.x) {
                if rng.random::<f64>() < self.p_bin {
                    *yj = *bj;
                }
            }
            problem.bounds().clamp(&mut y);
            candidates.push(y);
        }

        let offspring: Vec<Individual> = problem.evaluate_all(candidates)?;
        let mut replaced = 0usize;
        for (parent, child) in state.population.iter_mut().zip(offspring) {
            if child.is_better_than(parent) {
                *parent = child;
                replaced += 1;
            }
        }
        state.success_rate = replaced as f64 / n as f64;
        Ok(())
    }

    fn has_converged(&self, state: &State<Individual>, _memory: &()) -> bool {
        self.stagnation_tol > 0.0 && fitness_spread(&state.population) < self.stagnation_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bounds, Information, Options, StopReason};
    use crate::driver::optimize;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_mass_prefers_lower_fitness() {
        let mass = fitness_to_mass(&[1.0, 2.0, 3.0]);
        assert!(mass[0] > mass[1] && mass[1] > mass[2]);
        assert!((mass.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mass_handles_negative_and_degenerate() {
        let mass = fitness_to_mass(&[-4.0, 0.0, 4.0]);
        assert!(mass[0] > mass[2]);
        assert!(mass.iter().all(|m| *m >= 0.0));

        let flat = fitness_to_mass(&[0.0, 0.0]);
        assert_eq!(flat, vec![0.5, 0.5]);

        let inf = fitness_to_mass(&[1.0, f64::INFINITY]);
        assert_eq!(inf, vec![0.5, 0.5]);
    }

    #[test]
    fn test_center_is_weighted() {
        let a = Individual::new(vec![0.0], 0.0);
        let b = Individual::new(vec![1.0], 1.0);
        let c = center(&[&a, &b], &[0.75, 0.25], 1);
        assert!((c[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_solves_sphere() {
        let bounds = Bounds::uniform(-10.0, 10.0, 5).unwrap();
        let options = Options::default().with_f_calls_limit(30_000).with_seed(1);
        let state = optimize(&sphere, &bounds, &Eca::default(), &options, &Information::default())
            .unwrap();
        assert!(state.minimum() < 1e-4, "got {}", state.minimum());
        assert!(state.success_rate >= 0.0 && state.success_rate <= 1.0);
    }

    #[test]
    fn test_stagnation_convergence() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let flat = |_: &[f64]| 1.0;
        let options = Options::default().with_f_calls_limit(10_000).with_seed(1);
        let eca = Eca::default().with_stagnation_tol(1e-9);
        let state = optimize(&flat, &bounds, &eca, &options, &Information::default()).unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::StrategyConverged));
        assert_eq!(state.iteration, 0);
    }
}
