//! WOA position update.

use super::config::Woa;
use crate::core::{Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use crate::random::uniform;
use rand::Rng;
use std::f64::consts::PI;

/// Moves `x` towards `target` with the encircling rule `target - A·|C·target - x|`.
fn encircle(x: &[f64], target: &[f64], a: f64, c: f64) -> Vec<f64> {
    x.iter()
        .zip(target)
        .map(|(&xi, &ti)| ti - a * (c * ti - xi).abs())
        .collect()
}

/// Spiral update `|best - x|·e^(b·l)·cos(2πl) + best`.
fn spiral(x: &[f64], best: &[f64], b: f64, l: f64) -> Vec<f64> {
    let factor = (b * l).exp() * (2.0 * PI * l).cos();
    x.iter()
        .zip(best)
        .map(|(&xi, &bi)| (bi - xi).abs() * factor + bi)
        .collect()
}

impl Strategy for Woa {
    type Solution = Individual;
    type Memory = ();

    fn name(&self) -> &'static str {
        "WOA"
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
        let xs = problem.bounds().sample_n(self.population_size, rng);
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
        let a = 2.0 - 2.0 * problem.progress(state.iteration);
        let best = state.best_sol.x.clone();

        let mut positions = Vec::with_capacity(n);
        for whale in &state.population {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let big_a = 2.0 * a * r1 - a;
            let c = 2.0 * r2;
            let p: f64 = rng.random();

            let mut x = if p < 0.5 {
                if big_a.abs() < 1.0 {
                    encircle(&whale.x, &best, big_a, c)
                } else {
                    let other = &state.population[rng.random_range(0..n)].x;
                    encircle(&whale.x, other, big_a, c)
                }
            } else {
                let l = uniform(rng, -1.0, 1.0);
                spiral(&whale.x, &best, self.b, l)
            };
            problem.bounds().clamp(&mut x);
            positions.push(x);
        }

        let moved: Vec<Individual> = problem.evaluate_all(positions)?;
        let improved = moved
            .iter()
            .zip(&state.population)
            .filter(|(new, old)| new.is_better_than(old))
            .count();
        state.success_rate = improved as f64 / n as f64;
        state.population = moved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bounds, Information, Options};
    use crate::driver::optimize;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_encircle_at_target() {
        // A whale sitting on the target with C = 1 stays there.
        let x = vec![1.0, -2.0];
        assert_eq!(encircle(&x, &x, 0.7, 1.0), x);
    }

    #[test]
    fn test_spiral_endpoints() {
        let x = vec![0.0, 0.0];
        let best = vec![1.0, 2.0];
        // l = 0: factor 1, lands at best + |best - x|.
        assert_eq!(spiral(&x, &best, 1.0, 0.0), vec![2.0, 4.0]);
        // l = 0.25: cos(pi/2) = 0, lands on best.
        let y = spiral(&x, &best, 1.0, 0.25);
        assert!((y[0] - 1.0).abs() < 1e-12 && (y[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solves_sphere() {
        let bounds = Bounds::uniform(-10.0, 10.0, 3).unwrap();
        let options = Options::default().with_f_calls_limit(15_000).with_seed(6);
        let state = optimize(&sphere, &bounds, &Woa::default(), &options, &Information::default())
            .unwrap();
        assert!(state.minimum() < 1e-2, "got {}", state.minimum());
    }

    #[test]
    fn test_whales_stay_in_bounds() {
        let bounds = Bounds::uniform(0.0, 1.0, 2).unwrap();
        let options = Options::default()
            .with_iterations(25)
            .with_store_convergence(true)
            .with_seed(12);
        let state = optimize(&sphere, &bounds, &Woa::default(), &options, &Information::default())
            .unwrap();
        for snapshot in &state.convergence {
            for whale in &snapshot.population {
                assert!(bounds.contains(&whale.x));
            }
        }
    }
}
