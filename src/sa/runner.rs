//! SA Metropolis chain and cooling.

use super::config::{CoolingSchedule, Sa};
use crate::core::{Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use crate::random::normal;
use rand::Rng;

/// Per-run annealing memory.
#[derive(Debug, Clone)]
pub struct Annealing {
    /// Current temperature.
    pub temperature: f64,
    /// Completed cooling steps.
    pub step: usize,
    linear_steps: usize,
}

/// Probability of accepting a move that changes the value by `delta`.
///
/// Improvements are always accepted. Worsening moves are judged relative to
/// `|f_current| + tol_fun`, so the test does not depend on the objective's
/// scale.
pub fn metropolis_probability(delta: f64, f_current: f64, temperature: f64, tol_fun: f64) -> f64 {
    if delta < 0.0 {
        return 1.0;
    }
    if !delta.is_finite() || temperature <= 0.0 {
        return 0.0;
    }
    let scale = f_current.abs() + tol_fun;
    if !(scale > 0.0) {
        return 0.0;
    }
    (-delta / (temperature * scale)).exp()
}

impl Sa {
    /// Applies the cooling schedule to compute the next temperature.
    fn cool(&self, temperature: f64, step: usize, linear_steps: usize) -> f64 {
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,

            CoolingSchedule::Linear => {
                if linear_steps == 0 {
                    self.min_temperature
                } else {
                    let t = self.initial_temperature
                        - (step + 1) as f64 * (self.initial_temperature - self.min_temperature)
                            / linear_steps as f64;
                    t.max(self.min_temperature)
                }
            }

            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }

    /// Number of cooling steps for linear cooling.
    fn linear_steps(&self, budget: Budget) -> usize {
        match self.cooling {
            CoolingSchedule::Linear => {
                if budget.iterations > 0 {
                    budget.iterations
                } else if budget.f_calls_limit > 0 {
                    (budget.f_calls_limit / self.n_candidates).max(1)
                } else {
                    1000
                }
            }
            _ => 0,
        }
    }
}

impl Strategy for Sa {
    type Solution = Individual;
    type Memory = Annealing;

    fn name(&self) -> &'static str {
        "SA"
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
    ) -> Result<(Vec<Individual>, Annealing)>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let x = match &self.x_initial {
            Some(x) => {
                let mut x = x.clone();
                problem.bounds().clamp(&mut x);
                x
            }
            None => problem.bounds().sample(rng),
        };
        let start: Individual = problem.evaluate(x)?;
        let annealing = Annealing {
            temperature: self.initial_temperature,
            step: 0,
            linear_steps: self.linear_steps(problem.budget()),
        };
        Ok((vec![start], annealing))
    }

    fn step<O, R>(
        &self,
        state: &mut State<Individual>,
        annealing: &mut Annealing,
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let widths = problem.bounds().widths();
        let spread = self.step_scale * annealing.temperature / self.initial_temperature;
        let Some(mut current) = state.population.pop() else {
            return Ok(());
        };

        let mut improved = 0usize;
        for _ in 0..self.n_candidates {
            let mut y: Vec<f64> = current
                .x
                .iter()
                .zip(&widths)
                .map(|(&xi, &w)| xi + spread * w * normal(rng))
                .collect();
            problem.bounds().clamp(&mut y);
            let candidate: Individual = problem.evaluate(y)?;
            state.observe(&candidate);

            let delta = candidate.key() - current.key();
            let p = metropolis_probability(delta, current.key(), annealing.temperature, self.tol_fun);
            if delta < 0.0 {
                improved += 1;
            }
            if p >= 1.0 || rng.random::<f64>() < p {
                current = candidate;
            }
        }
        state.population.push(current);
        state.success_rate = improved as f64 / self.n_candidates as f64;

        annealing.temperature = self.cool(annealing.temperature, annealing.step, annealing.linear_steps);
        annealing.step += 1;
        Ok(())
    }

    fn has_converged(&self, _state: &State<Individual>, annealing: &Annealing) -> bool {
        annealing.temperature < self.min_temperature
    }
}
