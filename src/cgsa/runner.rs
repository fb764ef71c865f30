//! CGSA force and motion update.

use super::chaos::{ChaosMap, CHAOS_X0};
use super::config::Cgsa;
use crate::core::{Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use rand::Rng;

/// Per-run memory of the gravitational field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Velocity of each agent.
    pub velocities: Vec<Vec<f64>>,
    /// Current value of the chaotic sequence.
    pub chaos: f64,
    map: ChaosMap,
}

/// Normalized masses: `(f - worst) / (best - worst)`, scaled to sum 1.
///
/// All agents weigh the same when the population is flat.
pub fn masses(population: &[Individual]) -> Vec<f64> {
    let n = population.len();
    let keys: Vec<f64> = population.iter().map(Individual::key).collect();
    let best = keys.iter().cloned().fold(f64::INFINITY, f64::min);
    let worst = keys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = best - worst;
    if !(span.is_finite() && span != 0.0) {
        return vec![1.0 / n as f64; n];
    }
    let raw: Vec<f64> = keys
        .iter()
        .map(|&f| if f.is_finite() { (f - worst) / span } else { 0.0 })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|m| m / total).collect()
}

fn distance(a: &[f64], b: &[f64], p: f64) -> f64 {
    if p == 2.0 {
        return a.iter().zip(b).map(|(u, v)| (u - v) * (u - v)).sum::<f64>().sqrt();
    }
    a.iter()
        .zip(b)
        .map(|(u, v)| (u - v).abs().powf(p))
        .sum::<f64>()
        .powf(1.0 / p)
}

impl Cgsa {
    /// Number of attracting agents at `progress`: from all of them down to 2%.
    fn kbest(&self, n: usize, progress: f64) -> usize {
        if !self.elitist_check {
            return n;
        }
        let percent = 2.0 + (1.0 - progress) * 98.0;
        ((n as f64 * percent / 100.0).round() as usize).clamp(1, n)
    }
}

impl Strategy for Cgsa {
    type Solution = Individual;
    type Memory = Field;

    fn name(&self) -> &'static str {
        "CGSA"
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
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<(Vec<Individual>, Field)>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let map = self.chaos_map()?;
        let xs = problem.bounds().sample_n(self.population_size, rng);
        let population: Vec<Individual> = problem.evaluate_all(xs)?;
        let field = Field {
            velocities: vec![vec![0.0; problem.dim()]; population.len()],
            chaos: CHAOS_X0,
            map,
        };
        Ok((population, field))
    }

    fn step<O, R>(
        &self,
        state: &mut State<Individual>,
        field: &mut Field,
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = state.population.len();
        let dim = problem.dim();
        let progress = problem.progress(state.iteration);

        field.chaos = field.map.next(field.chaos, state.iteration);
        let ch_value = self.ch_value_initial - progress * (self.ch_value_initial - self.w_min);
        let g = self.g0 * (-self.alpha * progress).exp() + ch_value * field.map.normalize(field.chaos);

        let mass = masses(&state.population);
        let mut heaviest: Vec<usize> = (0..n).collect();
        heaviest.sort_by(|&a, &b| mass[b].total_cmp(&mass[a]));
        heaviest.truncate(self.kbest(n, progress));

        let mut positions = Vec::with_capacity(n);
        for (i, agent) in state.population.iter().enumerate() {
            let mut acc = vec![0.0; dim];
            for &j in &heaviest {
                if j == i {
                    continue;
                }
                let other = &state.population[j].x;
                let r = distance(&agent.x, other, self.r_norm);
                let scale = g * mass[j] / (r.powf(self.r_power) + f64::EPSILON);
                for (a, (xj, xi)) in acc.iter_mut().zip(other.iter().zip(&agent.x)) {
                    *a += rng.random::<f64>() * scale * (xj - xi);
                }
            }

            let velocity = &mut field.velocities[i];
            let mut x = agent.x.clone();
            for d in 0..dim {
                velocity[d] = rng.random::<f64>() * velocity[d] + acc[d];
                x[d] += velocity[d];
            }
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
