//! PSO velocity and position update.

use super::config::Pso;
use crate::core::{Budget, Individual, Objective, Problem, State, Strategy};
use crate::error::Result;
use rand::Rng;

/// Per-run swarm memory.
#[derive(Debug, Clone)]
pub struct Swarm {
    /// Velocity of each particle.
    pub velocities: Vec<Vec<f64>>,
    /// Best position visited by each particle.
    pub personal_best: Vec<Individual>,
}

impl Strategy for Pso {
    type Solution = Individual;
    type Memory = Swarm;

    fn name(&self) -> &'static str {
        "PSO"
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
    ) -> Result<(Vec<Individual>, Swarm)>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let n = self.resolved_population(problem.dim());
        let xs = problem.bounds().sample_n(n, rng);
        let population: Vec<Individual> = problem.evaluate_all(xs)?;
        let swarm = Swarm {
            velocities: vec![vec![0.0; problem.dim()]; n],
            personal_best: population.clone(),
        };
        Ok((population, swarm))
    }

    fn step<O, R>(
        &self,
        state: &mut State<Individual>,
        swarm: &mut Swarm,
        problem: &mut Problem<'_, O, f64>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<f64> + ?Sized,
        R: Rng + ?Sized,
    {
        let global = state.best_sol.x.clone();
        let widths = problem.bounds().widths();

        let mut positions = Vec::with_capacity(state.population.len());
        for ((particle, velocity), pbest) in state
            .population
            .iter()
            .zip(swarm.velocities.iter_mut())
            .zip(&swarm.personal_best)
        {
            let mut x = particle.x.clone();
            for j in 0..x.len() {
                let r1: f64 = rng.random();
                let r2: f64 = rng.random();
                let v = self.omega * velocity[j]
                    + self.c1 * r1 * (pbest.x[j] - x[j])
                    + self.c2 * r2 * (global[j] - x[j]);
                velocity[j] = v.clamp(-widths[j], widths[j]);
                x[j] += velocity[j];
            }
            problem.bounds().clamp(&mut x);
            positions.push(x);
        }

        let moved: Vec<Individual> = problem.evaluate_all(positions)?;
        let mut improved = 0usize;
        for (pbest, particle) in swarm.personal_best.iter_mut().zip(&moved) {
            if particle.is_better_than(pbest) {
                *pbest = particle.clone();
                improved += 1;
            }
        }
        state.success_rate = improved as f64 / moved.len() as f64;
        state.population = moved;
        Ok(())
    }
}
