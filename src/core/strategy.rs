//! The strategy capability every algorithm implements.

use super::problem::{Budget, Objective, Problem};
use super::solution::Solution;
use super::state::State;
use crate::error::Result;
use rand::Rng;

/// A population-based search strategy.
///
/// Parameters live in `self` and are immutable for the duration of a run.
/// Per-run working data (velocities, personal bests, weight vectors,
/// temperature, ...) lives in [`Strategy::Memory`], created by
/// [`initialize`](Strategy::initialize) and handed back to every
/// [`step`](Strategy::step).
///
/// The driver owns the generator and passes it to both calls; strategies
/// never create their own.
pub trait Strategy {
    /// Solution representation the strategy works on.
    type Solution: Solution;

    /// Per-run working memory.
    type Memory;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Validates the parameters for a `dim`-dimensional problem.
    fn validate(&self, dim: usize) -> Result<()>;

    /// Budget applied when the caller sets no stopping criterion at all.
    fn default_budget(&self, dim: usize) -> Budget;

    /// Creates and evaluates the initial population.
    fn initialize<O, R>(
        &self,
        problem: &mut Problem<'_, O, <Self::Solution as Solution>::Value>,
        rng: &mut R,
    ) -> Result<(Vec<Self::Solution>, Self::Memory)>
    where
        O: Objective<<Self::Solution as Solution>::Value> + ?Sized,
        R: Rng + ?Sized;

    /// Performs one iteration, replacing `state.population`.
    ///
    /// The driver has already advanced `state.iteration` and refreshes the
    /// best record and counters afterwards.
    fn step<O, R>(
        &self,
        state: &mut State<Self::Solution>,
        memory: &mut Self::Memory,
        problem: &mut Problem<'_, O, <Self::Solution as Solution>::Value>,
        rng: &mut R,
    ) -> Result<()>
    where
        O: Objective<<Self::Solution as Solution>::Value> + ?Sized,
        R: Rng + ?Sized;

    /// Strategy-specific convergence test.
    fn has_converged(&self, _state: &State<Self::Solution>, _memory: &Self::Memory) -> bool {
        false
    }
}

/// Validates a resolved population size against the strategy minimum.
pub(crate) fn check_population(size: usize, minimum: usize) -> Result<()> {
    if size < minimum.max(1) {
        return Err(crate::error::OptimizeError::InvalidPopulationSize {
            size,
            minimum: minimum.max(1),
        });
    }
    Ok(())
}

/// Checks that `p` is a probability.
pub(crate) fn check_probability(name: &str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(crate::error::OptimizeError::conflict(format!(
            "{name} must be in [0, 1], got {p}"
        )));
    }
    Ok(())
}

/// Checks that `v` is finite and strictly positive.
pub(crate) fn check_positive(name: &str, v: f64) -> Result<()> {
    if !(v > 0.0 && v.is_finite()) {
        return Err(crate::error::OptimizeError::conflict(format!(
            "{name} must be positive, got {v}"
        )));
    }
    Ok(())
}
