//! Stopping criteria.
//!
//! [`check_stop`] is a pure decision over the state, the options, the
//! resolved budget and the known optimum. Criteria are tried in a fixed
//! order and the first one that holds is reported:
//!
//! 1. call budget
//! 2. iteration budget
//! 3. wall-clock limit
//! 4. external cancellation
//! 5. objective tolerance against the known optimum
//! 6. position tolerance against the known optimizer
//! 7. strategy-specific convergence

use super::options::{Information, Options};
use super::problem::Budget;
use super::solution::Solution;
use super::state::State;
use std::fmt;
use std::time::Duration;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// `f_calls >= f_calls_limit`.
    CallBudgetExhausted,
    /// `iteration >= iterations`.
    IterationBudgetExhausted,
    /// Elapsed time reached `time_limit_ms`.
    TimeLimitExceeded,
    /// The cancellation flag was raised.
    Cancelled,
    /// `|f(best) - f_optimum| < f_tol`.
    ObjectiveToleranceMet,
    /// `‖best.x - x_optimum‖ < x_tol`.
    SolutionToleranceMet,
    /// The strategy reported convergence (temperature floor, collapse).
    StrategyConverged,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::CallBudgetExhausted => "call_limit was met",
            StopReason::IterationBudgetExhausted => "iteration limit was met",
            StopReason::TimeLimitExceeded => "time_limit was met",
            StopReason::Cancelled => "the run was cancelled",
            StopReason::ObjectiveToleranceMet => "f_tol was met",
            StopReason::SolutionToleranceMet => "x_tol was met",
            StopReason::StrategyConverged => "the strategy converged",
        };
        f.write_str(text)
    }
}

/// Everything the evaluator looks at besides the state.
#[derive(Debug, Clone, Copy)]
pub struct StopContext<'a> {
    pub options: &'a Options,
    pub information: &'a Information,
    /// Budget after the default-budget rule was applied.
    pub budget: Budget,
    pub cancelled: bool,
    pub converged: bool,
}

/// Decides whether the run halts, and why.
pub fn check_stop<S: Solution>(state: &State<S>, ctx: &StopContext<'_>) -> Option<StopReason> {
    check_stop_at(state, state.elapsed(), ctx)
}

/// [`check_stop`] with an explicit elapsed time.
pub fn check_stop_at<S: Solution>(
    state: &State<S>,
    elapsed: Duration,
    ctx: &StopContext<'_>,
) -> Option<StopReason> {
    if ctx.budget.f_calls_limit > 0 && state.f_calls >= ctx.budget.f_calls_limit {
        return Some(StopReason::CallBudgetExhausted);
    }
    if ctx.budget.iterations > 0 && state.iteration >= ctx.budget.iterations {
        return Some(StopReason::IterationBudgetExhausted);
    }
    if let Some(ms) = ctx.options.time_limit_ms {
        if elapsed >= Duration::from_millis(ms) {
            return Some(StopReason::TimeLimitExceeded);
        }
    }
    if ctx.cancelled {
        return Some(StopReason::Cancelled);
    }

    if let Some((f, x)) = S::best_scalar(&state.best_sol) {
        if let Some(f_optimum) = ctx.information.f_optimum {
            // Compare in the caller's orientation.
            if (state.sign * f - f_optimum).abs() < ctx.options.f_tol {
                return Some(StopReason::ObjectiveToleranceMet);
            }
        }
        if let Some(x_optimum) = &ctx.information.x_optimum {
            if euclidean(x, x_optimum) < ctx.options.x_tol {
                return Some(StopReason::SolutionToleranceMet);
            }
        }
    }

    if ctx.converged {
        return Some(StopReason::StrategyConverged);
    }
    None
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(u, v)| (u - v) * (u - v))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solution::Individual;

    fn state(f: f64, x: Vec<f64>) -> State<Individual> {
        State::new(vec![Individual::new(x, f)], 1.0)
    }

    fn ctx<'a>(options: &'a Options, information: &'a Information, budget: Budget) -> StopContext<'a> {
        StopContext {
            options,
            information,
            budget,
            cancelled: false,
            converged: false,
        }
    }

    #[test]
    fn test_no_criterion_holds() {
        let options = Options::default();
        let info = Information::default();
        let s = state(1.0, vec![1.0]);
        assert_eq!(check_stop_at(&s, Duration::ZERO, &ctx(&options, &info, Budget::default())), None);
    }

    #[test]
    fn test_call_budget_has_priority() {
        let options = Options::default();
        let info = Information::default().with_f_optimum(1.0);
        let mut s = state(1.0, vec![1.0]);
        s.f_calls = 100;
        s.iteration = 10;
        let budget = Budget {
            f_calls_limit: 100,
            iterations: 10,
        };
        let mut c = ctx(&options, &info, budget);
        c.converged = true;
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &c),
            Some(StopReason::CallBudgetExhausted)
        );
        c.budget.f_calls_limit = 0;
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &c),
            Some(StopReason::IterationBudgetExhausted)
        );
        c.budget.iterations = 0;
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &c),
            Some(StopReason::ObjectiveToleranceMet)
        );
    }

    #[test]
    fn test_tolerances() {
        let options = Options::default().with_f_tol(1e-3).with_x_tol(1e-2);
        let s = state(5e-4, vec![0.001, 0.0]);

        let info = Information::default().with_f_optimum(0.0);
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &ctx(&options, &info, Budget::default())),
            Some(StopReason::ObjectiveToleranceMet)
        );

        let info = Information::default().with_x_optimum(vec![0.0, 0.0]);
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &ctx(&options, &info, Budget::default())),
            Some(StopReason::SolutionToleranceMet)
        );

        let info = Information::default().with_x_optimum(vec![1.0, 1.0]);
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &ctx(&options, &info, Budget::default())),
            None
        );
    }

    #[test]
    fn test_time_cancel_and_convergence() {
        let options = Options::default().with_time_limit_ms(10);
        let info = Information::default();
        let s = state(1.0, vec![1.0]);
        let mut c = ctx(&options, &info, Budget::default());
        assert_eq!(
            check_stop_at(&s, Duration::from_millis(10), &c),
            Some(StopReason::TimeLimitExceeded)
        );
        c.cancelled = true;
        assert_eq!(check_stop_at(&s, Duration::ZERO, &c), Some(StopReason::Cancelled));
        c.cancelled = false;
        c.converged = true;
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &c),
            Some(StopReason::StrategyConverged)
        );
    }

    #[test]
    fn test_maximize_compares_caller_orientation() {
        let options = Options::default().with_f_tol(1e-6);
        let info = Information::default().with_f_optimum(3.0);
        let s = State::new(vec![Individual::new(vec![0.0], -3.0)], -1.0);
        assert_eq!(
            check_stop_at(&s, Duration::ZERO, &ctx(&options, &info, Budget::default())),
            Some(StopReason::ObjectiveToleranceMet)
        );
    }
}
