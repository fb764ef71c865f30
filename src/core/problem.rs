//! Objective functions and the evaluation context.
//!
//! [`Problem`] is the only path through which strategies reach the
//! objective. It applies the search direction, counts every call exactly
//! once and turns objective errors into
//! [`OptimizeError::ObjectiveEvaluationFailed`].

use super::bounds::Bounds;
use super::solution::{EvalSettings, Solution};
use crate::error::{BoxError, OptimizeError, Result};
use std::marker::PhantomData;

/// A black-box objective returning `T` for a position.
///
/// Implemented automatically for closures `Fn(&[f64]) -> f64` (single
/// objective) and `Fn(&[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>)` (multi
/// objective). Wrap fallible closures in [`Fallible`].
///
/// The engine assumes evaluations are deterministic for reproducibility.
pub trait Objective<T>: Sync {
    /// Evaluates the objective at `x`.
    fn evaluate(&self, x: &[f64]) -> std::result::Result<T, BoxError>;
}

impl<F> Objective<f64> for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, x: &[f64]) -> std::result::Result<f64, BoxError> {
        Ok(self(x))
    }
}

impl<F> Objective<super::solution::Fgh> for F
where
    F: Fn(&[f64]) -> super::solution::Fgh + Sync,
{
    fn evaluate(&self, x: &[f64]) -> std::result::Result<super::solution::Fgh, BoxError> {
        Ok(self(x))
    }
}

/// Adapter for objectives that can fail.
///
/// # Examples
///
/// ```
/// use u_metaopt::core::{Bounds, Fallible, Options};
/// use u_metaopt::eca::Eca;
/// use u_metaopt::driver::optimize;
///
/// let f = Fallible(|x: &[f64]| -> Result<f64, String> {
///     if x[0] > 0.5 { Err("outside the model's domain".into()) } else { Ok(x[0]) }
/// });
/// let bounds = Bounds::uniform(0.0, 1.0, 1).unwrap();
/// let options = Options::default().with_f_calls_limit(500).with_seed(1);
/// let err = optimize(&f, &bounds, &Eca::default(), &options, &Default::default()).unwrap_err();
/// assert!(err.to_string().contains("domain"));
/// ```
pub struct Fallible<F>(pub F);

impl<F, T, E> Objective<T> for Fallible<F>
where
    F: Fn(&[f64]) -> std::result::Result<T, E> + Sync,
    E: Into<BoxError>,
{
    fn evaluate(&self, x: &[f64]) -> std::result::Result<T, BoxError> {
        (self.0)(x).map_err(Into::into)
    }
}

/// Resolved budgets of a run, used by strategies for schedules that depend
/// on progress (linear decays, annealing, chaotic constants).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    /// Objective-call limit. 0 = unbounded.
    pub f_calls_limit: usize,
    /// Iteration limit. 0 = unbounded.
    pub iterations: usize,
}

impl Budget {
    /// Fraction of the budget consumed, in `[0, 1]`.
    ///
    /// The larger of the call and iteration fractions; 0 when unbounded.
    pub fn progress(&self, f_calls: usize, iteration: usize) -> f64 {
        let by_calls = if self.f_calls_limit > 0 {
            f_calls as f64 / self.f_calls_limit as f64
        } else {
            0.0
        };
        let by_iterations = if self.iterations > 0 {
            iteration as f64 / self.iterations as f64
        } else {
            0.0
        };
        by_calls.max(by_iterations).clamp(0.0, 1.0)
    }
}

/// Evaluation context handed to strategies.
pub struct Problem<'a, O: ?Sized, T> {
    objective: &'a O,
    bounds: &'a Bounds,
    settings: EvalSettings,
    budget: Budget,
    parallel: bool,
    f_calls: usize,
    g_calls: usize,
    h_calls: usize,
    _value: PhantomData<fn() -> T>,
}

impl<'a, O, T> Problem<'a, O, T>
where
    O: Objective<T> + ?Sized,
    T: Send,
{
    pub fn new(objective: &'a O, bounds: &'a Bounds, settings: EvalSettings, budget: Budget) -> Self {
        Self {
            objective,
            bounds,
            settings,
            budget,
            parallel: false,
            f_calls: 0,
            g_calls: 0,
            h_calls: 0,
            _value: PhantomData,
        }
    }

    /// Enables concurrent batch evaluation (needs the `parallel` feature).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn bounds(&self) -> &Bounds {
        self.bounds
    }

    pub fn dim(&self) -> usize {
        self.bounds.dim()
    }

    pub fn settings(&self) -> &EvalSettings {
        &self.settings
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn f_calls(&self) -> usize {
        self.f_calls
    }

    pub fn g_calls(&self) -> usize {
        self.g_calls
    }

    pub fn h_calls(&self) -> usize {
        self.h_calls
    }

    /// Budget fraction consumed at `iteration`.
    pub fn progress(&self, iteration: usize) -> f64 {
        self.budget.progress(self.f_calls, iteration)
    }

    /// Evaluates one position.
    pub fn evaluate<S>(&mut self, x: Vec<f64>) -> Result<S>
    where
        S: Solution<Value = T>,
    {
        let value = self
            .objective
            .evaluate(&x)
            .map_err(|source| OptimizeError::ObjectiveEvaluationFailed {
                f_calls: self.f_calls,
                source,
            })?;
        self.count::<S>(&value);
        Ok(S::from_evaluation(x, value, &self.settings))
    }

    /// Evaluates independent positions, keeping their order.
    ///
    /// With the `parallel` feature and [`with_parallel`](Self::with_parallel)
    /// enabled, evaluations run on the rayon pool. Counters are updated once
    /// per completed evaluation either way; on failure the error of the
    /// lowest failing index is returned.
    pub fn evaluate_all<S>(&mut self, xs: Vec<Vec<f64>>) -> Result<Vec<S>>
    where
        S: Solution<Value = T>,
    {
        #[cfg(feature = "parallel")]
        if self.parallel && xs.len() > 1 {
            use rayon::prelude::*;

            let objective = self.objective;
            let values: Vec<std::result::Result<T, BoxError>> =
                xs.par_iter().map(|x| objective.evaluate(x)).collect();
            return self.collect(xs, values);
        }

        let mut out = Vec::with_capacity(xs.len());
        for x in xs {
            out.push(self.evaluate(x)?);
        }
        Ok(out)
    }

    #[cfg(feature = "parallel")]
    fn collect<S>(
        &mut self,
        xs: Vec<Vec<f64>>,
        values: Vec<std::result::Result<T, BoxError>>,
    ) -> Result<Vec<S>>
    where
        S: Solution<Value = T>,
    {
        let mut out = Vec::with_capacity(xs.len());
        let mut failure = None;
        for (x, value) in xs.into_iter().zip(values) {
            match value {
                Ok(value) => {
                    self.count::<S>(&value);
                    if failure.is_none() {
                        out.push(S::from_evaluation(x, value, &self.settings));
                    }
                }
                Err(source) => {
                    if failure.is_none() {
                        failure = Some(source);
                    }
                }
            }
        }
        match failure {
            Some(source) => Err(OptimizeError::ObjectiveEvaluationFailed {
                f_calls: self.f_calls,
                source,
            }),
            None => Ok(out),
        }
    }

    fn count<S>(&mut self, value: &T)
    where
        S: Solution<Value = T>,
    {
        let (g, h) = S::constraint_calls(value);
        self.f_calls += 1;
        self.g_calls += g;
        self.h_calls += h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::solution::{Fgh, Individual, MoIndividual};

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_counts_each_call_once() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let mut problem = Problem::new(&sphere, &bounds, EvalSettings::default(), Budget::default());
        let a: Individual = problem.evaluate(vec![1.0, 1.0]).unwrap();
        assert_eq!(a.f, 2.0);
        let all: Vec<Individual> = problem
            .evaluate_all(vec![vec![0.0, 0.0], vec![0.5, 0.0]])
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(problem.f_calls(), 3);
        assert_eq!(problem.g_calls(), 0);
    }

    #[test]
    fn test_constraint_counters() {
        let f = |x: &[f64]| -> Fgh { (x.to_vec(), vec![x[0] - 1.0], vec![]) };
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let mut problem = Problem::new(&f, &bounds, EvalSettings::default(), Budget::default());
        let s: MoIndividual = problem.evaluate(vec![0.0, 0.0]).unwrap();
        assert!(s.is_feasible);
        assert_eq!((problem.f_calls(), problem.g_calls(), problem.h_calls()), (1, 1, 0));
    }

    #[test]
    fn test_error_propagates_with_count() {
        let f = Fallible(|x: &[f64]| -> std::result::Result<f64, String> {
            if x[0] < 0.0 {
                Err("negative".to_string())
            } else {
                Ok(x[0])
            }
        });
        let bounds = Bounds::uniform(-1.0, 1.0, 1).unwrap();
        let mut problem = Problem::new(&f, &bounds, EvalSettings::default(), Budget::default());
        let res: Result<Vec<Individual>> = problem.evaluate_all(vec![vec![0.5], vec![-0.5], vec![0.1]]);
        match res {
            Err(OptimizeError::ObjectiveEvaluationFailed { f_calls, source }) => {
                assert_eq!(f_calls, 1);
                assert_eq!(source.to_string(), "negative");
            }
            other => panic!("expected evaluation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_progress() {
        let budget = Budget {
            f_calls_limit: 100,
            iterations: 10,
        };
        assert_eq!(budget.progress(50, 2), 0.5);
        assert_eq!(budget.progress(10, 5), 0.5);
        assert_eq!(budget.progress(500, 50), 1.0);
        assert_eq!(Budget::default().progress(1000, 1000), 0.0);
    }
}
