//! The optimization driver.
//!
//! [`Optimizer`] validates the inputs, resolves the budget, creates the
//! run's generator, lets the strategy build its initial population and then
//! alternates stopping checks with strategy steps until a criterion holds.

use crate::core::stop::StopContext;
use crate::core::{
    check_stop, Bounds, Budget, EvalSettings, Information, Objective, Options, Problem, Solution,
    State, StopReason, Strategy, DEFAULT_HISTORY_CAP,
};
use crate::eca::Eca;
use crate::error::{OptimizeError, Result};
use crate::random::rng_from_option;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

/// Executes a strategy on a problem.
pub struct Optimizer;

impl Optimizer {
    /// Runs `strategy` on `objective` over `bounds`.
    pub fn run<St, O>(
        objective: &O,
        bounds: &Bounds,
        strategy: &St,
        options: &Options,
        information: &Information,
    ) -> Result<State<St::Solution>>
    where
        St: Strategy,
        O: Objective<<St::Solution as Solution>::Value> + ?Sized,
    {
        Self::run_with_cancel(objective, bounds, strategy, options, information, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops at
    /// the end of the current iteration with [`StopReason::Cancelled`] and
    /// returns the state reached so far.
    pub fn run_with_cancel<St, O>(
        objective: &O,
        bounds: &Bounds,
        strategy: &St,
        options: &Options,
        information: &Information,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<State<St::Solution>>
    where
        St: Strategy,
        O: Objective<<St::Solution as Solution>::Value> + ?Sized,
    {
        bounds.validate()?;
        options.validate()?;
        information.validate(bounds.dim())?;
        strategy.validate(bounds.dim())?;

        let budget = resolve_budget(strategy, bounds.dim(), options, information);
        let settings = EvalSettings {
            sign: options.search_type.sign(),
            g_tol: options.g_tol,
            h_tol: options.h_tol,
        };
        let history_cap = if budget.iterations > 0 {
            budget.iterations + 1
        } else {
            DEFAULT_HISTORY_CAP
        };

        let mut rng = rng_from_option(options.seed);
        let mut problem =
            Problem::new(objective, bounds, settings, budget).with_parallel(options.parallel);

        debug!(
            "{}: D = {}, budget = {} calls / {} iterations",
            strategy.name(),
            bounds.dim(),
            budget.f_calls_limit,
            budget.iterations
        );

        let start_time = SystemTime::now();
        let (population, mut memory) = strategy.initialize(&mut problem, &mut rng)?;
        if population.is_empty() {
            return Err(OptimizeError::InvalidPopulationSize { size: 0, minimum: 1 });
        }

        let mut state = State::new(population, settings.sign);
        state.start_time = start_time;
        sync_counters(&mut state, &problem);
        if options.store_convergence {
            state.push_snapshot(history_cap);
        }
        if options.debug {
            report(&state);
        }

        let is_cancelled = || cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed));

        let reason = loop {
            let ctx = StopContext {
                options,
                information,
                budget,
                cancelled: is_cancelled(),
                converged: strategy.has_converged(&state, &memory),
            };
            if let Some(reason) = check_stop(&state, &ctx) {
                break reason;
            }

            state.iteration += 1;
            strategy.step(&mut state, &mut memory, &mut problem, &mut rng)?;
            sync_counters(&mut state, &problem);
            state.refresh_best();

            if options.store_convergence {
                state.push_snapshot(history_cap);
            }
            if options.debug {
                report(&state);
            }
        };

        state.stop = true;
        state.stop_reason = Some(reason);
        state.final_time = Some(SystemTime::now());

        debug!(
            "{}: stopped after {} iterations and {} calls ({reason})",
            strategy.name(),
            state.iteration,
            state.f_calls
        );
        if options.debug {
            info!("Stopped since {reason}");
            report(&state);
        }
        Ok(state)
    }
}

/// Runs `strategy` with the given options and known optimum.
///
/// Shorthand for [`Optimizer::run`].
///
/// # Examples
///
/// ```
/// use u_metaopt::core::{Bounds, Information, Options, StopReason};
/// use u_metaopt::de::De;
/// use u_metaopt::driver::optimize;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let bounds = Bounds::uniform(-10.0, 10.0, 3).unwrap();
/// let options = Options::default().with_f_calls_limit(6000).with_seed(7);
///
/// let state = optimize(&sphere, &bounds, &De::default(), &options, &Information::default()).unwrap();
/// assert_eq!(state.stop_reason, Some(StopReason::CallBudgetExhausted));
/// assert!(state.minimum() < 1.0);
/// ```
pub fn optimize<St, O>(
    objective: &O,
    bounds: &Bounds,
    strategy: &St,
    options: &Options,
    information: &Information,
) -> Result<State<St::Solution>>
where
    St: Strategy,
    O: Objective<<St::Solution as Solution>::Value> + ?Sized,
{
    Optimizer::run(objective, bounds, strategy, options, information)
}

/// Minimizes `f` over `bounds` with ECA and default settings.
///
/// # Examples
///
/// ```
/// use u_metaopt::core::Bounds;
/// use u_metaopt::driver::minimize;
///
/// let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
/// let state = minimize(|x: &[f64]| (x[0] - 1.0).powi(2) + x[1].powi(2), &bounds).unwrap();
/// assert!(state.minimum() < 1e-3);
/// ```
pub fn minimize<F>(f: F, bounds: &Bounds) -> Result<State<crate::core::Individual>>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    Optimizer::run(
        &f,
        bounds,
        &Eca::default(),
        &Options::default(),
        &Information::default(),
    )
}

/// Budget of the run: the caller's limits, or the strategy default when no
/// stopping criterion was configured at all.
fn resolve_budget<St: Strategy>(
    strategy: &St,
    dim: usize,
    options: &Options,
    information: &Information,
) -> Budget {
    let requested = Budget {
        f_calls_limit: options.f_calls_limit,
        iterations: options.iterations,
    };
    // A known optimum only stops runs with a scalar best.
    let known = <St::Solution as Solution>::HAS_SCALAR_BEST && information.is_known();
    let unbounded = requested.f_calls_limit == 0
        && requested.iterations == 0
        && options.time_limit_ms.is_none()
        && !known;
    if unbounded {
        let fallback = strategy.default_budget(dim);
        warn!(
            "{}: no stopping criterion set, using {} calls / {} iterations",
            strategy.name(),
            fallback.f_calls_limit,
            fallback.iterations
        );
        fallback
    } else {
        requested
    }
}

fn sync_counters<S, O, T>(state: &mut State<S>, problem: &Problem<'_, O, T>)
where
    S: Solution<Value = T>,
    O: Objective<T> + ?Sized,
    T: Send,
{
    state.f_calls = problem.f_calls();
    state.g_calls = problem.g_calls();
    state.h_calls = problem.h_calls();
}

fn report<S: Solution>(state: &State<S>) {
    let elapsed = state.elapsed().as_secs_f64();
    match S::best_scalar(&state.best_sol) {
        Some((f, x)) => info!(
            "iter {} | f(x) = {:e} | x = {:?} | f calls = {} | {:.4} s",
            state.iteration,
            state.sign * f,
            x,
            state.f_calls,
            elapsed
        ),
        None => info!(
            "iter {} | front size = {} | f calls = {} | {:.4} s",
            state.iteration,
            S::best_len(&state.best_sol),
            state.f_calls,
            elapsed
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::Abc;
    use crate::cgsa::Cgsa;
    use crate::core::Individual;
    use crate::core::Fgh;
    use crate::de::De;
    use crate::moead::MoeadDe;
    use crate::nsga2::Nsga2;
    use crate::pso::Pso;
    use crate::sa::Sa;
    use crate::woa::Woa;
    use std::sync::atomic::AtomicUsize;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn options(limit: usize) -> Options {
        Options::default()
            .with_f_calls_limit(limit)
            .with_seed(42)
            .with_store_convergence(true)
    }

    /// Runs `body` once per single-objective strategy.
    fn for_each_strategy(mut body: impl FnMut(&str, &dyn Fn(&Options) -> Result<State<Individual>>)) {
        let bounds = Bounds::uniform(-5.0, 5.0, 3).unwrap();
        let info = Information::default();
        body("eca", &|o: &Options| optimize(&sphere, &bounds, &Eca::default(), o, &info));
        body("de", &|o: &Options| optimize(&sphere, &bounds, &De::default(), o, &info));
        body("pso", &|o: &Options| optimize(&sphere, &bounds, &Pso::default(), o, &info));
        body("abc", &|o: &Options| optimize(&sphere, &bounds, &Abc::default(), o, &info));
        body("cgsa", &|o: &Options| optimize(&sphere, &bounds, &Cgsa::default(), o, &info));
        body("sa", &|o: &Options| optimize(&sphere, &bounds, &Sa::default(), o, &info));
        body("woa", &|o: &Options| optimize(&sphere, &bounds, &Woa::default(), o, &info));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        for_each_strategy(|name, run| {
            let a = run(&options(2000)).unwrap();
            let b = run(&options(2000)).unwrap();
            assert_eq!(a.minimum(), b.minimum(), "{name}");
            assert_eq!(a.minimizer(), b.minimizer(), "{name}");
            assert_eq!(a.f_calls, b.f_calls, "{name}");
        });
    }

    #[test]
    fn test_call_budget_and_trace_invariants() {
        let bounds = Bounds::uniform(-5.0, 5.0, 3).unwrap();
        for_each_strategy(|name, run| {
            let state = run(&options(2000)).unwrap();
            assert_eq!(state.stop_reason, Some(StopReason::CallBudgetExhausted), "{name}");
            assert!(state.f_calls >= 2000, "{name}");
            // At most one generation of overshoot (SA evaluates 500 per iteration).
            assert!(state.f_calls < 2000 + 500, "{name}: {}", state.f_calls);

            let (calls, best) = state.convergence();
            assert!(!calls.is_empty(), "{name}");
            assert!(best.windows(2).all(|w| w[1] <= w[0]), "{name}: trace not monotone");
            assert!(calls.windows(2).all(|w| w[1] >= w[0]), "{name}");

            for snap in &state.convergence {
                for ind in &snap.population {
                    assert!(bounds.contains(&ind.x), "{name}: {:?} out of bounds", ind.x);
                }
            }
            assert!(bounds.contains(state.minimizer()), "{name}");
            assert!(state.minimum() <= state.fvals().iter().cloned().fold(f64::INFINITY, f64::min));
        });
    }

    #[test]
    fn test_f_calls_match_instrumented_objective() {
        let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
        let info = Information::default();
        let opts = Options::default().with_iterations(15).with_seed(3);

        macro_rules! check {
            ($strategy:expr) => {{
                let counter = AtomicUsize::new(0);
                let f = |x: &[f64]| {
                    counter.fetch_add(1, Ordering::Relaxed);
                    sphere(x)
                };
                let state = optimize(&f, &bounds, &$strategy, &opts, &info).unwrap();
                assert_eq!(state.f_calls, counter.load(Ordering::Relaxed));
                assert_eq!(state.nfes(), state.f_calls);
                assert_eq!(state.stop_reason, Some(StopReason::IterationBudgetExhausted));
                assert_eq!(state.iteration, 15);
            }};
        }

        check!(Eca::default());
        check!(De::default());
        check!(Pso::default());
        check!(Abc::default());
        check!(Cgsa::default());
        check!(Sa::default());
        check!(Woa::default());
    }

    #[test]
    fn test_objective_tolerance_on_sphere() {
        let bounds = Bounds::from_rows(&[vec![-10.0; 3], vec![10.0; 3]]).unwrap();
        let info = Information::default().with_f_optimum(0.0);
        let opts = Options::default()
            .with_f_tol(1e-3)
            .with_f_calls_limit(200_000)
            .with_seed(11);
        let state = optimize(&sphere, &bounds, &Eca::default(), &opts, &info).unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::ObjectiveToleranceMet));
        assert!(state.minimum().abs() < 1e-3);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
        let state = optimize(&sphere, &bounds, &Eca::default(), &options(1000), &Information::default())
            .unwrap();
        assert_eq!(state.minimum(), state.minimum());
        assert_eq!(state.minimizer().to_vec(), state.minimizer().to_vec());
        assert_eq!(state.positions().len(), state.fvals().len());
        assert!(state.final_time.is_some());
        assert!(state.stop);
    }

    #[test]
    fn test_maximize() {
        let bounds = Bounds::uniform(-2.0, 2.0, 2).unwrap();
        let f = |x: &[f64]| 4.0 - x.iter().map(|v| v * v).sum::<f64>();
        let opts = options(4000).with_search_type(crate::core::SearchType::Maximize);
        let state = optimize(&f, &bounds, &De::default(), &opts, &Information::default()).unwrap();
        assert!(state.minimum() > 3.9, "got {}", state.minimum());
        let (_, trace) = state.convergence();
        assert!(trace.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_invalid_inputs_fail_before_evaluation() {
        let counter = AtomicUsize::new(0);
        let f = |x: &[f64]| {
            counter.fetch_add(1, Ordering::Relaxed);
            sphere(x)
        };
        let info = Information::default();
        let bad = Bounds::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(bad.unwrap_err().is_bounds_error());

        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let err = optimize(&f, &bounds, &Eca::default(), &Options::default().with_x_tol(-1.0), &info)
            .unwrap_err();
        assert!(err.is_config_error());

        let err = optimize(
            &f,
            &bounds,
            &De::default().with_population_size(3),
            &Options::default(),
            &info,
        )
        .unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidPopulationSize { size: 3, .. }));
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_objective_error_aborts() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let f = crate::core::Fallible(|x: &[f64]| -> std::result::Result<f64, std::io::Error> {
            if x[0] > 0.0 {
                Err(std::io::Error::other("diverged"))
            } else {
                Ok(x[0])
            }
        });
        let err = optimize(&f, &bounds, &Pso::default(), &options(100_000), &Information::default())
            .unwrap_err();
        assert!(matches!(err, OptimizeError::ObjectiveEvaluationFailed { .. }));
    }

    #[test]
    fn test_default_budget_applies_without_criteria() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let state = optimize(
            &sphere,
            &bounds,
            &Woa::default(),
            &Options::default().with_seed(5),
            &Information::default(),
        )
        .unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::CallBudgetExhausted));
        assert!(state.f_calls >= 20_000);
    }

    fn two_objectives(x: &[f64]) -> Fgh {
        let f1 = x.iter().map(|v| v * v).sum::<f64>();
        let f2 = x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum::<f64>();
        (vec![f1, f2], vec![x[0] + x[1] - 1.5], vec![])
    }

    #[test]
    fn test_multi_objective_runs_are_deterministic_and_bounded() {
        let bounds = Bounds::uniform(-1.0, 2.0, 3).unwrap();
        let info = Information::default();
        let opts = Options::default()
            .with_iterations(20)
            .with_store_convergence(true)
            .with_seed(17);

        let moead = MoeadDe::new(2).with_population_size(20).with_t(5);
        let nsga2 = Nsga2::default().with_population_size(20);
        let runs = [
            (
                "moead",
                optimize(&two_objectives, &bounds, &moead, &opts, &info).unwrap(),
                optimize(&two_objectives, &bounds, &moead, &opts, &info).unwrap(),
            ),
            (
                "nsga2",
                optimize(&two_objectives, &bounds, &nsga2, &opts, &info).unwrap(),
                optimize(&two_objectives, &bounds, &nsga2, &opts, &info).unwrap(),
            ),
        ];
        for (name, a, b) in &runs {
            assert_eq!(a.pareto_objectives(), b.pareto_objectives(), "{name}");
            assert_eq!(a.positions(), b.positions(), "{name}");
            assert_eq!(a.f_calls, b.f_calls, "{name}");
            assert_eq!(a.convergence.len(), 21, "{name}");
            for snap in &a.convergence {
                for ind in &snap.population {
                    assert!(bounds.contains(&ind.x), "{name}: {:?} out of bounds", ind.x);
                }
            }
        }
    }

    #[test]
    fn test_known_optimum_does_not_bound_multi_objective_runs() {
        let bounds = Bounds::uniform(0.0, 1.0, 2).unwrap();
        let info = Information::default().with_f_optimum(0.0);
        let nsga2 = Nsga2::default().with_population_size(10);
        let state = optimize(
            &two_objectives,
            &bounds,
            &nsga2,
            &Options::default().with_seed(1),
            &info,
        )
        .unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::IterationBudgetExhausted));
        assert_eq!(state.iteration, 500);
    }

    #[test]
    fn test_cancel_flag() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let state = Optimizer::run_with_cancel(
            &sphere,
            &bounds,
            &Eca::default(),
            &options(10_000),
            &Information::default(),
            Some(cancel),
        )
        .unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::Cancelled));
        assert_eq!(state.iteration, 0);
    }

    #[test]
    fn test_history_is_bounded_by_iterations() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let opts = Options::default()
            .with_iterations(7)
            .with_store_convergence(true)
            .with_seed(1);
        let state = optimize(&sphere, &bounds, &Eca::default(), &opts, &Information::default()).unwrap();
        assert_eq!(state.convergence.len(), 8);
        assert_eq!(state.convergence.last().map(|s| s.iteration), Some(7));
    }

    #[test]
    fn test_debug_reports_do_not_change_the_run() {
        let _ = env_logger::builder().is_test(true).try_init();
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let quiet = Options::default().with_iterations(5).with_seed(9);
        let loud = quiet.clone().with_debug(true);
        let a = optimize(&sphere, &bounds, &Eca::default(), &quiet, &Information::default()).unwrap();
        let b = optimize(&sphere, &bounds, &Eca::default(), &loud, &Information::default()).unwrap();
        assert_eq!(a.minimum(), b.minimum());
        assert_eq!(a.f_calls, b.f_calls);
    }

    #[test]
    fn test_minimize_default() {
        let bounds = Bounds::uniform(-3.0, 3.0, 2).unwrap();
        let state = minimize(sphere, &bounds).unwrap();
        assert_eq!(state.stop_reason, Some(StopReason::CallBudgetExhausted));
        assert!(state.minimum() < 1e-3);
        assert!(state.to_string().contains("RESULT"));
    }
}
