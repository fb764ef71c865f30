//! Optimizer state returned to the caller.

use super::solution::{Individual, MoIndividual, Solution};
use super::stop::StopReason;
use std::fmt;
use std::time::{Duration, SystemTime};

/// History retained when the iteration budget is unbounded.
pub const DEFAULT_HISTORY_CAP: usize = 10_000;

/// Copy of the state after one iteration, kept when
/// [`Options::store_convergence`](super::Options::store_convergence) is set.
#[derive(Debug, Clone)]
pub struct Snapshot<S: Solution> {
    pub iteration: usize,
    pub f_calls: usize,
    pub best_sol: S::Best,
    pub population: Vec<S>,
}

/// Status of a run.
///
/// Created by the driver when the run starts, mutated only by the driver
/// and the active strategy, and handed back to the caller on termination.
///
/// Single-objective runs produce a `State<Individual>` with
/// [`minimum`](State::minimum)/[`minimizer`](State::minimizer);
/// multi-objective runs produce a `State<MoIndividual>` whose best record
/// is the non-dominated set ([`pareto_front`](State::pareto_front)).
#[derive(Debug, Clone)]
pub struct State<S: Solution> {
    /// Best solution (or non-dominated set) found so far.
    pub best_sol: S::Best,

    /// Current population. SA keeps a single-element population.
    pub population: Vec<S>,

    /// Objective evaluations.
    pub f_calls: usize,

    /// Inequality-constraint evaluations.
    pub g_calls: usize,

    /// Equality-constraint evaluations.
    pub h_calls: usize,

    /// Completed iterations.
    pub iteration: usize,

    /// Fraction of candidates that improved on their parent in the last
    /// iteration (single-objective strategies).
    pub success_rate: f64,

    /// Per-iteration snapshots, oldest first.
    pub convergence: Vec<Snapshot<S>>,

    /// Wall-clock start of the run.
    pub start_time: SystemTime,

    /// Wall-clock end of the run; `None` while running.
    pub final_time: Option<SystemTime>,

    /// Set once a stopping criterion fires.
    pub stop: bool,

    /// Why the run stopped.
    pub stop_reason: Option<StopReason>,

    /// Sign multiplier of the run (1 minimize, -1 maximize).
    pub(crate) sign: f64,
}

impl<S: Solution> State<S> {
    /// Creates the initial state from an evaluated, non-empty population.
    pub fn new(population: Vec<S>, sign: f64) -> Self {
        Self {
            best_sol: S::best_of(&population),
            population,
            f_calls: 0,
            g_calls: 0,
            h_calls: 0,
            iteration: 0,
            success_rate: 0.0,
            convergence: Vec::new(),
            start_time: SystemTime::now(),
            final_time: None,
            stop: false,
            stop_reason: None,
            sign,
        }
    }

    /// Folds the current population into the best record.
    pub fn refresh_best(&mut self) {
        S::refresh_best(&mut self.best_sol, &self.population);
    }

    /// Number of objective evaluations.
    pub fn nfes(&self) -> usize {
        self.f_calls
    }

    /// Positions of the population as an N×D table.
    pub fn positions(&self) -> Vec<Vec<f64>> {
        self.population.iter().map(|s| s.position().to_vec()).collect()
    }

    /// Wall-clock time elapsed (until `final_time` once stopped).
    pub fn elapsed(&self) -> Duration {
        let end = self.final_time.unwrap_or_else(SystemTime::now);
        end.duration_since(self.start_time).unwrap_or_default()
    }

    /// Appends a snapshot, holding at most `cap` entries.
    ///
    /// When full, the newest snapshot replaces the last one: the first
    /// `cap - 1` snapshots are kept and the final slot always holds the
    /// latest iteration.
    pub(crate) fn push_snapshot(&mut self, cap: usize) {
        let snapshot = Snapshot {
            iteration: self.iteration,
            f_calls: self.f_calls,
            best_sol: self.best_sol.clone(),
            population: self.population.clone(),
        };
        if self.convergence.len() >= cap.max(1) {
            self.convergence.pop();
        }
        self.convergence.push(snapshot);
    }
}

impl State<Individual> {
    /// Best objective value found (in the caller's orientation).
    pub fn minimum(&self) -> f64 {
        self.sign * self.best_sol.f
    }

    /// Position of the best solution found.
    pub fn minimizer(&self) -> &[f64] {
        &self.best_sol.x
    }

    /// Objective values of the population (in the caller's orientation).
    pub fn fvals(&self) -> Vec<f64> {
        self.population.iter().map(|s| self.sign * s.f).collect()
    }

    /// `(f_calls, best value)` per stored snapshot.
    ///
    /// Empty unless the run stored its convergence history.
    pub fn convergence(&self) -> (Vec<usize>, Vec<f64>) {
        self.convergence
            .iter()
            .map(|snap| (snap.f_calls, self.sign * snap.best_sol.f))
            .unzip()
    }

    /// Records a candidate evaluated outside the population.
    pub fn observe(&mut self, candidate: &Individual) {
        if candidate.is_better_than(&self.best_sol) {
            self.best_sol = candidate.clone();
        }
    }
}

impl State<MoIndividual> {
    /// Non-dominated solutions of the current population.
    pub fn pareto_front(&self) -> &[MoIndividual] {
        &self.best_sol
    }

    /// Objective vectors of the front (in the caller's orientation).
    pub fn pareto_objectives(&self) -> Vec<Vec<f64>> {
        self.best_sol
            .iter()
            .map(|s| s.f.iter().map(|v| self.sign * v).collect())
            .collect()
    }

    /// Objective vectors of the population (in the caller's orientation).
    pub fn fvals(&self) -> Vec<Vec<f64>> {
        self.population
            .iter()
            .map(|s| s.f.iter().map(|v| self.sign * v).collect())
            .collect()
    }
}

fn write_footer<S: Solution>(state: &State<S>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "| f calls: {}", state.f_calls)?;
    writeln!(f, "| Total time: {:.4} s", state.elapsed().as_secs_f64())?;
    if let Some(reason) = state.stop_reason {
        writeln!(f, "| Stop reason: {reason}")?;
    }
    write!(f, "+============================+")
}

impl fmt::Display for State<Individual> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+=========== RESULT ==========+")?;
        writeln!(f, "| Iter.: {}", self.iteration)?;
        writeln!(f, "| f(x) = {:e}", self.minimum())?;
        writeln!(f, "| solution.x = {:?}", self.minimizer())?;
        write_footer(self, f)
    }
}

impl fmt::Display for State<MoIndividual> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feasible = self.best_sol.iter().filter(|s| s.is_feasible).count();
        writeln!(f, "+=========== RESULT ==========+")?;
        writeln!(f, "| Iter.: {}", self.iteration)?;
        writeln!(f, "| Non-dominated solutions: {}", self.best_sol.len())?;
        writeln!(f, "| Feasible: {feasible}")?;
        write_footer(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Vec<Individual> {
        vec![
            Individual::new(vec![1.0, 1.0], 2.0),
            Individual::new(vec![0.5, 0.0], 0.25),
        ]
    }

    #[test]
    fn test_accessors() {
        let state = State::new(population(), 1.0);
        assert_eq!(state.minimum(), 0.25);
        assert_eq!(state.minimizer(), &[0.5, 0.0]);
        assert_eq!(state.positions(), vec![vec![1.0, 1.0], vec![0.5, 0.0]]);
        assert_eq!(state.fvals(), vec![2.0, 0.25]);
        // Accessors are pure.
        assert_eq!(state.minimum(), state.minimum());
        assert_eq!(state.minimizer(), state.minimizer());
    }

    #[test]
    fn test_maximize_reports_caller_orientation() {
        // Stored values are sign-adjusted: -3 means f = 3 when maximizing.
        let pop = vec![Individual::new(vec![0.0], -3.0), Individual::new(vec![1.0], -1.0)];
        let state = State::new(pop, -1.0);
        assert_eq!(state.minimum(), 3.0);
        assert_eq!(state.fvals(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_snapshot_cap_keeps_latest() {
        let mut state = State::new(population(), 1.0);
        for it in 0..5 {
            state.iteration = it;
            state.push_snapshot(3);
        }
        assert_eq!(state.convergence.len(), 3);
        assert_eq!(state.convergence.last().map(|s| s.iteration), Some(4));
        assert_eq!(state.convergence[0].iteration, 0);
        assert_eq!(state.convergence[1].iteration, 1);
    }

    #[test]
    fn test_observe() {
        let mut state = State::new(population(), 1.0);
        state.observe(&Individual::new(vec![0.0, 0.0], 1.0));
        assert_eq!(state.minimum(), 0.25);
        state.observe(&Individual::new(vec![0.0, 0.0], 0.0));
        assert_eq!(state.minimum(), 0.0);
    }

    #[test]
    fn test_display() {
        let mut state = State::new(population(), 1.0);
        state.stop_reason = Some(StopReason::CallBudgetExhausted);
        let text = state.to_string();
        assert!(text.contains("RESULT"));
        assert!(text.contains("f calls: 0"));
        assert!(text.contains("call_limit"));
    }
}
