//! Candidate solutions.
//!
//! Two representations share the [`Solution`] trait:
//!
//! - [`Individual`]: position + scalar objective (single-objective strategies)
//! - [`MoIndividual`]: position + objective vector + constraint values
//!   (multi-objective/constrained strategies)
//!
//! Objective values are stored already multiplied by the run's sign
//! (see [`SearchType`](super::SearchType)), so lower is always better.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Objective output in multi-objective mode: `(f, g, h)` with objectives,
/// inequality constraints (`g <= 0`) and equality constraints (`h = 0`).
pub type Fgh = (Vec<f64>, Vec<f64>, Vec<f64>);

/// Settings applied when turning a raw evaluation into a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalSettings {
    /// Sign multiplier: 1 to minimize, -1 to maximize.
    pub sign: f64,
    /// Inequality slack.
    pub g_tol: f64,
    /// Equality near-zero tolerance.
    pub h_tol: f64,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            sign: 1.0,
            g_tol: 0.0,
            h_tol: 1e-5,
        }
    }
}

/// Contract between the engine and a solution representation.
pub trait Solution: Clone + Debug + Send + Sync {
    /// What the objective callable returns for this representation.
    type Value: Send;

    /// What the state reports as "best": a single solution or a front.
    type Best: Clone + Debug;

    /// Whether the best record has a scalar view that a known optimum can
    /// be compared against.
    const HAS_SCALAR_BEST: bool;

    /// Builds a solution from a position and its raw evaluation.
    fn from_evaluation(x: Vec<f64>, value: Self::Value, settings: &EvalSettings) -> Self;

    /// Inequality/equality constraint evaluations contained in `value`.
    fn constraint_calls(value: &Self::Value) -> (usize, usize);

    /// Position vector.
    fn position(&self) -> &[f64];

    /// Best of a non-empty population.
    fn best_of(population: &[Self]) -> Self::Best;

    /// Folds the current population into the best-so-far record.
    fn refresh_best(best: &mut Self::Best, population: &[Self]);

    /// Scalar view of the best record, `(sign-adjusted f, position)`.
    ///
    /// `None` for multi-objective bests.
    fn best_scalar(best: &Self::Best) -> Option<(f64, &[f64])>;

    /// Number of solutions in the best record.
    fn best_len(best: &Self::Best) -> usize;
}

// ============================================================================
// Single objective
// ============================================================================

/// A single-objective candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    /// Position.
    pub x: Vec<f64>,
    /// Sign-adjusted objective value (lower is better).
    pub f: f64,
}

impl Individual {
    pub fn new(x: Vec<f64>, f: f64) -> Self {
        Self { x, f }
    }

    /// Comparison key: NaN ranks as the worst possible value.
    #[inline]
    pub fn key(&self) -> f64 {
        if self.f.is_nan() {
            f64::INFINITY
        } else {
            self.f
        }
    }

    /// Strictly better than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Individual) -> bool {
        self.key() < other.key()
    }

    /// Total order on keys, for sorting.
    pub fn cmp_fitness(&self, other: &Individual) -> Ordering {
        self.key().total_cmp(&other.key())
    }
}

/// Index of the best individual; ties go to the lowest index.
pub fn argmin(population: &[Individual]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.is_better_than(&population[best]) {
            best = i;
        }
    }
    best
}

/// Index of the worst individual; ties go to the lowest index.
pub fn argmax(population: &[Individual]) -> usize {
    let mut worst = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.key() > population[worst].key() {
            worst = i;
        }
    }
    worst
}

/// Spread `max f - min f` of the population's objective values.
pub fn fitness_spread(population: &[Individual]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population[argmax(population)].key() - population[argmin(population)].key()
}

impl Solution for Individual {
    type Value = f64;
    type Best = Individual;
    const HAS_SCALAR_BEST: bool = true;

    fn from_evaluation(x: Vec<f64>, value: f64, settings: &EvalSettings) -> Self {
        Self {
            x,
            f: settings.sign * value,
        }
    }

    fn constraint_calls(_value: &f64) -> (usize, usize) {
        (0, 0)
    }

    fn position(&self) -> &[f64] {
        &self.x
    }

    fn best_of(population: &[Self]) -> Individual {
        population[argmin(population)].clone()
    }

    fn refresh_best(best: &mut Individual, population: &[Self]) {
        if population.is_empty() {
            return;
        }
        let candidate = &population[argmin(population)];
        if candidate.is_better_than(best) {
            *best = candidate.clone();
        }
    }

    fn best_scalar(best: &Individual) -> Option<(f64, &[f64])> {
        Some((best.f, &best.x))
    }

    fn best_len(_best: &Individual) -> usize {
        1
    }
}

// ============================================================================
// Multi objective
// ============================================================================

/// A multi-objective (possibly constrained) candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoIndividual {
    /// Position.
    pub x: Vec<f64>,
    /// Sign-adjusted objective vector.
    pub f: Vec<f64>,
    /// Inequality constraint values (`g <= 0` is satisfied).
    pub g: Vec<f64>,
    /// Equality constraint values (`h = 0` is satisfied).
    pub h: Vec<f64>,
    /// Total constraint violation, see [`constraint_violation`].
    pub sum_violations: f64,
    /// `sum_violations == 0`.
    pub is_feasible: bool,
}

/// Total violation `Σ max(0, g_i - g_tol) + Σ_{|h_j| > h_tol} |h_j|`.
///
/// Zero exactly when every inequality holds within `g_tol` and every
/// equality holds within `h_tol`.
pub fn constraint_violation(g: &[f64], h: &[f64], g_tol: f64, h_tol: f64) -> f64 {
    let ineq: f64 = g.iter().map(|&v| (v - g_tol).max(0.0)).sum();
    let eq: f64 = h
        .iter()
        .map(|&v| if v.abs() > h_tol { v.abs() } else { 0.0 })
        .sum();
    ineq + eq
}

impl MoIndividual {
    pub fn new(x: Vec<f64>, f: Vec<f64>, g: Vec<f64>, h: Vec<f64>, settings: &EvalSettings) -> Self {
        let f: Vec<f64> = f.into_iter().map(|v| settings.sign * v).collect();
        let mut sum_violations = constraint_violation(&g, &h, settings.g_tol, settings.h_tol);
        if sum_violations.is_nan() {
            sum_violations = f64::INFINITY;
        }
        Self {
            x,
            f,
            g,
            h,
            is_feasible: sum_violations == 0.0,
            sum_violations,
        }
    }
}

impl Solution for MoIndividual {
    type Value = Fgh;
    type Best = Vec<MoIndividual>;
    const HAS_SCALAR_BEST: bool = false;

    fn from_evaluation(x: Vec<f64>, (f, g, h): Fgh, settings: &EvalSettings) -> Self {
        MoIndividual::new(x, f, g, h, settings)
    }

    fn constraint_calls((_, g, h): &Fgh) -> (usize, usize) {
        (usize::from(!g.is_empty()), usize::from(!h.is_empty()))
    }

    fn position(&self) -> &[f64] {
        &self.x
    }

    fn best_of(population: &[Self]) -> Vec<MoIndividual> {
        crate::pareto::non_dominated_set(population)
    }

    fn refresh_best(best: &mut Vec<MoIndividual>, population: &[Self]) {
        if !population.is_empty() {
            *best = crate::pareto::non_dominated_set(population);
        }
    }

    fn best_scalar(_best: &Vec<MoIndividual>) -> Option<(f64, &[f64])> {
        None
    }

    fn best_len(best: &Vec<MoIndividual>) -> usize {
        best.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ind(f: f64) -> Individual {
        Individual::new(vec![f], f)
    }

    #[test]
    fn test_sign_applied() {
        let settings = EvalSettings {
            sign: -1.0,
            ..EvalSettings::default()
        };
        let s = Individual::from_evaluation(vec![1.0], 4.0, &settings);
        assert_eq!(s.f, -4.0);
    }

    #[test]
    fn test_argmin_ties_lowest_index() {
        let pop = vec![ind(3.0), ind(1.0), ind(1.0), ind(2.0)];
        assert_eq!(argmin(&pop), 1);
        assert_eq!(argmax(&pop), 0);
        assert!((fitness_spread(&pop) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_nan_is_worst() {
        let pop = vec![ind(f64::NAN), ind(5.0)];
        assert_eq!(argmin(&pop), 1);
        assert!(!pop[0].is_better_than(&pop[1]));
    }

    #[test]
    fn test_refresh_best_only_improves() {
        let mut best = ind(1.0);
        Individual::refresh_best(&mut best, &[ind(2.0), ind(3.0)]);
        assert_eq!(best.f, 1.0);
        Individual::refresh_best(&mut best, &[ind(2.0), ind(0.5)]);
        assert_eq!(best.f, 0.5);
    }

    #[test]
    fn test_violation_and_feasibility() {
        let settings = EvalSettings::default();
        let ok = MoIndividual::new(vec![0.0], vec![1.0], vec![-0.5], vec![1e-7], &settings);
        assert!(ok.is_feasible);
        assert_eq!(ok.sum_violations, 0.0);

        let bad = MoIndividual::new(vec![0.0], vec![1.0], vec![0.25], vec![-0.5], &settings);
        assert!(!bad.is_feasible);
        assert!((bad.sum_violations - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_equality_tolerance_boundary() {
        // |h| == h_tol is still satisfied; just above is not.
        assert_eq!(constraint_violation(&[], &[1e-5], 0.0, 1e-5), 0.0);
        assert!(constraint_violation(&[], &[2e-5], 0.0, 1e-5) > 0.0);
    }

    #[test]
    fn test_constraint_calls() {
        let v: Fgh = (vec![1.0], vec![0.0], vec![]);
        assert_eq!(MoIndividual::constraint_calls(&v), (1, 0));
        assert_eq!(Individual::constraint_calls(&1.0), (0, 0));
    }
}
