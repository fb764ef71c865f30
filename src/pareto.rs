//! Pareto dominance utilities.
//!
//! Domain-agnostic pieces shared by the multi-objective strategies:
//!
//! - [`dominance_cmp`]: Pareto comparison of two objective vectors
//! - [`constrained_dominance`]: feasibility-first comparison of two solutions
//! - [`non_dominated_sort`]: fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: crowding distance for diversity preservation
//! - [`non_dominated_set`]: first front of a population
//!
//! All objectives are **minimized**.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::core::MoIndividual;
use std::cmp::Ordering;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compares two objective vectors for Pareto dominance.
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constrained dominance.
///
/// A feasible solution beats any infeasible one; between infeasible
/// solutions the smaller total violation wins; between feasible solutions
/// Pareto dominance decides.
pub fn constrained_dominance(a: &MoIndividual, b: &MoIndividual) -> Dominance {
    match (a.is_feasible, b.is_feasible) {
        (true, true) => dominance_cmp(&a.f, &b.f),
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        (false, false) => match a.sum_violations.total_cmp(&b.sum_violations) {
            Ordering::Less => Dominance::Left,
            Ordering::Greater => Dominance::Right,
            Ordering::Equal => Dominance::Neither,
        },
    }
}

/// Fast non-dominated sorting over `n` items with a custom comparison.
///
/// `cmp(i, j)` reports whether item `i` dominates item `j` (`Left`), is
/// dominated by it (`Right`), or neither.
///
/// # Complexity
///
/// O(n²) comparisons.
pub fn non_dominated_sort_by<F>(n: usize, mut cmp: F) -> NondominatedSortResult
where
    F: FnMut(usize, usize) -> Dominance,
{
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match cmp(i, j) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = vec![front_0];
    let mut k = 0;
    while k < fronts.len() {
        let mut next_front = Vec::new();
        for &i in &fronts[k] {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = k + 1;
                    next_front.push(j);
                }
            }
        }
        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
        k += 1;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Fast non-dominated sorting of plain objective vectors.
///
/// # Example
///
/// ```
/// use u_metaopt::pareto::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    non_dominated_sort_by(objectives.len(), |i, j| {
        dominance_cmp(&objectives[i], &objectives[j])
    })
}

/// Non-dominated sorting of a population under [`constrained_dominance`].
pub fn sort_population(population: &[MoIndividual]) -> NondominatedSortResult {
    non_dominated_sort_by(population.len(), |i, j| {
        constrained_dominance(&population[i], &population[j])
    })
}

/// Crowding distance assignment for diversity preservation.
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
///
/// # Example
///
/// ```
/// use u_metaopt::pareto::crowding_distance;
///
/// let objectives = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
/// let distances = crowding_distance(&objectives);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Crowding distance of the members of one front of `population`.
pub fn front_crowding(population: &[MoIndividual], front: &[usize]) -> Vec<f64> {
    let objectives: Vec<Vec<f64>> = front.iter().map(|&i| population[i].f.clone()).collect();
    crowding_distance(&objectives)
}

/// First front of `population` under constrained dominance.
///
/// Duplicated objective vectors are kept once.
pub fn non_dominated_set(population: &[MoIndividual]) -> Vec<MoIndividual> {
    let sorted = sort_population(population);
    let mut out: Vec<MoIndividual> = Vec::new();
    if let Some(front) = sorted.fronts.first() {
        for &i in front {
            let candidate = &population[i];
            if !out.iter().any(|s| s.f == candidate.f && s.x == candidate.x) {
                out.push(candidate.clone());
            }
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EvalSettings;
    use proptest::prelude::*;

    fn mo(f: Vec<f64>, g: Vec<f64>) -> MoIndividual {
        MoIndividual::new(vec![0.0], f, g, vec![], &EvalSettings::default())
    }

    #[test]
    fn test_single_solution() {
        let result = non_dominated_sort(&[vec![1.0, 2.0]]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_empty() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_clear_dominance() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
    }

    #[test]
    fn test_identical_vectors_share_front() {
        let objs = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0]);
    }

    #[test]
    fn test_feasible_beats_infeasible() {
        // Infeasible point has better objectives but still loses.
        let feasible = mo(vec![5.0, 5.0], vec![-1.0]);
        let infeasible = mo(vec![0.0, 0.0], vec![1.0]);
        assert_eq!(constrained_dominance(&feasible, &infeasible), Dominance::Left);
        assert_eq!(constrained_dominance(&infeasible, &feasible), Dominance::Right);
    }

    #[test]
    fn test_lower_violation_wins() {
        let a = mo(vec![5.0, 5.0], vec![0.5]);
        let b = mo(vec![0.0, 0.0], vec![2.0]);
        assert_eq!(constrained_dominance(&a, &b), Dominance::Left);
        let c = mo(vec![1.0, 1.0], vec![0.5]);
        assert_eq!(constrained_dominance(&a, &c), Dominance::Neither);
    }

    #[test]
    fn test_non_dominated_set_constrained() {
        let pop = vec![
            mo(vec![0.0, 0.0], vec![1.0]),
            mo(vec![1.0, 3.0], vec![0.0]),
            mo(vec![3.0, 1.0], vec![0.0]),
            mo(vec![3.0, 3.0], vec![0.0]),
        ];
        let front = non_dominated_set(&pop);
        assert_eq!(front.len(), 2);
        assert!(front.iter().all(|s| s.is_feasible));
    }

    #[test]
    fn test_crowding_boundaries_infinite() {
        let objs = vec![
            vec![1.0, 4.0],
            vec![2.0, 3.0],
            vec![3.0, 2.0],
            vec![4.0, 1.0],
        ];
        let d = crowding_distance(&objs);
        assert!(d[0].is_infinite());
        assert!(d[3].is_infinite());
        assert!((d[1] - 4.0 / 3.0).abs() < 1e-12);
        assert!((d[2] - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_small_sets() {
        assert!(crowding_distance(&[vec![1.0], vec![2.0]])
            .iter()
            .all(|d| d.is_infinite()));
    }

    proptest! {
        #[test]
        fn prop_first_front_mutually_non_dominated(
            objs in proptest::collection::vec(proptest::collection::vec(-10.0f64..10.0, 2), 1..30)
        ) {
            let result = non_dominated_sort(&objs);
            let front = &result.fronts[0];
            for &i in front {
                for &j in front {
                    prop_assert_ne!(dominance_cmp(&objs[i], &objs[j]), Dominance::Left);
                }
            }
            // Every later-ranked point is dominated by some point of the previous front.
            for (i, &r) in result.ranks.iter().enumerate() {
                if r > 0 {
                    let dominated = result.fronts[r - 1]
                        .iter()
                        .any(|&j| dominance_cmp(&objs[j], &objs[i]) == Dominance::Left);
                    prop_assert!(dominated);
                }
            }
            prop_assert_eq!(result.fronts.iter().map(Vec::len).sum::<usize>(), objs.len());
        }
    }
}
