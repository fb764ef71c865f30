//! Box-constrained search domain.

use crate::error::{OptimizeError, Result};
use crate::random::uniform;
use rand::Rng;

/// Lower/upper bounds of a `D`-dimensional search box.
///
/// Invariant: both vectors have the same non-zero length, every entry is
/// finite and `lower[i] <= upper[i]`.
///
/// Out-of-range coordinates are repaired by **clipping** to the nearest
/// bound (see [`Bounds::clamp`]); every strategy uses this rule.
///
/// # Examples
///
/// ```
/// use u_metaopt::core::Bounds;
///
/// // 2×D table: row 0 = lower bounds, row 1 = upper bounds.
/// let bounds = Bounds::from_rows(&[vec![-10.0, -10.0, -10.0], vec![10.0, 10.0, 10.0]]).unwrap();
/// assert_eq!(bounds.dim(), 3);
///
/// let mut x = vec![-12.0, 0.5, 99.0];
/// bounds.clamp(&mut x);
/// assert_eq!(x, vec![-10.0, 0.5, 10.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from separate lower and upper vectors.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        let bounds = Self { lower, upper };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Creates bounds from a 2×D table (row 0 lower, row 1 upper).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != 2 {
            return Err(OptimizeError::InvalidBounds(format!(
                "expected a 2×D table, got {} rows",
                rows.len()
            )));
        }
        Self::new(rows[0].clone(), rows[1].clone())
    }

    /// Creates bounds from `(lower, upper)` pairs, one per dimension.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let (lower, upper) = pairs.iter().copied().unzip();
        Self::new(lower, upper)
    }

    /// Same interval `[lo, hi]` in every one of `dim` dimensions.
    pub fn uniform(lo: f64, hi: f64, dim: usize) -> Result<Self> {
        Self::new(vec![lo; dim], vec![hi; dim])
    }

    /// Checks the shape and ordering invariants.
    pub fn validate(&self) -> Result<()> {
        if self.lower.is_empty() {
            return Err(OptimizeError::InvalidBounds("bounds are empty".into()));
        }
        if self.lower.len() != self.upper.len() {
            return Err(OptimizeError::InvalidBounds(format!(
                "lower has {} elements, upper has {}",
                self.lower.len(),
                self.upper.len()
            )));
        }
        for (i, (&lo, &hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(OptimizeError::InvalidBounds(format!(
                    "non-finite bound at index {i}: [{lo}, {hi}]"
                )));
            }
            if lo > hi {
                return Err(OptimizeError::InvalidBounds(format!(
                    "lower ({lo}) > upper ({hi}) at index {i}"
                )));
            }
        }
        Ok(())
    }

    /// Problem dimension `D`.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width `upper[i] - lower[i]` of every dimension.
    pub fn widths(&self) -> Vec<f64> {
        self.lower.iter().zip(&self.upper).map(|(lo, hi)| hi - lo).collect()
    }

    /// Clips every coordinate into `[lower, upper]`.
    ///
    /// A NaN coordinate is moved to the lower bound.
    pub fn clamp(&self, x: &mut [f64]) {
        for ((v, &lo), &hi) in x.iter_mut().zip(&self.lower).zip(&self.upper) {
            *v = if v.is_nan() { lo } else { v.clamp(lo, hi) };
        }
    }

    /// Returns `true` when every coordinate lies in `[lower, upper]`.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .zip(&self.lower)
                .zip(&self.upper)
                .all(|((&v, &lo), &hi)| lo <= v && v <= hi)
    }

    /// Uniform random point inside the box.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| uniform(rng, lo, hi))
            .collect()
    }

    /// `n` uniform random points inside the box.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Vec<f64>> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}
