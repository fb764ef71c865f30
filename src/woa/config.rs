//! WOA parameters.

use crate::core::strategy::{check_population, check_positive};
use crate::error::Result;

/// Parameters of the Whale Optimization Algorithm.
///
/// # Examples
///
/// ```
/// use u_metaopt::woa::Woa;
///
/// let woa = Woa::default().with_population_size(20).with_b(0.5);
/// assert!(woa.validate_for(4).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Woa {
    /// Number of whales.
    pub population_size: usize,

    /// Shape constant of the logarithmic spiral.
    pub b: f64,
}

impl Default for Woa {
    fn default() -> Self {
        Self {
            population_size: 30,
            b: 1.0,
        }
    }
}

impl Woa {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_b(mut self, b: f64) -> Self {
        self.b = b;
        self
    }

    pub fn validate_for(&self, _dim: usize) -> Result<()> {
        check_population(self.population_size, 2)?;
        check_positive("b", self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimizeError;

    #[test]
    fn test_defaults() {
        let woa = Woa::default();
        assert_eq!(woa.population_size, 30);
        assert_eq!(woa.b, 1.0);
    }

    #[test]
    fn test_rejects_lone_whale() {
        let err = Woa::default().with_population_size(1).validate_for(2).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidPopulationSize { size: 1, minimum: 2 }));
    }
}
