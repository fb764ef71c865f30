//! PSO parameters.

use crate::core::strategy::{check_population, check_positive};
use crate::error::{OptimizeError, Result};

/// Parameters of Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use u_metaopt::pso::Pso;
///
/// let pso = Pso::default().with_omega(0.5).with_c1(1.5).with_c2(1.5);
/// assert!(pso.validate_for(2).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pso {
    /// Swarm size. `None` = `10·D`.
    pub population_size: Option<usize>,

    /// Cognitive learning rate (pull towards the personal best).
    pub c1: f64,

    /// Social learning rate (pull towards the global best).
    pub c2: f64,

    /// Inertia weight.
    pub omega: f64,
}

impl Default for Pso {
    fn default() -> Self {
        Self {
            population_size: None,
            c1: 2.0,
            c2: 2.0,
            omega: 0.8,
        }
    }
}

impl Pso {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    pub fn with_c1(mut self, c1: f64) -> Self {
        self.c1 = c1;
        self
    }

    pub fn with_c2(mut self, c2: f64) -> Self {
        self.c2 = c2;
        self
    }

    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Swarm size used for a `dim`-dimensional problem.
    pub fn resolved_population(&self, dim: usize) -> usize {
        self.population_size.unwrap_or_else(|| (10 * dim).max(2))
    }

    /// Validates the parameters for a `dim`-dimensional problem.
    pub fn validate_for(&self, dim: usize) -> Result<()> {
        for (name, v) in [("C1", self.c1), ("C2", self.c2), ("omega", self.omega)] {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(OptimizeError::conflict(format!(
                    "{name} must be non-negative, got {v}"
                )));
            }
        }
        check_positive("C1 + C2", self.c1 + self.c2)?;
        check_population(self.resolved_population(dim), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pso = Pso::default();
        assert_eq!(pso.resolved_population(4), 40);
        assert_eq!((pso.c1, pso.c2, pso.omega), (2.0, 2.0, 0.8));
    }

    #[test]
    fn test_validate() {
        assert!(Pso::default().with_omega(-0.1).validate_for(2).is_err());
        assert!(Pso::default().with_c1(0.0).with_c2(0.0).validate_for(2).is_err());
        assert!(Pso::default().with_population_size(0).validate_for(2).is_err());
    }
}
