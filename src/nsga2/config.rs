//! NSGA-II parameters.

use crate::core::strategy::{check_population, check_positive, check_probability};
use crate::error::Result;

/// Parameters of NSGA-II.
///
/// # Examples
///
/// ```
/// use u_metaopt::nsga2::Nsga2;
///
/// let nsga2 = Nsga2::default().with_population_size(60).with_p_cr(0.8);
/// assert!(nsga2.validate_for(5).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2 {
    /// Population size.
    pub population_size: usize,

    /// Distribution index of SBX.
    pub eta_cr: f64,

    /// Probability of applying SBX to a pair of parents.
    pub p_cr: f64,

    /// Distribution index of polynomial mutation.
    pub eta_m: f64,

    /// Per-coordinate mutation probability. `None` means `1/D`.
    pub p_m: Option<f64>,
}

impl Default for Nsga2 {
    fn default() -> Self {
        Self {
            population_size: 100,
            eta_cr: 20.0,
            p_cr: 0.9,
            eta_m: 20.0,
            p_m: None,
        }
    }
}

impl Nsga2 {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_eta_cr(mut self, eta: f64) -> Self {
        self.eta_cr = eta;
        self
    }

    pub fn with_p_cr(mut self, p: f64) -> Self {
        self.p_cr = p;
        self
    }

    pub fn with_eta_m(mut self, eta: f64) -> Self {
        self.eta_m = eta;
        self
    }

    pub fn with_p_m(mut self, p: f64) -> Self {
        self.p_m = Some(p);
        self
    }

    pub(crate) fn mutation_rate(&self, dim: usize) -> f64 {
        self.p_m.unwrap_or(1.0 / dim.max(1) as f64)
    }

    pub fn validate_for(&self, _dim: usize) -> Result<()> {
        check_population(self.population_size, 2)?;
        check_positive("eta_cr", self.eta_cr)?;
        check_positive("eta_m", self.eta_m)?;
        check_probability("p_cr", self.p_cr)?;
        if let Some(p_m) = self.p_m {
            check_probability("p_m", p_m)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let n = Nsga2::default();
        assert_eq!(n.population_size, 100);
        assert_eq!(n.p_cr, 0.9);
        assert!((n.mutation_rate(10) - 0.1).abs() < 1e-15);
        assert_eq!(n.with_p_m(0.3).mutation_rate(10), 0.3);
    }

    #[test]
    fn test_validation() {
        assert!(Nsga2::default().with_population_size(1).validate_for(2).is_err());
        assert!(Nsga2::default().with_p_cr(1.2).validate_for(2).is_err());
        assert!(Nsga2::default().with_eta_m(0.0).validate_for(2).is_err());
    }
}
