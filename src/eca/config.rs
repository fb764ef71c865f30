//! ECA parameters.

use crate::core::strategy::{check_population, check_positive, check_probability};
use crate::error::{OptimizeError, Result};

/// Parameters of the Evolutionary Centers Algorithm.
///
/// # Examples
///
/// ```
/// use u_metaopt::eca::Eca;
///
/// let eca = Eca::default().with_k(5).with_eta_max(1.5).with_population_size(40);
/// assert!(eca.validate_for(3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eca {
    /// Upper bound of the random step factor `η ~ U(0, η_max)`.
    pub eta_max: f64,

    /// Neighbors used to build each center of mass.
    pub k: usize,

    /// Population size. `None` = `K·D` (at least `K + 1`).
    pub population_size: Option<usize>,

    /// Probability of the exploitation move.
    pub p_exploit: f64,

    /// Per-coordinate probability of copying the best neighbor.
    pub p_bin: f64,

    /// Converged once the population's objective spread drops below this.
    /// 0 disables the test.
    pub stagnation_tol: f64,
}

impl Default for Eca {
    fn default() -> Self {
        Self {
            eta_max: 2.0,
            k: 7,
            population_size: None,
            p_exploit: 0.95,
            p_bin: 0.02,
            stagnation_tol: 0.0,
        }
    }
}

impl Eca {
    pub fn with_eta_max(mut self, eta_max: f64) -> Self {
        self.eta_max = eta_max;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    pub fn with_p_exploit(mut self, p: f64) -> Self {
        self.p_exploit = p;
        self
    }

    pub fn with_p_bin(mut self, p: f64) -> Self {
        self.p_bin = p;
        self
    }

    pub fn with_stagnation_tol(mut self, tol: f64) -> Self {
        self.stagnation_tol = tol;
        self
    }

    /// Population size used for a `dim`-dimensional problem.
    pub fn resolved_population(&self, dim: usize) -> usize {
        self.population_size
            .unwrap_or_else(|| (self.k * dim).max(self.k + 1))
    }

    /// Validates the parameters for a `dim`-dimensional problem.
    pub fn validate_for(&self, dim: usize) -> Result<()> {
        if self.k == 0 {
            return Err(OptimizeError::conflict("K must be at least 1"));
        }
        check_positive("eta_max", self.eta_max)?;
        check_probability("p_exploit", self.p_exploit)?;
        check_probability("p_bin", self.p_bin)?;
        if !(self.stagnation_tol >= 0.0) {
            return Err(OptimizeError::conflict("stagnation_tol must be non-negative"));
        }
        check_population(self.resolved_population(dim), self.k + 1)
    }
}
