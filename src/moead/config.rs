//! MOEA/D-DE parameters.

use super::weights::{binomial_points, divisions_for};
use crate::core::strategy::{check_population, check_positive, check_probability};
use crate::error::{OptimizeError, Result};

/// Parameters of MOEA/D-DE.
///
/// The number of objectives must be given; the population is the largest
/// Das-Dennis lattice that fits in `population_size`.
///
/// # Examples
///
/// ```
/// use u_metaopt::moead::MoeadDe;
///
/// let moead = MoeadDe::new(3).with_population_size(100);
/// assert_eq!(moead.resolved_population(), 91);
/// assert!(moead.validate_for(6).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeadDe {
    /// Number of objectives returned by the objective function.
    pub n_objectives: usize,

    /// Upper bound on the number of subproblems.
    pub population_size: usize,

    /// Neighborhood size.
    pub t: usize,

    /// Probability of mating inside the neighborhood rather than the
    /// whole population.
    pub delta: f64,

    /// Maximum number of subproblems one child may take over.
    pub n_r: usize,

    /// DE scale factor.
    pub f: f64,

    /// DE crossover rate.
    pub cr: f64,

    /// Distribution index of polynomial mutation.
    pub eta_m: f64,

    /// Per-coordinate mutation probability. `None` means `1/D`.
    pub p_m: Option<f64>,
}

impl MoeadDe {
    /// Default parameters for `n_objectives` objectives.
    pub fn new(n_objectives: usize) -> Self {
        Self {
            n_objectives,
            population_size: 100,
            t: 20,
            delta: 0.9,
            n_r: 2,
            f: 0.5,
            cr: 1.0,
            eta_m: 20.0,
            p_m: None,
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_t(mut self, t: usize) -> Self {
        self.t = t;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_n_r(mut self, n_r: usize) -> Self {
        self.n_r = n_r;
        self
    }

    pub fn with_f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    pub fn with_cr(mut self, cr: f64) -> Self {
        self.cr = cr;
        self
    }

    pub fn with_eta_m(mut self, eta: f64) -> Self {
        self.eta_m = eta;
        self
    }

    pub fn with_p_m(mut self, p_m: f64) -> Self {
        self.p_m = Some(p_m);
        self
    }

    /// Number of subproblems actually used.
    pub fn resolved_population(&self) -> usize {
        match divisions_for(self.population_size, self.n_objectives) {
            0 => 0,
            h => binomial_points(h, self.n_objectives),
        }
    }

    pub(crate) fn mutation_rate(&self, dim: usize) -> f64 {
        self.p_m.unwrap_or(1.0 / dim.max(1) as f64)
    }

    pub fn validate_for(&self, _dim: usize) -> Result<()> {
        if self.n_objectives < 2 {
            return Err(OptimizeError::conflict(format!(
                "n_objectives must be at least 2, got {}",
                self.n_objectives
            )));
        }
        let minimum = self.n_objectives.max(3);
        if self.population_size < minimum {
            return Err(OptimizeError::InvalidPopulationSize {
                size: self.population_size,
                minimum,
            });
        }
        check_population(self.resolved_population(), minimum)?;
        if self.t < 3 {
            return Err(OptimizeError::conflict(format!(
                "neighborhood size t must be at least 3, got {}",
                self.t
            )));
        }
        if self.n_r == 0 {
            return Err(OptimizeError::conflict("n_r must be at least 1"));
        }
        check_probability("delta", self.delta)?;
        check_probability("cr", self.cr)?;
        check_positive("f", self.f)?;
        check_positive("eta_m", self.eta_m)?;
        if let Some(p_m) = self.p_m {
            check_probability("p_m", p_m)?;
        }
        Ok(())
    }
}
