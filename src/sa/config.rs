//! SA configuration and cooling schedules.

use crate::core::strategy::check_positive;
use crate::error::{OptimizeError, Result};

/// Cooling schedule for temperature reduction, applied once per iteration.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.95 to 0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_steps`.
    ///
    /// `max_steps` comes from the run's iteration budget, or from the call
    /// budget divided by the chain length.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Parameters of Simulated Annealing.
///
/// # Examples
///
/// ```
/// use u_metaopt::sa::{CoolingSchedule, Sa};
///
/// let sa = Sa::default()
///     .with_x_initial(vec![1.0, 1.0])
///     .with_n_candidates(100)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 });
/// assert!(sa.validate_for(2).is_ok());
/// assert!(sa.validate_for(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sa {
    /// Starting point. `None` draws one uniformly inside the bounds.
    pub x_initial: Option<Vec<f64>>,

    /// Candidates drawn per iteration (length of the Metropolis chain).
    pub n_candidates: usize,

    /// Scale floor of the acceptance test: worsening moves are judged
    /// relative to `|f(x)| + tol_fun`.
    pub tol_fun: f64,

    /// Initial temperature.
    pub initial_temperature: f64,

    /// Temperature floor; the run converges below it.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Perturbation size relative to the bound widths at `T = T_0`.
    pub step_scale: f64,
}

impl Default for Sa {
    fn default() -> Self {
        Self {
            x_initial: None,
            n_candidates: 500,
            tol_fun: 1e-4,
            initial_temperature: 1.0,
            min_temperature: 1e-10,
            cooling: CoolingSchedule::default(),
            step_scale: 0.1,
        }
    }
}

impl Sa {
    pub fn with_x_initial(mut self, x: Vec<f64>) -> Self {
        self.x_initial = Some(x);
        self
    }

    pub fn with_n_candidates(mut self, n: usize) -> Self {
        self.n_candidates = n;
        self
    }

    pub fn with_tol_fun(mut self, tol: f64) -> Self {
        self.tol_fun = tol;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_step_scale(mut self, scale: f64) -> Self {
        self.step_scale = scale;
        self
    }

    /// Validates the configuration for a `dim`-dimensional problem.
    pub fn validate_for(&self, dim: usize) -> Result<()> {
        if self.n_candidates == 0 {
            return Err(OptimizeError::conflict("n_candidates must be at least 1"));
        }
        check_positive("initial_temperature", self.initial_temperature)?;
        check_positive("min_temperature", self.min_temperature)?;
        check_positive("step_scale", self.step_scale)?;
        if self.min_temperature >= self.initial_temperature {
            return Err(OptimizeError::conflict(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if !(self.tol_fun >= 0.0) {
            return Err(OptimizeError::conflict("tol_fun must be non-negative"));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(OptimizeError::conflict(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(OptimizeError::conflict(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
            CoolingSchedule::Linear => {}
        }
        if let Some(x) = &self.x_initial {
            if x.len() != dim {
                return Err(OptimizeError::conflict(format!(
                    "x_initial has {} coordinates, bounds have {dim}",
                    x.len()
                )));
            }
        }
        Ok(())
    }
}
