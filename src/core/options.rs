//! Run-level settings shared by every strategy.

use crate::error::{OptimizeError, Result};

/// Optimization direction.
///
/// Stored internally as a sign multiplier: every objective value is
/// multiplied by [`SearchType::sign`] on evaluation, so strategies always
/// minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchType {
    #[default]
    Minimize,
    Maximize,
}

impl SearchType {
    /// `1.0` for minimization, `-1.0` for maximization.
    pub fn sign(self) -> f64 {
        match self {
            SearchType::Minimize => 1.0,
            SearchType::Maximize => -1.0,
        }
    }
}

/// Common settings for a run: tolerances, budgets, history and reporting.
///
/// A budget of `0` means "unbounded" for that criterion. When no stopping
/// criterion is set at all (both budgets zero, no known optimum in
/// [`Information`], no time limit) the driver falls back to the strategy's
/// default call budget.
///
/// # Examples
///
/// ```
/// use u_metaopt::core::Options;
///
/// let options = Options::default()
///     .with_f_calls_limit(1000)
///     .with_f_tol(1e-3)
///     .with_store_convergence(true)
///     .with_seed(42);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Tolerance on the distance to the known minimizer.
    pub x_tol: f64,

    /// Tolerance on `|f(best) - f_optimum|`.
    pub f_tol: f64,

    /// Inequality slack: `g(x) <= g_tol` counts as satisfied.
    pub g_tol: f64,

    /// Equality near-zero tolerance: `|h(x)| <= h_tol` counts as satisfied.
    pub h_tol: f64,

    /// Maximum number of objective evaluations. 0 = no limit.
    pub f_calls_limit: usize,

    /// Maximum number of iterations. 0 = no limit.
    pub iterations: usize,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked between iterations, so a run may exceed it by one iteration.
    pub time_limit_ms: Option<u64>,

    /// Keep a snapshot of the state after every iteration.
    pub store_convergence: bool,

    /// Emit a progress report after every iteration (via `log`).
    pub debug: bool,

    /// Minimize or maximize.
    pub search_type: SearchType,

    /// Evaluate independent candidates concurrently.
    ///
    /// Only effective with the `parallel` cargo feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            x_tol: 1e-8,
            f_tol: 1e-12,
            g_tol: 0.0,
            h_tol: 1e-5,
            f_calls_limit: 0,
            iterations: 0,
            time_limit_ms: None,
            store_convergence: false,
            debug: false,
            search_type: SearchType::Minimize,
            parallel: false,
            seed: None,
        }
    }
}

impl Options {
    pub fn with_x_tol(mut self, tol: f64) -> Self {
        self.x_tol = tol;
        self
    }

    pub fn with_f_tol(mut self, tol: f64) -> Self {
        self.f_tol = tol;
        self
    }

    pub fn with_g_tol(mut self, tol: f64) -> Self {
        self.g_tol = tol;
        self
    }

    pub fn with_h_tol(mut self, tol: f64) -> Self {
        self.h_tol = tol;
        self
    }

    pub fn with_f_calls_limit(mut self, n: usize) -> Self {
        self.f_calls_limit = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_store_convergence(mut self, store: bool) -> Self {
        self.store_convergence = store;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("x_tol", self.x_tol),
            ("f_tol", self.f_tol),
            ("g_tol", self.g_tol),
            ("h_tol", self.h_tol),
        ] {
            if !(value >= 0.0) {
                return Err(OptimizeError::conflict(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(OptimizeError::conflict("time_limit_ms must be positive"));
        }
        Ok(())
    }
}

/// Known optimum of the problem, used only for early stopping.
///
/// # Examples
///
/// ```
/// use u_metaopt::core::Information;
///
/// let info = Information::default().with_f_optimum(0.0);
/// assert_eq!(info.f_optimum, Some(0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Information {
    /// Known minimum (or maximum, when maximizing) value.
    pub f_optimum: Option<f64>,

    /// Known optimizer location.
    pub x_optimum: Option<Vec<f64>>,
}

impl Information {
    pub fn with_f_optimum(mut self, f: f64) -> Self {
        self.f_optimum = Some(f);
        self
    }

    pub fn with_x_optimum(mut self, x: Vec<f64>) -> Self {
        self.x_optimum = Some(x);
        self
    }

    /// Checks that `x_optimum`, when present, has `dim` coordinates.
    pub fn validate(&self, dim: usize) -> Result<()> {
        if let Some(x) = &self.x_optimum {
            if x.len() != dim {
                return Err(OptimizeError::conflict(format!(
                    "x_optimum has {} coordinates, bounds have {dim}",
                    x.len()
                )));
            }
        }
        Ok(())
    }

    /// Returns `true` when any known-optimum criterion is available.
    pub fn is_known(&self) -> bool {
        self.f_optimum.is_some() || self.x_optimum.is_some()
    }
}
