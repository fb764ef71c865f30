//! Error types for the optimization engine.
//!
//! Every fatal condition is reported through [`OptimizeError`]. Reaching a
//! stopping criterion is not an error: it is normal termination and is
//! recorded as a [`StopReason`](crate::core::StopReason) on the returned state.

use thiserror::Error;

/// Boxed error carried from a failing objective function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort an optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Bounds are empty, of mismatched lengths, non-finite or inverted.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// The resolved population size is below what the strategy needs.
    #[error("invalid population size {size}: the strategy needs at least {minimum}")]
    InvalidPopulationSize {
        /// The resolved population size.
        size: usize,
        /// Smallest population the strategy can work with.
        minimum: usize,
    },

    /// The objective (or constraint) function returned an error.
    ///
    /// The run is aborted; no partial state is returned.
    #[error("objective evaluation failed after {f_calls} successful calls: {source}")]
    ObjectiveEvaluationFailed {
        /// Number of evaluations that had completed before the failure.
        f_calls: usize,
        /// The error raised by the objective.
        #[source]
        source: BoxError,
    },

    /// Out-of-range or mutually exclusive settings.
    #[error("configuration conflict: {0}")]
    ConfigurationConflict(String),
}

/// A specialized `Result` type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;

impl OptimizeError {
    /// Returns `true` for [`OptimizeError::InvalidBounds`].
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, OptimizeError::InvalidBounds(_))
    }

    /// Returns `true` for configuration-time errors.
    ///
    /// This includes `InvalidPopulationSize` and `ConfigurationConflict`.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            OptimizeError::InvalidPopulationSize { .. } | OptimizeError::ConfigurationConflict(_)
        )
    }

    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        OptimizeError::ConfigurationConflict(msg.into())
    }
}
