//! Engine building blocks shared by every strategy.
//!
//! - [`Bounds`]: the box search domain
//! - [`Objective`], [`Fallible`], [`Problem`]: objectives and the counted
//!   evaluation context
//! - [`Options`], [`Information`], [`SearchType`]: run configuration
//! - [`Individual`], [`MoIndividual`], [`Solution`]: candidate solutions
//! - [`State`], [`Snapshot`]: run status and convergence history
//! - [`StopReason`], [`check_stop`]: stopping criteria
//! - [`Strategy`]: the capability implemented by every algorithm

pub mod bounds;
pub mod options;
pub mod problem;
pub mod solution;
pub mod state;
pub mod stop;
pub mod strategy;

pub use bounds::Bounds;
pub use options::{Information, Options, SearchType};
pub use problem::{Budget, Fallible, Objective, Problem};
pub use solution::{
    argmax, argmin, constraint_violation, fitness_spread, EvalSettings, Fgh, Individual,
    MoIndividual, Solution,
};
pub use state::{Snapshot, State, DEFAULT_HISTORY_CAP};
pub use stop::{check_stop, StopContext, StopReason};
pub use strategy::Strategy;
