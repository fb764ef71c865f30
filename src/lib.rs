//! Bounded black-box global optimization.
//!
//! Minimizes (or maximizes) a function over a box `[lower, upper]^D` using
//! population-based metaheuristics. Every strategy plugs into the same
//! [`driver`] loop, which handles budgets, tolerances against a known
//! optimum, cancellation, convergence history and progress reporting.
//!
//! Single-objective strategies:
//!
//! - **ECA**: Evolutionary Centers Algorithm, the default used by
//!   [`minimize`](driver::minimize).
//! - **DE**: Differential Evolution with five mutation templates.
//! - **PSO**: Particle Swarm Optimization.
//! - **ABC**: Artificial Bee Colony.
//! - **CGSA**: Chaotic Gravitational Search Algorithm.
//! - **SA**: Simulated Annealing with pluggable cooling schedules.
//! - **WOA**: Whale Optimization Algorithm.
//!
//! Multi-objective and constrained strategies:
//!
//! - **MOEA/D-DE**: decomposition into Tchebycheff subproblems.
//! - **NSGA-II**: non-dominated sorting with crowding distance.
//!
//! # Example
//!
//! ```
//! use u_metaopt::core::{Bounds, Information, Options};
//! use u_metaopt::driver::optimize;
//! use u_metaopt::pso::Pso;
//!
//! let rastrigin = |x: &[f64]| {
//!     10.0 * x.len() as f64
//!         + x.iter()
//!             .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
//!             .sum::<f64>()
//! };
//! let bounds = Bounds::uniform(-5.12, 5.12, 2).unwrap();
//! let options = Options::default().with_f_calls_limit(4000).with_seed(1);
//!
//! let state = optimize(&rastrigin, &bounds, &Pso::default(), &options, &Information::default())
//!     .unwrap();
//! assert!(state.minimum() < 5.0);
//! println!("{state}");
//! ```

pub mod abc;
pub mod cgsa;
pub mod core;
pub mod de;
pub mod driver;
pub mod eca;
pub mod error;
pub mod moead;
pub mod nsga2;
pub mod operators;
pub mod pareto;
pub mod pso;
pub mod random;
pub mod sa;
pub mod woa;

pub use driver::{minimize, optimize, Optimizer};
pub use error::{OptimizeError, Result};
