//! Simulated Annealing (SA).
//!
//! A single-point trajectory method. Each iteration draws a chain of
//! Gaussian perturbations around the current point and accepts them with
//! the Metropolis criterion, so worsening moves are possible while the
//! temperature is high. The temperature follows a [`CoolingSchedule`] and
//! the run converges once it falls below `min_temperature`.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{CoolingSchedule, Sa};
pub use runner::{metropolis_probability, Annealing};
