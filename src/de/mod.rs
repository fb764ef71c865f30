//! Differential Evolution (DE).
//!
//! Trial vectors are built from scaled differences of population members
//! ([`Mutation`]) and binomial crossover with the target; a trial replaces
//! its target when it is no worse.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution: A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces"

mod config;
mod runner;

pub use config::{De, Mutation};
