//! MOEA/D with differential-evolution variation (MOEA/D-DE).
//!
//! The multi-objective problem is decomposed into scalar subproblems, one per
//! weight vector λ. Subproblem `i` scores a solution with the Tchebycheff
//! function `max_k λ_k·|f_k - z_k|` against the ideal point `z`, plus the
//! total constraint violation. Each iteration breeds one child per
//! subproblem from its neighborhood (the `t` closest weight vectors) and lets
//! it replace at most `n_r` neighbors it improves.
//!
//! # References
//!
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition", IEEE TEC 11(6)
//! - Li & Zhang (2009), "Multiobjective Optimization Problems With Complicated
//!   Pareto Sets, MOEA/D and NSGA-II", IEEE TEC 13(2)
//! - Das & Dennis (1998), "Normal-Boundary Intersection"

mod config;
mod runner;
mod weights;

pub use config::MoeadDe;
pub use runner::{tchebycheff, Decomposition};
pub use weights::{binomial_points, das_dennis, divisions_for, neighborhoods};
