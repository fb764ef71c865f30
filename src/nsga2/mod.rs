//! Non-dominated Sorting Genetic Algorithm II (NSGA-II).
//!
//! Parents are chosen by binary tournament on (rank, crowding distance),
//! recombined with SBX and perturbed with polynomial mutation. Parents and
//! offspring are then merged, sorted into fronts under constrained dominance
//! and truncated back to `N`, filling whole fronts first and cutting the last
//! one by decreasing crowding distance.
//!
//! Constraint handling: any feasible solution beats any infeasible one;
//! between infeasible solutions, lower total violation wins.
//!
//! # References
//!
//! - Deb, Pratap, Agarwal & Meyarivan (2002), "A Fast and Elitist
//!   Multiobjective Genetic Algorithm: NSGA-II", IEEE TEC 6(2)
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous
//!   Search Space"

mod config;
mod runner;

pub use config::Nsga2;
pub use runner::{select_survivors, Ranking};
