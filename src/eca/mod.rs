//! Evolutionary Centers Algorithm (ECA).
//!
//! Each individual looks at K neighbors, builds their mass-weighted center
//! (better objective = heavier) and steps towards it, away from the worst
//! neighbor. A small binomial recombination copies coordinates from the best
//! neighbor. Offspring replace their parent only when strictly better.
//!
//! # References
//!
//! - Mejía-de-Dios & Mezura-Montes (2019), "A New Evolutionary Optimization
//!   Method Based on Center of Mass"

mod config;
mod runner;

pub use config::Eca;
pub use runner::fitness_to_mass;
