//! Particle Swarm Optimization (PSO).
//!
//! Each particle keeps a velocity and its personal best. Velocities are
//! pulled towards the personal and global bests with per-coordinate random
//! weights, positions move by their velocity and are clipped to the box.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;

pub use config::Pso;
pub use runner::Swarm;
