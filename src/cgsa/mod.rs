//! Chaotic Gravitational Search Algorithm (CGSA).
//!
//! Agents attract each other with a force proportional to their masses
//! (derived from relative fitness) and inversely related to their distance.
//! Only the `kbest` heaviest agents pull, and `kbest` shrinks from the whole
//! population to 2% over the run. The gravitational constant decays
//! exponentially and is perturbed by a chaotic sequence ([`ChaosMap`]).
//!
//! # References
//!
//! - Rashedi, Nezamabadi-pour & Saryazdi (2009), "GSA: A Gravitational
//!   Search Algorithm"
//! - Mirjalili & Gandomi (2017), "Chaotic gravitational constants for the
//!   gravitational search algorithm"

mod chaos;
mod config;
mod runner;

pub use chaos::{ChaosMap, CHAOS_X0};
pub use config::Cgsa;
pub use runner::{masses, Field};
