//! Artificial Bee Colony (ABC).
//!
//! Food sources are refined by employed bees (neighbor search around each
//! source), onlooker bees (the same search on sources picked by rank) and
//! scouts (random restart of sources that stopped improving for more than
//! `limit` trials).
//!
//! # References
//!
//! - Karaboga & Basturk (2007), "A powerful and efficient algorithm for
//!   numerical function optimization: artificial bee colony (ABC) algorithm"

mod config;
mod runner;

pub use config::Abc;
pub use runner::Hive;
