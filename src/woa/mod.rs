//! Whale Optimization Algorithm (WOA).
//!
//! Whales either shrink an encircling ring around the best whale, search
//! around a randomly chosen whale, or follow a logarithmic spiral towards
//! the best. The control parameter `a` decreases linearly from 2 to 0 over
//! the budget, moving the pod from exploration to exploitation.
//!
//! # References
//!
//! - Mirjalili & Lewis (2016), "The Whale Optimization Algorithm",
//!   Advances in Engineering Software 95, 51-67

mod config;
mod runner;

pub use config::Woa;
