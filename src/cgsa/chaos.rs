//! One-dimensional chaotic maps.
//!
//! Each map is iterated from `x0 = 0.7` once per iteration; its output is
//! normalized into `[0, 1]` before being used as a perturbation weight.
//!
//! # References
//!
//! - Mirjalili & Gandomi (2017), "Chaotic gravitational constants for the
//!   gravitational search algorithm", Applied Soft Computing 53, 407-419

use std::f64::consts::PI;

/// Starting point of every sequence.
pub const CHAOS_X0: f64 = 0.7;

/// Chaotic map, numbered `1..=10` in the order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChaosMap {
    Chebyshev,
    Circle,
    Gauss,
    Iterative,
    Logistic,
    Piecewise,
    Sine,
    Singer,
    Sinusoidal,
    Tent,
}

impl ChaosMap {
    /// Map for a 1-based index, `None` outside `1..=10`.
    pub fn from_index(index: usize) -> Option<Self> {
        use ChaosMap::*;
        const MAPS: [ChaosMap; 10] = [
            Chebyshev, Circle, Gauss, Iterative, Logistic, Piecewise, Sine, Singer, Sinusoidal, Tent,
        ];
        index.checked_sub(1).and_then(|i| MAPS.get(i).copied())
    }

    /// Next value of the sequence; `k` is the 1-based step number.
    pub fn next(self, x: f64, k: usize) -> f64 {
        match self {
            ChaosMap::Chebyshev => (k as f64 * x.clamp(-1.0, 1.0).acos()).cos(),
            ChaosMap::Circle => {
                let (a, b) = (0.5, 0.2);
                (x + b - (a / (2.0 * PI)) * (2.0 * PI * x).sin()).rem_euclid(1.0)
            }
            ChaosMap::Gauss => {
                if x == 0.0 {
                    0.0
                } else {
                    (1.0 / x).rem_euclid(1.0)
                }
            }
            ChaosMap::Iterative => {
                let x = if x == 0.0 { f64::EPSILON } else { x };
                (0.7 * PI / x).sin()
            }
            ChaosMap::Logistic => 4.0 * x * (1.0 - x),
            ChaosMap::Piecewise => {
                let p = 0.4;
                if x < p {
                    x / p
                } else if x < 0.5 {
                    (x - p) / (0.5 - p)
                } else if x < 1.0 - p {
                    (1.0 - p - x) / (0.5 - p)
                } else {
                    (1.0 - x) / p
                }
            }
            ChaosMap::Sine => (PI * x).sin(),
            ChaosMap::Singer => {
                1.07 * (7.86 * x - 23.31 * x.powi(2) + 28.75 * x.powi(3) - 13.302875 * x.powi(4))
            }
            ChaosMap::Sinusoidal => 2.3 * x * x * (PI * x).sin(),
            ChaosMap::Tent => {
                if x < 0.7 {
                    x / 0.7
                } else {
                    (10.0 / 3.0) * (1.0 - x)
                }
            }
        }
    }

    /// Rescales a sequence value into `[0, 1]`.
    pub fn normalize(self, x: f64) -> f64 {
        let v = match self {
            ChaosMap::Chebyshev | ChaosMap::Iterative => (x + 1.0) / 2.0,
            _ => x,
        };
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}
