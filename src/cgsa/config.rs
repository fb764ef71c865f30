//! CGSA parameters.

use super::chaos::ChaosMap;
use crate::core::strategy::{check_population, check_positive};
use crate::error::{OptimizeError, Result};

/// Parameters of the Chaotic Gravitational Search Algorithm.
///
/// # Examples
///
/// ```
/// use u_metaopt::cgsa::Cgsa;
///
/// let cgsa = Cgsa::default().with_chaos_index(5).with_population_size(40);
/// assert!(cgsa.validate_for(3).is_ok());
/// assert!(Cgsa::default().with_chaos_index(11).validate_for(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cgsa {
    /// Number of agents.
    pub population_size: usize,

    /// Initial weight of the chaotic term.
    pub ch_value_initial: f64,

    /// Final weight of the chaotic term.
    pub w_min: f64,

    /// Chaotic map, `1..=10` (see [`ChaosMap`]).
    pub chaos_index: usize,

    /// Restrict attraction to the `kbest` heaviest agents.
    pub elitist_check: bool,

    /// Exponent applied to the distance in the force term.
    pub r_power: f64,

    /// Order of the norm used for distances.
    pub r_norm: f64,

    /// Initial gravitational constant.
    pub g0: f64,

    /// Decay rate of the gravitational constant.
    pub alpha: f64,
}

impl Default for Cgsa {
    fn default() -> Self {
        Self {
            population_size: 30,
            ch_value_initial: 20.0,
            w_min: 1e-10,
            chaos_index: 9,
            elitist_check: true,
            r_power: 1.0,
            r_norm: 2.0,
            g0: 100.0,
            alpha: 20.0,
        }
    }
}

impl Cgsa {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_ch_value_initial(mut self, v: f64) -> Self {
        self.ch_value_initial = v;
        self
    }

    pub fn with_w_min(mut self, v: f64) -> Self {
        self.w_min = v;
        self
    }

    pub fn with_chaos_index(mut self, index: usize) -> Self {
        self.chaos_index = index;
        self
    }

    pub fn with_elitist_check(mut self, on: bool) -> Self {
        self.elitist_check = on;
        self
    }

    pub fn with_r_power(mut self, p: f64) -> Self {
        self.r_power = p;
        self
    }

    pub fn with_r_norm(mut self, p: f64) -> Self {
        self.r_norm = p;
        self
    }

    pub fn with_g0(mut self, g0: f64) -> Self {
        self.g0 = g0;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// The configured chaotic map.
    pub fn chaos_map(&self) -> Result<ChaosMap> {
        ChaosMap::from_index(self.chaos_index).ok_or_else(|| {
            OptimizeError::conflict(format!(
                "chaos_index must be in 1..=10, got {}",
                self.chaos_index
            ))
        })
    }

    /// Validates the parameters.
    pub fn validate_for(&self, _dim: usize) -> Result<()> {
        self.chaos_map()?;
        check_positive("g0", self.g0)?;
        check_positive("r_norm", self.r_norm)?;
        if !(self.alpha >= 0.0 && self.r_power >= 0.0) {
            return Err(OptimizeError::conflict("alpha and r_power must be non-negative"));
        }
        if !(self.w_min >= 0.0 && self.ch_value_initial >= self.w_min) {
            return Err(OptimizeError::conflict(
                "chaotic weights need 0 <= w_min <= ch_value_initial",
            ));
        }
        check_population(self.population_size, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cgsa = Cgsa::default();
        assert_eq!(cgsa.population_size, 30);
        assert_eq!(cgsa.chaos_map().unwrap(), ChaosMap::Sinusoidal);
        assert!(cgsa.validate_for(2).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(Cgsa::default().with_chaos_index(0).validate_for(2).is_err());
        assert!(Cgsa::default().with_g0(0.0).validate_for(2).is_err());
        assert!(Cgsa::default().with_w_min(50.0).validate_for(2).is_err());
        assert!(Cgsa::default().with_population_size(1).validate_for(2).is_err());
    }
}
