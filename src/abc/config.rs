//! ABC parameters.

use crate::core::strategy::check_population;
use crate::error::{OptimizeError, Result};

/// Parameters of the Artificial Bee Colony.
///
/// # Examples
///
/// ```
/// use u_metaopt::abc::Abc;
///
/// let abc = Abc::default().with_population_size(40).with_limit(20);
/// assert_eq!(abc.employed_bees(), 20);
/// assert!(abc.validate_for(2).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Abc {
    /// Number of food sources.
    pub population_size: usize,

    /// Employed bees per iteration. `None` = `(N + 1) / 2`.
    pub employed: Option<usize>,

    /// Onlooker bees per iteration. `None` = `(N + 1) / 2`.
    pub onlookers: Option<usize>,

    /// Failed trials after which a source is abandoned.
    pub limit: usize,
}

impl Default for Abc {
    fn default() -> Self {
        Self {
            population_size: 50,
            employed: None,
            onlookers: None,
            limit: 10,
        }
    }
}

impl Abc {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_employed(mut self, ne: usize) -> Self {
        self.employed = Some(ne);
        self
    }

    pub fn with_onlookers(mut self, no: usize) -> Self {
        self.onlookers = Some(no);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn employed_bees(&self) -> usize {
        self.employed.unwrap_or(self.population_size.div_ceil(2))
    }

    pub fn onlooker_bees(&self) -> usize {
        self.onlookers.unwrap_or(self.population_size.div_ceil(2))
    }

    /// Validates the parameters.
    pub fn validate_for(&self, _dim: usize) -> Result<()> {
        check_population(self.population_size, 2)?;
        if self.employed_bees() > self.population_size {
            return Err(OptimizeError::conflict(format!(
                "{} employed bees exceed {} food sources",
                self.employed_bees(),
                self.population_size
            )));
        }
        if self.employed_bees() + self.onlooker_bees() == 0 {
            return Err(OptimizeError::conflict("ABC needs at least one bee"));
        }
        Ok(())
    }
}
