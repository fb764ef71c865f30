//! DE parameters and mutation templates.

use crate::core::strategy::{check_population, check_positive, check_probability};
use crate::error::{OptimizeError, Result};

/// Mutation template used to build the donor vector.
///
/// `r0, r1, ...` are distinct random members, all different from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// `x_r0 + F·(x_r1 - x_r2)`
    #[default]
    Rand1,
    /// `x_r0 + F·(x_r1 - x_r2) + F·(x_r3 - x_r4)`
    Rand2,
    /// `best + F·(x_r0 - x_r1)`
    Best1,
    /// `best + F·(x_r0 - x_r1) + F·(x_r2 - x_r3)`
    Best2,
    /// `x_r0 + F·(best - x_r0) + F·(x_r1 - x_r2)`
    RandToBest1,
}

impl Mutation {
    /// Random members drawn per trial vector.
    pub fn vectors_needed(self) -> usize {
        match self {
            Mutation::Rand1 | Mutation::RandToBest1 => 3,
            Mutation::Rand2 => 5,
            Mutation::Best1 => 2,
            Mutation::Best2 => 4,
        }
    }
}

/// Parameters of Differential Evolution.
///
/// # Examples
///
/// ```
/// use u_metaopt::de::{De, Mutation};
///
/// let de = De::default()
///     .with_f(0.7)
///     .with_cr(0.5)
///     .with_mutation(Mutation::RandToBest1);
/// assert!(de.validate_for(4).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct De {
    /// Population size. `None` = `10·D`.
    pub population_size: Option<usize>,

    /// Differential weight.
    pub f: f64,

    /// Crossover rate.
    pub cr: f64,

    /// Mutation template.
    pub mutation: Mutation,

    /// Converged once the objective spread drops below this. 0 disables.
    pub stagnation_tol: f64,
}

impl Default for De {
    fn default() -> Self {
        Self {
            population_size: None,
            f: 1.0,
            cr: 0.9,
            mutation: Mutation::Rand1,
            stagnation_tol: 0.0,
        }
    }
}

impl De {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    pub fn with_f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    pub fn with_cr(mut self, cr: f64) -> Self {
        self.cr = cr;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_stagnation_tol(mut self, tol: f64) -> Self {
        self.stagnation_tol = tol;
        self
    }

    /// Population size used for a `dim`-dimensional problem.
    pub fn resolved_population(&self, dim: usize) -> usize {
        self.population_size
            .unwrap_or_else(|| (10 * dim).max(self.mutation.vectors_needed() + 1))
    }

    /// Validates the parameters for a `dim`-dimensional problem.
    pub fn validate_for(&self, dim: usize) -> Result<()> {
        check_positive("F", self.f)?;
        check_probability("CR", self.cr)?;
        if !(self.stagnation_tol >= 0.0) {
            return Err(OptimizeError::conflict("stagnation_tol must be non-negative"));
        }
        check_population(self.resolved_population(dim), self.mutation.vectors_needed() + 1)
    }
}
