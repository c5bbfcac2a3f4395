//! Objective functions over permutations.
//!
//! An [`Objective`] owns its problem data and maps an ordering of
//! `0..dimension()` to a scalar cost. Lower is better.
//!
//! # Shipped objectives
//!
//! - [`TourLength`]: closed-tour distance over a square distance table (TSP)
//! - [`FlowTime`]: sum of completion times on a single machine
//! - [`WeightedTardiness`]: total weighted tardiness on a single machine

mod sequencing;
mod tour;

pub use sequencing::{FlowTime, ScheduledTask, Task, WeightedTardiness};
pub use tour::TourLength;

use crate::error::Result;
use crate::permutation::validate_permutation;

/// A cost function over permutations of a fixed size.
///
/// # Implementing
///
/// Only [`dimension`](Objective::dimension) and
/// [`evaluate`](Objective::evaluate) are required. `evaluate` may assume its
/// input has length `dimension()` and that every entry is in range, but must
/// not assume the entries are distinct: the genetic driver scores children
/// of non-preserving crossovers with it.
///
/// ```
/// use u_permsearch::objective::Objective;
///
/// struct Displacement(usize);
///
/// impl Objective for Displacement {
///     fn dimension(&self) -> usize { self.0 }
///     fn evaluate(&self, order: &[usize]) -> f64 {
///         order.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
///     }
/// }
///
/// let obj = Displacement(3);
/// assert_eq!(obj.cost(&[0, 2, 1]).unwrap(), 2.0);
/// assert!(obj.cost(&[0, 0, 1]).is_err());
/// ```
pub trait Objective: Send + Sync {
    /// Length of the permutations this objective scores.
    fn dimension(&self) -> usize;

    /// Computes the raw cost of `order` without validation.
    fn evaluate(&self, order: &[usize]) -> f64;

    /// Validates `permutation` and returns its cost.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`](crate::SearchError::InvalidInput) if the
    /// length differs from [`dimension`](Objective::dimension) or the
    /// sequence is not a permutation.
    fn cost(&self, permutation: &[usize]) -> Result<f64> {
        validate_permutation(permutation, self.dimension())?;
        Ok(self.evaluate(permutation))
    }
}

impl<O: Objective + ?Sized> Objective for &O {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn evaluate(&self, order: &[usize]) -> f64 {
        (**self).evaluate(order)
    }
}

/// Rejects negative, NaN and infinite problem data.
pub(crate) fn check_non_negative(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(crate::SearchError::invalid(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}
