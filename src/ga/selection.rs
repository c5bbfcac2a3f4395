//! Reproduction-pool selection for the genetic driver.
//!
//! Each generation the driver builds a reproduction pool, then draws parent
//! pairs uniformly from it. The two schemes differ in how the pool is built
//! and whether elites survive unchanged.
//!
//! # References
//!
//! - De Jong (1975), elitist strategies
//! - Goldberg (1989), fitness-proportionate (roulette wheel) selection

use rand::Rng;

use super::types::Chromosome;
use crate::error::{Result, SearchError};

/// Added to every cost before inversion so a zero cost has finite fitness.
pub const ROULETTE_EPSILON: f64 = 1e-6;

/// Parent selection scheme.
///
/// # Examples
///
/// ```
/// use u_permsearch::ga::Selection;
///
/// let elitist = Selection::Elitist { elite_ratio: 0.1 };
/// assert_eq!(elitist.elite_count(100), 10);
/// assert_eq!(elitist.pool_size(100), 95);
///
/// let roulette = Selection::Roulette { pool_ratio: 0.3 };
/// assert_eq!(roulette.elite_count(100), 0);
/// assert_eq!(roulette.pool_size(100), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum Selection {
    /// Rank the population by cost. The best `max(1, ⌊P·e⌋)` are copied
    /// unchanged into the next generation; the best
    /// `max(2, ⌊P·(1 − e/2)⌋)` form the reproduction pool.
    ///
    /// `elite_ratio` must lie in `(0, 1)`.
    Elitist {
        /// Elitism fraction `e`.
        elite_ratio: f64,
    },

    /// Fitness-proportionate selection with fitness `1 / (cost + ε)`.
    /// A pool of `max(2, ⌊P·s⌋)` individuals is drawn with replacement; no
    /// individual survives unchanged.
    ///
    /// `pool_ratio` must lie in `(0, 1]`.
    Roulette {
        /// Pool fraction `s`.
        pool_ratio: f64,
    },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Elitist { elite_ratio: 0.1 }
    }
}

impl Selection {
    /// Number of individuals carried forward unchanged.
    pub fn elite_count(&self, population_size: usize) -> usize {
        match *self {
            Selection::Elitist { elite_ratio } => {
                let n = ((population_size as f64 * elite_ratio) as usize).max(1);
                n.min(population_size)
            }
            Selection::Roulette { .. } => 0,
        }
    }

    /// Size of the reproduction pool.
    pub fn pool_size(&self, population_size: usize) -> usize {
        match *self {
            Selection::Elitist { elite_ratio } => {
                let n = (population_size as f64 * (1.0 - elite_ratio / 2.0)) as usize;
                n.max(2).min(population_size)
            }
            Selection::Roulette { pool_ratio } => {
                ((population_size as f64 * pool_ratio) as usize).max(2)
            }
        }
    }

    /// Checks the ratio bounds.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Selection::Elitist { elite_ratio } => {
                if !(elite_ratio > 0.0 && elite_ratio < 1.0) {
                    return Err(SearchError::invalid(format!(
                        "elite_ratio must be in (0, 1), got {elite_ratio}"
                    )));
                }
            }
            Selection::Roulette { pool_ratio } => {
                if !(pool_ratio > 0.0 && pool_ratio <= 1.0) {
                    return Err(SearchError::invalid(format!(
                        "pool_ratio must be in (0, 1], got {pool_ratio}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Builds the reproduction pool as indices into `population`.
    ///
    /// For [`Selection::Elitist`] the population must already be sorted by
    /// ascending cost; the pool is its prefix.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn reproduction_pool<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> Vec<usize> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        let size = self.pool_size(population.len());
        match self {
            Selection::Elitist { .. } => (0..size).collect(),
            Selection::Roulette { .. } => roulette(population, size, rng),
        }
    }
}

/// Draws `k` indices with replacement, proportionally to `1 / (cost + ε)`.
fn roulette<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> Vec<usize> {
    let weights: Vec<f64> = population
        .iter()
        .map(|c| 1.0 / (c.cost + ROULETTE_EPSILON))
        .collect();
    let total: f64 = weights.iter().sum();

    let n = population.len();
    if !(total.is_finite() && total > 0.0) {
        return (0..k).map(|_| rng.random_range(0..n)).collect();
    }

    (0..k)
        .map(|_| {
            let threshold = rng.random_range(0.0..total);
            let mut cumulative = 0.0;
            for (i, &w) in weights.iter().enumerate() {
                cumulative += w;
                if cumulative > threshold {
                    return i;
                }
            }
            n - 1 // floating-point fallback
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(costs: &[f64]) -> Vec<Chromosome> {
        costs
            .iter()
            .map(|&cost| Chromosome {
                genes: vec![0],
                cost,
            })
            .collect()
    }

    #[test]
    fn test_elitist_counts() {
        let sel = Selection::Elitist { elite_ratio: 0.1 };
        assert_eq!(sel.elite_count(100), 10);
        assert_eq!(sel.pool_size(100), 95);

        // floors, then the minimums kick in
        assert_eq!(sel.elite_count(5), 1);
        assert_eq!(sel.pool_size(5), 4);
        assert_eq!(sel.elite_count(2), 1);
        assert_eq!(sel.pool_size(2), 2);
    }

    #[test]
    fn test_roulette_counts() {
        let sel = Selection::Roulette { pool_ratio: 0.3 };
        assert_eq!(sel.elite_count(100), 0);
        assert_eq!(sel.pool_size(100), 30);
        assert_eq!(sel.pool_size(4), 2);
    }

    #[test]
    fn test_validate() {
        assert!(Selection::default().validate().is_ok());
        assert!(Selection::Elitist { elite_ratio: 0.0 }.validate().is_err());
        assert!(Selection::Elitist { elite_ratio: 1.0 }.validate().is_err());
        assert!(Selection::Elitist { elite_ratio: f64::NAN }.validate().is_err());
        assert!(Selection::Roulette { pool_ratio: 1.0 }.validate().is_ok());
        assert!(Selection::Roulette { pool_ratio: 0.0 }.validate().is_err());
        assert!(Selection::Roulette { pool_ratio: 1.5 }.validate().is_err());
    }

    #[test]
    fn test_elitist_pool_is_prefix() {
        let pop = make_population(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let sel = Selection::Elitist { elite_ratio: 0.2 };
        let mut rng = create_rng(42);
        assert_eq!(sel.reproduction_pool(&pop, &mut rng), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_roulette_favors_low_cost() {
        let pop = make_population(&[1.0, 100.0, 100.0, 100.0]);
        let sel = Selection::Roulette { pool_ratio: 1.0 };
        let mut rng = create_rng(42);

        let mut hits = [0usize; 4];
        for _ in 0..500 {
            for i in sel.reproduction_pool(&pop, &mut rng) {
                hits[i] += 1;
            }
        }
        // weights 1 : 0.01 : 0.01 : 0.01 -> index 0 dominates
        assert!(
            hits[0] > 10 * (hits[1] + hits[2] + hits[3]),
            "best individual should dominate: {hits:?}"
        );
    }

    #[test]
    fn test_roulette_zero_cost_is_finite() {
        let pop = make_population(&[0.0, 5.0]);
        let sel = Selection::Roulette { pool_ratio: 1.0 };
        let mut rng = create_rng(1);
        let pool = sel.reproduction_pool(&pop, &mut rng);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|&i| i < 2));
    }

    #[test]
    fn test_roulette_pool_has_replacement() {
        let pop = make_population(&[1.0, 1.0]);
        let sel = Selection::Roulette { pool_ratio: 1.0 };
        let mut rng = create_rng(3);
        let mut saw_repeat = false;
        for _ in 0..100 {
            let pool = sel.reproduction_pool(&pop, &mut rng);
            saw_repeat |= pool[0] == pool[1];
        }
        assert!(saw_repeat, "drawing with replacement should repeat at times");
    }
}
