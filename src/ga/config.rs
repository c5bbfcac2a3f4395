//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::operators::Crossover;
use super::selection::Selection;
use crate::error::{Result, SearchError};

/// Configuration for the genetic driver.
///
/// # Defaults
///
/// ```
/// use u_permsearch::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.selection, Selection::Elitist { elite_ratio: 0.1 });
/// assert_eq!(config.crossover, Crossover::Ordered);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_permsearch::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_roulette(0.3)
///     .with_crossover(Crossover::Uniform)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population. At least 2.
    pub population_size: usize,

    /// Number of generations to run. At least 1.
    pub max_generations: usize,

    /// Reproduction-pool scheme.
    pub selection: Selection,

    /// Recombination operator applied to every parent pair.
    pub crossover: Crossover,

    /// Probability that a child receives one swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate offspring in parallel.
    ///
    /// Only takes effect with the `parallel` feature. Offspring are always
    /// generated sequentially, so a fixed seed gives the same run either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation_rate: 0.1,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection scheme.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Shorthand for `with_selection(Selection::Elitist { elite_ratio })`.
    pub fn with_elite_ratio(self, elite_ratio: f64) -> Self {
        self.with_selection(Selection::Elitist { elite_ratio })
    }

    /// Shorthand for `with_selection(Selection::Roulette { pool_ratio })`.
    pub fn with_roulette(self, pool_ratio: f64) -> Self {
        self.with_selection(Selection::Roulette { pool_ratio })
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SearchError::invalid("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(SearchError::invalid("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::invalid(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        self.selection.validate()
    }
}
