//! Unified entry point over the three search drivers.
//!
//! [`Algorithm`] pairs a driver with its configuration; [`solve`] runs it
//! against any [`Objective`] and reduces the driver-specific result to a
//! [`Solution`]. Callers that need the full statistics use the runners in
//! [`ga`](crate::ga), [`tabu`](crate::tabu) and [`sa`](crate::sa) directly.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::ga::{GaConfig, GaRunner};
use crate::objective::Objective;
use crate::permutation::is_valid_permutation;
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuRunner};

const ALGORITHM_NAMES: &str = "genetic, tabu, annealing";

/// Which driver to run, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AlgorithmKind {
    /// Generational genetic algorithm ([`GaRunner`]).
    Genetic,
    /// Tabu search over the swap neighborhood ([`TabuRunner`]).
    Tabu,
    /// Simulated annealing with geometric cooling ([`SaRunner`]).
    Annealing,
}

impl AlgorithmKind {
    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Genetic => "genetic",
            AlgorithmKind::Tabu => "tabu",
            AlgorithmKind::Annealing => "annealing",
        }
    }

    /// The driver with its stock parameters.
    ///
    /// | driver    | parameters                                             |
    /// |-----------|--------------------------------------------------------|
    /// | genetic   | population 100, elite 0.1, mutation 0.1, 500 generations |
    /// | tabu      | 500 iterations, tenure 20                              |
    /// | annealing | T0 = 1000, cooling 0.995, 50 000 iterations            |
    pub fn default_algorithm(self) -> Algorithm {
        match self {
            AlgorithmKind::Genetic => Algorithm::Genetic(
                GaConfig::default()
                    .with_population_size(100)
                    .with_elite_ratio(0.1)
                    .with_mutation_rate(0.1)
                    .with_max_generations(500),
            ),
            AlgorithmKind::Tabu => Algorithm::Tabu(
                TabuConfig::default()
                    .with_max_iterations(500)
                    .with_tabu_tenure(20),
            ),
            AlgorithmKind::Annealing => Algorithm::Annealing(
                SaConfig::default()
                    .with_initial_temperature(1000.0)
                    .with_cooling_rate(0.995)
                    .with_max_iterations(50_000),
            ),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "genetic" | "ga" => Ok(AlgorithmKind::Genetic),
            "tabu" => Ok(AlgorithmKind::Tabu),
            "annealing" | "sa" => Ok(AlgorithmKind::Annealing),
            _ => Err(SearchError::UnrecognizedStrategy {
                name: s.to_string(),
                expected: ALGORITHM_NAMES,
            }),
        }
    }
}

/// A configured search driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "algorithm", content = "config", rename_all = "kebab-case")
)]
pub enum Algorithm {
    /// Genetic algorithm with its configuration.
    Genetic(GaConfig),
    /// Tabu search with its configuration.
    Tabu(TabuConfig),
    /// Simulated annealing with its configuration.
    Annealing(SaConfig),
}

impl Algorithm {
    /// The driver this configuration belongs to.
    ///
    /// ```
    /// use u_permsearch::solver::{Algorithm, AlgorithmKind};
    /// use u_permsearch::tabu::TabuConfig;
    ///
    /// let algorithm = Algorithm::from(TabuConfig::default());
    /// assert_eq!(algorithm.kind(), AlgorithmKind::Tabu);
    /// ```
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Genetic(_) => AlgorithmKind::Genetic,
            Algorithm::Tabu(_) => AlgorithmKind::Tabu,
            Algorithm::Annealing(_) => AlgorithmKind::Annealing,
        }
    }

    /// Validates the wrapped configuration.
    pub fn validate(&self) -> Result<()> {
        match self {
            Algorithm::Genetic(config) => config.validate(),
            Algorithm::Tabu(config) => config.validate(),
            Algorithm::Annealing(config) => config.validate(),
        }
    }
}

impl From<GaConfig> for Algorithm {
    fn from(config: GaConfig) -> Self {
        Algorithm::Genetic(config)
    }
}

impl From<TabuConfig> for Algorithm {
    fn from(config: TabuConfig) -> Self {
        Algorithm::Tabu(config)
    }
}

impl From<SaConfig> for Algorithm {
    fn from(config: SaConfig) -> Self {
        Algorithm::Annealing(config)
    }
}

/// Best ordering found by a driver, with its cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Best ordering found.
    pub order: Vec<usize>,
    /// Cost of `order` under the searched objective.
    pub cost: f64,
}

impl Solution {
    /// Whether `order` is a permutation of `0..order.len()`.
    ///
    /// Only the genetic driver with a non-preserving crossover can return
    /// an order that is not.
    pub fn is_valid(&self) -> bool {
        is_valid_permutation(&self.order, self.order.len())
    }
}

/// Runs `algorithm` against `objective`.
///
/// # Examples
///
/// ```
/// use u_permsearch::objective::TourLength;
/// use u_permsearch::solver::{solve, AlgorithmKind};
///
/// let tsp = TourLength::from_integers(&[vec![0u8, 2, 2], vec![2, 0, 2], vec![2, 2, 0]]).unwrap();
/// let solution = solve(&tsp, &AlgorithmKind::Tabu.default_algorithm()).unwrap();
/// assert_eq!(solution.cost, 6.0);
/// ```
///
/// # Errors
/// [`SearchError::InvalidInput`] if the configuration is invalid or the
/// objective has dimension 0.
pub fn solve<O: Objective>(objective: &O, algorithm: &Algorithm) -> Result<Solution> {
    solve_with_cancel(objective, algorithm, None)
}

/// Runs `algorithm` with an optional cancellation token.
///
/// A raised flag stops the driver before its next iteration or generation;
/// the best ordering found so far is returned.
pub fn solve_with_cancel<O: Objective>(
    objective: &O,
    algorithm: &Algorithm,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Solution> {
    let solution = match algorithm {
        Algorithm::Genetic(config) => {
            let result = GaRunner::run_with_cancel(objective, config, cancel)?;
            Solution {
                order: result.best.genes,
                cost: result.best_cost,
            }
        }
        Algorithm::Tabu(config) => {
            let result = TabuRunner::run_with_cancel(objective, config, cancel)?;
            Solution {
                order: result.best,
                cost: result.best_cost,
            }
        }
        Algorithm::Annealing(config) => {
            let result = SaRunner::run_with_cancel(objective, config, cancel)?;
            Solution {
                order: result.best,
                cost: result.best_cost,
            }
        }
    };
    Ok(solution)
}
