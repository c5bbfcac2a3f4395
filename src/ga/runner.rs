//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → ranking → pool selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::operators::swap_mutation;
use super::selection::Selection;
use super::types::{best_index, Chromosome};
use crate::error::{Result, SearchError};
use crate::objective::Objective;
use crate::permutation::is_valid_permutation;
use crate::random::{distinct_pair, random_permutation, rng_from_seed};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Result of a GA run.
///
/// Contains the best chromosome found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best chromosome found during the entire run.
    ///
    /// With a crossover that does not preserve permutations this may hold
    /// repeated genes; check [`Chromosome::is_valid`].
    pub best: Chromosome,

    /// Best cost (same as `best.cost`).
    pub best_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-known cost after initialization and after each generation.
    pub cost_history: Vec<f64>,

    /// Offspring that were not permutations, over the whole run.
    pub invalid_offspring: usize,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```
/// use u_permsearch::ga::{GaConfig, GaRunner};
/// use u_permsearch::objective::FlowTime;
///
/// let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::run(&flow, &config).unwrap();
/// assert_eq!(result.best_cost, 10.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if the configuration is invalid or the
    /// objective has dimension 0.
    pub fn run<O: Objective>(objective: &O, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(objective, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best solution found so
    /// far.
    pub fn run_with_cancel<O: Objective>(
        objective: &O,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;
        let n = objective.dimension();
        if n == 0 {
            return Err(SearchError::invalid("objective dimension must be at least 1"));
        }

        let mut rng = rng_from_seed(config.seed);
        let size = config.population_size;
        let elite_count = config.selection.elite_count(size);
        let check_validity = !config.crossover.preserves_permutation();

        if check_validity {
            warn!(
                event = "non_preserving_crossover",
                crossover = %config.crossover,
                "offspring may not be permutations"
            );
        }
        info!(
            event = "solve_start",
            algorithm = "genetic",
            dimension = n,
            population = size,
            generations = config.max_generations,
            crossover = %config.crossover,
            selection = ?config.selection,
        );

        // 1. Initialize and evaluate population
        let initial: Vec<Vec<usize>> = (0..size).map(|_| random_permutation(n, &mut rng)).collect();
        let mut population = evaluate_offspring(objective, initial, config.parallel);

        // 2. Track best
        let mut best = fittest(&population)?.clone();
        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(best.cost);

        let mut generations = 0usize;
        let mut cancelled = false;
        let mut invalid_offspring = 0usize;

        // 3. Generational loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Rank ascending; the sort is stable so equal costs keep their order
            if matches!(config.selection, Selection::Elitist { .. }) {
                population.sort_by(|a, b| a.cost.total_cmp(&b.cost));
            }

            let pool = config.selection.reproduction_pool(&population, &mut rng);

            // Offspring are drawn sequentially so the RNG stream does not
            // depend on how they are evaluated.
            let offspring: Vec<Vec<usize>> = (elite_count..size)
                .map(|_| {
                    let (a, b) = distinct_pair(pool.len(), &mut rng);
                    let child = config.crossover.apply(
                        &population[pool[a]].genes,
                        &population[pool[b]].genes,
                        &mut rng,
                    );
                    swap_mutation(&child, config.mutation_rate, &mut rng)
                })
                .collect();

            if check_validity {
                invalid_offspring += offspring
                    .iter()
                    .filter(|genes| !is_valid_permutation(genes, n))
                    .count();
            }

            let mut next_gen: Vec<Chromosome> = population[..elite_count].to_vec();
            next_gen.extend(evaluate_offspring(objective, offspring, config.parallel));
            population = next_gen;

            // Update best
            let gen_best = fittest(&population)?;
            if gen_best.cost < best.cost {
                best = gen_best.clone();
                debug!(event = "new_best", generation = gen + 1, cost = best.cost);
            }

            cost_history.push(best.cost);
            generations = gen + 1;
            trace!(
                event = "generation",
                generation = generations,
                generation_best = gen_best.cost,
                best_cost = best.cost,
            );
        }

        info!(
            event = "solve_end",
            algorithm = "genetic",
            generations = generations,
            best_cost = best.cost,
            cancelled = cancelled,
            invalid_offspring = invalid_offspring,
        );

        Ok(GaResult {
            best_cost: best.cost,
            best,
            generations,
            cancelled,
            cost_history,
            invalid_offspring,
        })
    }
}

/// Evaluate a batch of gene sequences, preserving their order.
#[cfg(feature = "parallel")]
fn evaluate_offspring<O: Objective>(
    objective: &O,
    offspring: Vec<Vec<usize>>,
    parallel: bool,
) -> Vec<Chromosome> {
    if parallel {
        offspring
            .into_par_iter()
            .map(|genes| Chromosome::evaluated(objective, genes))
            .collect()
    } else {
        offspring
            .into_iter()
            .map(|genes| Chromosome::evaluated(objective, genes))
            .collect()
    }
}

/// Evaluate a batch of gene sequences, preserving their order.
#[cfg(not(feature = "parallel"))]
fn evaluate_offspring<O: Objective>(
    objective: &O,
    offspring: Vec<Vec<usize>>,
    _parallel: bool,
) -> Vec<Chromosome> {
    offspring
        .into_iter()
        .map(|genes| Chromosome::evaluated(objective, genes))
        .collect()
}

fn fittest(population: &[Chromosome]) -> Result<&Chromosome> {
    best_index(population)
        .map(|i| &population[i])
        .ok_or_else(|| SearchError::invalid("population must not be empty"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Crossover;
    use crate::objective::{FlowTime, TourLength};

    fn equilateral() -> TourLength {
        TourLength::from_integers(&[vec![0u8, 2, 2], vec![2, 0, 2], vec![2, 2, 0]]).unwrap()
    }

    fn ten_cities() -> TourLength {
        TourLength::from_integers(&[
            vec![0u8, 2, 2, 7, 15, 2, 5, 7, 6, 5],
            vec![2, 0, 10, 4, 7, 3, 7, 15, 8, 2],
            vec![2, 10, 0, 1, 4, 3, 3, 4, 2, 3],
            vec![7, 4, 1, 0, 2, 15, 7, 7, 5, 4],
            vec![7, 10, 4, 2, 0, 7, 3, 2, 2, 7],
            vec![2, 3, 3, 7, 7, 0, 1, 7, 2, 10],
            vec![5, 7, 3, 7, 3, 1, 0, 2, 1, 3],
            vec![7, 7, 4, 7, 2, 7, 2, 0, 1, 10],
            vec![6, 8, 2, 5, 2, 2, 1, 1, 0, 15],
            vec![5, 2, 3, 4, 7, 10, 3, 10, 15, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_equilateral_every_crossover_and_selection() {
        let tsp = equilateral();
        // Repeated genes skip edges, so only preserving crossovers are
        // guaranteed to report a full tour here.
        for crossover in Crossover::ALL.into_iter().filter(|c| c.preserves_permutation()) {
            for selection in [
                Selection::Elitist { elite_ratio: 0.1 },
                Selection::Roulette { pool_ratio: 0.3 },
            ] {
                let config = GaConfig::default()
                    .with_population_size(10)
                    .with_max_generations(50)
                    .with_selection(selection)
                    .with_crossover(crossover)
                    .with_seed(42);
                let result = GaRunner::run(&tsp, &config).unwrap();
                assert_eq!(result.best_cost, 6.0, "{crossover} / {selection:?}");
            }
        }
    }

    #[test]
    fn test_flow_time_shortest_processing_time() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        for selection in [
            Selection::Elitist { elite_ratio: 0.1 },
            Selection::Roulette { pool_ratio: 0.3 },
        ] {
            let config = GaConfig::default()
                .with_population_size(20)
                .with_max_generations(50)
                .with_selection(selection)
                .with_mutation_rate(0.2)
                .with_seed(7);
            let result = GaRunner::run(&flow, &config).unwrap();
            assert_eq!(result.best.genes, vec![1, 2, 0], "{selection:?}");
            assert_eq!(result.best_cost, 10.0);
        }
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let tsp = ten_cities();
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_generations(60)
            .with_seed(42);

        let result = GaRunner::run(&tsp, &config).unwrap();

        assert_eq!(result.generations, 60);
        assert_eq!(result.cost_history.len(), 61);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    }

    #[test]
    fn test_preserving_crossovers_return_permutations() {
        let tsp = ten_cities();
        for crossover in Crossover::ALL.into_iter().filter(|c| c.preserves_permutation()) {
            let config = GaConfig::default()
                .with_population_size(30)
                .with_max_generations(30)
                .with_crossover(crossover)
                .with_seed(3);
            let result = GaRunner::run(&tsp, &config).unwrap();
            assert_eq!(result.invalid_offspring, 0, "{crossover}");
            assert!(result.best.is_valid(), "{crossover}: {:?}", result.best.genes);
            assert_eq!(tsp.cost(&result.best.genes).unwrap(), result.best_cost);
        }
    }

    #[test]
    fn test_single_point_produces_invalid_offspring() {
        let tsp = ten_cities();
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(20)
            .with_crossover(Crossover::SinglePoint)
            .with_seed(42);

        let result = GaRunner::run(&tsp, &config).unwrap();

        assert!(result.invalid_offspring > 0);
        // the reported cost is still the raw cost of the reported genes
        assert_eq!(tsp.evaluate(&result.best.genes), result.best_cost);
    }

    #[test]
    fn test_same_seed_same_result() {
        let tsp = ten_cities();
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_crossover(Crossover::Uniform)
            .with_seed(99);

        let a = GaRunner::run(&tsp, &config).unwrap();
        let b = GaRunner::run(&tsp, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let tsp = ten_cities();
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(40)
            .with_seed(42);

        let seq = GaRunner::run(&tsp, &config.clone().with_parallel(false)).unwrap();
        let par = GaRunner::run(&tsp, &config.with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.cost_history, par.cost_history);
    }

    #[test]
    fn test_cancellation() {
        let tsp = ten_cities();
        let config = GaConfig::default().with_seed(42);

        // Set cancel flag before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&tsp, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.cost_history.len(), 1);
        assert!(result.best.is_valid());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let tsp = equilateral();
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(
            GaRunner::run(&tsp, &config),
            Err(SearchError::InvalidInput(_))
        ));

        let config = GaConfig::default().with_elite_ratio(0.0);
        assert!(GaRunner::run(&tsp, &config).is_err());
    }

    #[test]
    fn test_minimum_population() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        let config = GaConfig::default()
            .with_population_size(2)
            .with_max_generations(5)
            .with_seed(1);
        let result = GaRunner::run(&flow, &config).unwrap();
        assert_eq!(result.generations, 5);
        assert!(result.best.is_valid());
    }

    #[test]
    fn test_single_task() {
        let flow = FlowTime::new(vec![4.0]).unwrap();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(3)
            .with_seed(1);
        let result = GaRunner::run(&flow, &config).unwrap();
        assert_eq!(result.best.genes, vec![0]);
        assert_eq!(result.best_cost, 4.0);
    }
}
