//! SA execution loop.

use super::config::SaConfig;
use crate::error::{Result, SearchError};
use crate::objective::Objective;
use crate::permutation::random_move;
use crate::random::{random_permutation, rng_from_seed};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Iterations between two cost-history samples.
pub const HISTORY_INTERVAL: usize = 100;

/// Below this exponent `exp` underflows to zero.
const MIN_EXPONENT: f64 = -708.0;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best permutation found.
    pub best: Vec<usize>,

    /// Cost of the best permutation.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost at the start, every [`HISTORY_INTERVAL`] iterations, and at
    /// the end.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance probability of a cost change `delta` at
/// `temperature`.
///
/// Non-worsening moves are always accepted. A worsening move is accepted
/// with probability `exp(-delta / temperature)`, which is taken as 0 when
/// the temperature is not positive or the exponent is not finite or would
/// underflow.
///
/// ```
/// use u_permsearch::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-3.0, 10.0), 1.0);
/// assert!((acceptance_probability(10.0, 10.0) - (-1.0f64).exp()).abs() < 1e-12);
/// assert_eq!(acceptance_probability(1.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        return 1.0;
    }
    if !(temperature > 0.0) {
        return 0.0;
    }
    let exponent = -delta / temperature;
    if !exponent.is_finite() || exponent < MIN_EXPONENT {
        return 0.0;
    }
    exponent.exp()
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if the configuration is invalid or the
    /// objective has dimension 0.
    pub fn run<O: Objective>(objective: &O, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(objective, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<O: Objective>(
        objective: &O,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;
        let n = objective.dimension();
        if n == 0 {
            return Err(SearchError::invalid("objective dimension must be at least 1"));
        }

        let mut rng = rng_from_seed(config.seed);

        info!(
            event = "solve_start",
            algorithm = "annealing",
            dimension = n,
            iterations = config.max_iterations,
            initial_temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
        );

        // Initialize
        let mut current = random_permutation(n, &mut rng);
        let mut current_cost = objective.evaluate(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let mut cost_history = Vec::with_capacity(config.max_iterations / HISTORY_INTERVAL + 2);
        cost_history.push(best_cost);

        // A single element has no swap to propose.
        let budget = if n < 2 { 0 } else { config.max_iterations };

        while total_iterations < budget {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let mv = random_move(n, &mut rng);
            let candidate = mv.apply(&current);
            let candidate_cost = objective.evaluate(&candidate);
            let delta = candidate_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random::<f64>() < acceptance_probability(delta, temperature)
            };

            if accept {
                current = candidate;
                current_cost = candidate_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best.clone_from(&current);
                    best_cost = current_cost;
                    debug!(event = "new_best", iteration = total_iterations + 1, cost = best_cost);
                }
            }

            // Cool down
            temperature *= config.cooling_rate;
            total_iterations += 1;

            // Record history
            if total_iterations % HISTORY_INTERVAL == 0 {
                cost_history.push(best_cost);
                trace!(
                    event = "sample",
                    iteration = total_iterations,
                    temperature = temperature,
                    current_cost = current_cost,
                    best_cost = best_cost,
                );
            }
        }

        // Final history entry
        if total_iterations % HISTORY_INTERVAL != 0 || total_iterations == 0 {
            cost_history.push(best_cost);
        }

        info!(
            event = "solve_end",
            algorithm = "annealing",
            iterations = total_iterations,
            best_cost = best_cost,
            final_temperature = temperature,
            accepted = accepted_moves,
            cancelled = cancelled,
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}
