//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate a random initial permutation
//! 2. At each iteration:
//!    a. Enumerate the full swap neighborhood
//!    b. Select the lowest-cost move that is not tabu
//!    c. Apply the move unconditionally, add it to the tabu list
//!    d. Update global best if improved
//! 3. Terminate after max iterations, when every move is tabu, or on
//!    cancellation
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, trace};

use super::config::TabuConfig;
use super::types::{TabuList, TabuTermination};
use crate::error::{Result, SearchError};
use crate::objective::Objective;
use crate::permutation::{neighbors, Move};
use crate::random::{random_permutation, rng_from_seed};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best permutation found.
    pub best: Vec<usize>,
    /// Cost of the best permutation.
    pub best_cost: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iterations completed when the best permutation was reached
    /// (0 means the initial permutation).
    pub best_iteration: usize,
    /// Why the run stopped.
    pub termination: TabuTermination,
    /// The move applied at each iteration.
    pub moves: Vec<Move>,
    /// Cost history (best cost after each iteration).
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given objective.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_permsearch::objective::FlowTime;
    /// use u_permsearch::tabu::{TabuConfig, TabuRunner, TabuTermination};
    ///
    /// let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
    /// let config = TabuConfig::default()
    ///     .with_max_iterations(10)
    ///     .with_tabu_tenure(1)
    ///     .with_seed(42);
    /// let result = TabuRunner::run(&flow, &config).unwrap();
    /// assert_eq!(result.best, vec![1, 2, 0]);
    /// assert_eq!(result.termination, TabuTermination::Completed);
    /// ```
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if the configuration is invalid or the
    /// objective has dimension 0.
    pub fn run<O: Objective>(objective: &O, config: &TabuConfig) -> Result<TabuResult> {
        Self::run_with_cancel(objective, config, None)
    }

    /// Executes Tabu Search with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; a raised flag ends the run
    /// with [`TabuTermination::Cancelled`] and the best permutation so far.
    pub fn run_with_cancel<O: Objective>(
        objective: &O,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        config.validate()?;
        let n = objective.dimension();
        if n == 0 {
            return Err(SearchError::invalid("objective dimension must be at least 1"));
        }

        let mut rng = rng_from_seed(config.seed);

        info!(
            event = "solve_start",
            algorithm = "tabu",
            dimension = n,
            iterations = config.max_iterations,
            tenure = config.tabu_tenure,
        );

        // Initialize
        let mut current = random_permutation(n, &mut rng);
        let mut best = current.clone();
        let mut best_cost = objective.evaluate(&current);
        let mut best_iteration = 0;

        let mut tabu = TabuList::new(config.tabu_tenure);
        let mut moves = Vec::with_capacity(config.max_iterations);
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut termination = TabuTermination::Completed;

        for iteration in 1..=config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = TabuTermination::Cancelled;
                    break;
                }
            }

            let Some((next, mv, cost)) = best_admissible(objective, &current, &tabu) else {
                debug!(event = "exhausted", iteration = iteration, tabu_len = tabu.len());
                termination = TabuTermination::Exhausted;
                break;
            };

            tabu.push(mv);
            moves.push(mv);
            current = next;

            if cost < best_cost {
                best.clone_from(&current);
                best_cost = cost;
                best_iteration = iteration;
                debug!(event = "new_best", iteration = iteration, cost = cost);
            }

            cost_history.push(best_cost);
            trace!(
                event = "step",
                iteration = iteration,
                mv = %mv,
                current_cost = cost,
                best_cost = best_cost,
            );
        }

        let iterations = moves.len();
        info!(
            event = "solve_end",
            algorithm = "tabu",
            iterations = iterations,
            best_cost = best_cost,
            termination = ?termination,
        );

        Ok(TabuResult {
            best,
            best_cost,
            iterations,
            best_iteration,
            termination,
            moves,
            cost_history,
        })
    }
}

/// Finds the lowest-cost neighbor of `current` reached by a non-tabu move.
///
/// Neighbors are scanned in lexicographic move order and only a strictly
/// lower cost replaces the incumbent, so the first minimum wins. Returns
/// `None` when every move is tabu.
fn best_admissible<O: Objective>(
    objective: &O,
    current: &[usize],
    tabu: &TabuList,
) -> Option<(Vec<usize>, Move, f64)> {
    let mut chosen: Option<(Vec<usize>, Move, f64)> = None;
    for (neighbor, mv) in neighbors(current) {
        if tabu.contains(&mv) {
            continue;
        }
        let cost = objective.evaluate(&neighbor);
        match chosen {
            Some((_, _, best)) if cost >= best => {}
            _ => chosen = Some((neighbor, mv, cost)),
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
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

    // ---- Neighborhood selection ----

    #[test]
    fn test_best_admissible_picks_cheapest() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        let tabu = TabuList::new(2);
        // [0,1,2] neighbors: swap(0,1)->[1,0,2]=11, swap(0,2)->[2,1,0]=11, swap(1,2)->[0,2,1]=14
        let (next, mv, cost) = best_admissible(&flow, &[0, 1, 2], &tabu).unwrap();
        assert_eq!(next, vec![1, 0, 2], "first minimum should win the tie");
        assert_eq!(mv, Move::new(0, 1));
        assert_eq!(cost, 11.0);
    }

    #[test]
    fn test_best_admissible_skips_tabu() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        let mut tabu = TabuList::new(2);
        tabu.push(Move::new(0, 1));
        let (next, mv, _) = best_admissible(&flow, &[0, 1, 2], &tabu).unwrap();
        assert_eq!(next, vec![2, 1, 0]);
        assert_eq!(mv, Move::new(0, 2));

        tabu.push(Move::new(0, 2));
        let (_, mv, cost) = best_admissible(&flow, &[0, 1, 2], &tabu).unwrap();
        assert_eq!(mv, Move::new(1, 2), "a worsening move is still taken");
        assert_eq!(cost, 14.0);
    }

    #[test]
    fn test_best_admissible_none_when_all_tabu() {
        let flow = FlowTime::new(vec![1.0, 2.0]).unwrap();
        let mut tabu = TabuList::new(1);
        tabu.push(Move::new(0, 1));
        assert!(best_admissible(&flow, &[0, 1], &tabu).is_none());
    }

    // ---- Full runs ----

    #[test]
    fn test_equilateral_cost() {
        let config = TabuConfig::default().with_max_iterations(50).with_tabu_tenure(1).with_seed(42);
        let result = TabuRunner::run(&equilateral(), &config).unwrap();
        assert_eq!(result.best_cost, 6.0);
    }

    #[test]
    fn test_flow_time_optimum_any_tenure() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        for tenure in 1..=3 {
            for seed in 0..10 {
                let config = TabuConfig::default()
                    .with_max_iterations(50)
                    .with_tabu_tenure(tenure)
                    .with_seed(seed);
                let result = TabuRunner::run(&flow, &config).unwrap();
                assert_eq!(result.best, vec![1, 2, 0], "tenure {tenure}, seed {seed}");
                assert_eq!(result.best_cost, 10.0);
                assert!(result.best_iteration <= 2);
            }
        }
    }

    #[test]
    fn test_exhausted_two_elements() {
        let flow = FlowTime::new(vec![1.0, 2.0]).unwrap();
        let config = TabuConfig::default().with_max_iterations(50).with_tabu_tenure(1).with_seed(1);
        let result = TabuRunner::run(&flow, &config).unwrap();
        assert_eq!(result.termination, TabuTermination::Exhausted);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best, vec![0, 1]);
        assert_eq!(result.best_cost, 4.0);
    }

    #[test]
    fn test_exhausted_when_tenure_covers_neighborhood() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        let config = TabuConfig::default().with_max_iterations(50).with_tabu_tenure(3).with_seed(9);
        let result = TabuRunner::run(&flow, &config).unwrap();
        assert_eq!(result.termination, TabuTermination::Exhausted);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.cost_history.len(), 3);
        assert!(result.best.len() == 3 && result.best_cost == 10.0);
    }

    #[test]
    fn test_tenure_one_keeps_progressing() {
        let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
        let config = TabuConfig::default().with_max_iterations(50).with_tabu_tenure(1).with_seed(4);
        let result = TabuRunner::run(&flow, &config).unwrap();
        assert_eq!(result.termination, TabuTermination::Completed);
        assert_eq!(result.iterations, 50);
        for pair in result.moves.windows(2) {
            assert_ne!(pair[0], pair[1], "the previous move is tabu");
        }
    }

    #[test]
    fn test_never_selects_recent_moves() {
        let tsp = ten_cities();
        let tenure = 7;
        let config = TabuConfig::default()
            .with_max_iterations(200)
            .with_tabu_tenure(tenure)
            .with_seed(42);
        let result = TabuRunner::run(&tsp, &config).unwrap();

        for (k, mv) in result.moves.iter().enumerate() {
            let window = &result.moves[k.saturating_sub(tenure)..k];
            assert!(!window.contains(mv), "iteration {}: {mv} was tabu", k + 1);
        }
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let tsp = ten_cities();
        let config = TabuConfig::default().with_max_iterations(200).with_tabu_tenure(20).with_seed(42);
        let result = TabuRunner::run(&tsp, &config).unwrap();

        assert_eq!(result.cost_history.len(), result.iterations);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(tsp.cost(&result.best).unwrap(), result.best_cost);
    }

    #[test]
    fn test_best_iteration_recorded() {
        let tsp = ten_cities();
        let config = TabuConfig::default().with_max_iterations(100).with_seed(42);
        let result = TabuRunner::run(&tsp, &config).unwrap();
        assert!(
            result.best_iteration <= result.iterations,
            "best_iteration {} should be <= total iterations {}",
            result.best_iteration,
            result.iterations
        );
        if result.best_iteration > 0 {
            assert_eq!(result.cost_history[result.best_iteration - 1], result.best_cost);
        }
    }

    #[test]
    fn test_single_element_exhausts_immediately() {
        let flow = FlowTime::new(vec![5.0]).unwrap();
        let result = TabuRunner::run(&flow, &TabuConfig::default().with_seed(0)).unwrap();
        assert_eq!(result.termination, TabuTermination::Exhausted);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, vec![0]);
    }

    #[test]
    fn test_cancellation() {
        let tsp = ten_cities();
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            TabuRunner::run_with_cancel(&tsp, &TabuConfig::default().with_seed(1), Some(cancel))
                .unwrap();
        assert_eq!(result.termination, TabuTermination::Cancelled);
        assert_eq!(result.iterations, 0);
        assert!(crate::permutation::is_valid_permutation(&result.best, 10));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TabuConfig::default().with_tabu_tenure(0);
        assert!(matches!(
            TabuRunner::run(&equilateral(), &config),
            Err(SearchError::InvalidInput(_))
        ));
    }
}
