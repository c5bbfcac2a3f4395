//! Permutation search engine.
//!
//! Finds low-cost orderings of `0..n` under a pluggable cost function,
//! using one of three search drivers:
//!
//! - **Genetic Algorithm (GA)**: Population-based evolutionary search with
//!   elitist or roulette selection, six crossover operators, and swap
//!   mutation.
//! - **Tabu Search (TS)**: Best-improvement walk over the full swap
//!   neighborhood with a FIFO tabu list of recent moves.
//! - **Simulated Annealing (SA)**: Random swap proposals with Metropolis
//!   acceptance and geometric cooling.
//!
//! Shipped objectives cover closed tours over a distance table (TSP) and
//! single-machine sequencing (total flow time, total weighted tardiness).
//! Any type implementing [`Objective`] can be searched.
//!
//! # Quick start
//!
//! ```
//! use u_permsearch::objective::FlowTime;
//! use u_permsearch::solver::{solve, AlgorithmKind};
//!
//! let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
//! let solution = solve(&flow, &AlgorithmKind::Tabu.default_algorithm()).unwrap();
//! assert_eq!(solution.order, vec![1, 2, 0]);
//! assert_eq!(solution.cost, 10.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate GA offspring with rayon
//! - `serde`: derive `Serialize`/`Deserialize` on configurations and data

pub mod error;
pub mod ga;
pub mod objective;
pub mod permutation;
pub mod random;
pub mod sa;
pub mod solver;
pub mod tabu;

pub use error::{Result, SearchError};
pub use objective::Objective;
pub use solver::{solve, solve_with_cancel, Algorithm, AlgorithmKind, Solution};
