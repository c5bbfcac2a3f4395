//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic over the pairwise-swap
//! neighborhood. The tabu list forbids the most recently applied moves,
//! which prevents cycling and lets the search walk out of local optima by
//! accepting the best non-tabu neighbor even when it is worse.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
pub use types::{TabuList, TabuTermination};
