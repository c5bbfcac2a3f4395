//! Genetic Algorithm over permutations.
//!
//! A generational GA whose individuals are gene sequences scored by an
//! [`Objective`](crate::Objective). Each generation ranks or samples a
//! reproduction pool, recombines random parent pairs from it, and applies
//! swap mutation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, crossover)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # Submodules
//!
//! - [`operators`]: Crossover strategies, uniform repair, and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (order crossover)

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use operators::Crossover;
pub use runner::{GaResult, GaRunner};
pub use selection::{Selection, ROULETTE_EPSILON};
pub use types::Chromosome;
