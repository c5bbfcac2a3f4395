//! Error types for permutation search.

use thiserror::Error;

/// Errors raised by objectives, operators and search drivers.
///
/// Tabu search running out of admissible moves is **not** an error; it is
/// reported as [`TabuTermination::Exhausted`](crate::tabu::TabuTermination)
/// on a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Malformed problem data, a mismatched or non-permutation sequence,
    /// or an out-of-range configuration parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A crossover or algorithm name that does not match any known variant.
    #[error("unrecognized strategy `{name}` (expected one of: {expected})")]
    UnrecognizedStrategy {
        /// The name as supplied by the caller.
        name: String,
        /// Comma-separated list of accepted names.
        expected: &'static str,
    },
}

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidInput(msg.into())
    }
}

/// Result type alias for permutation search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
