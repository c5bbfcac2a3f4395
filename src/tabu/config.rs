//! Tabu Search configuration.

use crate::error::{Result, SearchError};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_permsearch::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(20)
///     .with_seed(3);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_tenure, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many of the most recent moves stay forbidden.
    pub tabu_tenure: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tabu_tenure: 7,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if either count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SearchError::invalid("max_iterations must be at least 1"));
        }
        if self.tabu_tenure == 0 {
            return Err(SearchError::invalid("tabu_tenure must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.tabu_tenure, 7);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(TabuConfig::default().validate().is_ok());
        assert!(TabuConfig::default().with_max_iterations(0).validate().is_err());
        assert!(matches!(
            TabuConfig::default().with_tabu_tenure(0).validate(),
            Err(SearchError::InvalidInput(_))
        ));
    }
}
