//! Covering-design configuration.

use crate::error::{LottoError, Result};

/// Largest base pool accepted by default.
pub const MAX_POOL_SIZE: usize = 18;

/// Largest candidate-game count accepted by default, `C(18, 6)`.
pub const MAX_CANDIDATES: u64 = 18_564;

/// "Match at least `guarantee` numbers whenever `if_hit` numbers of the
/// base pool are drawn."
///
/// A pattern is an `if_hit`-sized subset of the pool; a game covers it when
/// they share at least `guarantee` numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuaranteeSpec {
    /// Minimum overlap between a game and a pattern.
    pub guarantee: u32,

    /// Pattern size.
    pub if_hit: u32,
}

impl GuaranteeSpec {
    pub fn new(guarantee: u32, if_hit: u32) -> Self {
        Self { guarantee, if_hit }
    }
}

/// Resource bounds for the greedy covering search.
///
/// Enumeration is exponential in the pool size, so both bounds are checked
/// before any work starts.
///
/// ```
/// use u_lotto::closure::ClosureConfig;
///
/// let config = ClosureConfig::default().with_parallel(false);
/// assert_eq!(config.max_pool_size, 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureConfig {
    /// Largest accepted base pool (at most 32).
    pub max_pool_size: usize,

    /// Largest accepted number of candidate games.
    pub max_candidates: u64,

    /// Whether to score candidates in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            max_pool_size: MAX_POOL_SIZE,
            max_candidates: MAX_CANDIDATES,
            parallel: true,
        }
    }
}

impl ClosureConfig {
    /// Sets the pool size bound.
    pub fn with_max_pool_size(mut self, n: usize) -> Self {
        self.max_pool_size = n;
        self
    }

    /// Sets the candidate count bound.
    pub fn with_max_candidates(mut self, n: u64) -> Self {
        self.max_candidates = n;
        self
    }

    /// Enables or disables parallel candidate scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pool_size == 0 || self.max_pool_size > 32 {
            return Err(LottoError::invalid_config(
                "max_pool_size must lie in 1..=32",
            ));
        }
        if self.max_candidates == 0 {
            return Err(LottoError::invalid_config(
                "max_candidates must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClosureConfig::default();
        assert_eq!(config.max_pool_size, MAX_POOL_SIZE);
        assert_eq!(config.max_candidates, MAX_CANDIDATES);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pool_bound_limited_by_mask_width() {
        assert!(ClosureConfig::default().with_max_pool_size(33).validate().is_err());
        assert!(ClosureConfig::default().with_max_pool_size(32).validate().is_ok());
        assert!(ClosureConfig::default().with_max_pool_size(0).validate().is_err());
    }

    #[test]
    fn test_zero_candidates_rejected() {
        assert!(ClosureConfig::default().with_max_candidates(0).validate().is_err());
    }
}
