//! Error types shared by every component of the crate.

use thiserror::Error;

/// Errors returned by the optimization core.
///
/// None of these are retried internally; callers decide whether to retry
/// with different inputs (e.g. a smaller base pool after [`PoolTooLarge`]).
///
/// [`PoolTooLarge`]: LottoError::PoolTooLarge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LottoError {
    #[error("insufficient data: {required} draws required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid draw #{sequence_id}: {reason}")]
    InvalidDraw { sequence_id: u64, reason: String },

    #[error("seeding exhausted: needed {needed} unused numbers, only {available} available")]
    SeedingExhausted { needed: usize, available: usize },

    #[error("base pool too large: {size} numbers ({candidates} candidate games), limit is {max_size} numbers / {max_candidates} games")]
    PoolTooLarge {
        size: usize,
        candidates: u64,
        max_size: usize,
        max_candidates: u64,
    },

    #[error("empty coverage: {covered} of {total} patterns covered and no candidate adds more")]
    EmptyCoverage { covered: usize, total: usize },

    #[error("external source failed: {reason}")]
    Source { reason: String },
}

impl LottoError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        LottoError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LottoError>;
