//! Historical draw statistics.
//!
//! [`HistoricalStats`] is an immutable snapshot derived from a window of past
//! draws: per-number frequency, pair co-occurrence, average sum, average odd
//! count and the set of recently drawn numbers. It feeds both the population
//! seeder and the fitness evaluator.
//!
//! Snapshots are rebuilt on demand and never mutated in place. Ordered maps
//! keep iteration deterministic, which seeded evolution runs rely on.

mod extractor;

pub use extractor::{HistoricalStats, MIN_DRAWS, RECENT_WINDOW};
