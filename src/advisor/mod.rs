//! Budget-driven game count recommendations.
//!
//! Maps a budget onto a fixed ladder of game counts (3, 5, 10, 15, 20),
//! keeps the affordable tiers and marks the one closest to 60% of the
//! affordable maximum as recommended. Computed fresh per request.

mod ladder;

pub use ladder::{recommend, Recommendation, LADDER, RECOMMENDED_BUDGET_SHARE_PERCENT};
