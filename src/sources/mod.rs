//! Interfaces to the data the optimizer consumes but does not own.
//!
//! Draw history, strategy weights and lottery definitions live in external
//! systems. They are reached through three narrow traits so the core stays
//! free of I/O; [`Planner`] wires implementations of them to the three
//! optimization entry points.

mod planner;

pub use planner::Planner;

use crate::error::Result;
use crate::lottery::{Draw, LotteryConfig};

/// Supplies historical draws, most-recent-first.
pub trait DrawSource {
    /// # Errors
    ///
    /// Implementations report their own failures as
    /// [`LottoError::Source`](crate::LottoError::Source).
    fn fetch_draws(&self, lottery_id: &str) -> Result<Vec<Draw>>;
}

/// Supplies per-number strategy scores used to build a base pool.
pub trait StrategyWeights {
    fn top_numbers(&self, lottery_id: &str) -> Result<Vec<RankedNumber>>;
}

/// Resolves a lottery identifier to its configuration.
pub trait LotteryCatalog {
    fn lottery_config(&self, lottery_id: &str) -> Result<LotteryConfig>;
}

/// A number with its strategy score; higher is stronger.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedNumber {
    pub number: u32,
    pub score: f64,
}

impl RankedNumber {
    pub fn new(number: u32, score: f64) -> Self {
        Self { number, score }
    }
}

/// Picks the `size` strongest distinct numbers, returned ascending.
///
/// Ranking is by score descending, then number ascending. A number listed
/// more than once keeps its best score. Fewer than `size` distinct numbers
/// yields all of them.
///
/// ```
/// use u_lotto::sources::{base_pool_from_ranked, RankedNumber};
///
/// let ranked = [
///     RankedNumber::new(7, 0.4),
///     RankedNumber::new(3, 0.9),
///     RankedNumber::new(12, 0.4),
///     RankedNumber::new(1, 0.1),
/// ];
/// assert_eq!(base_pool_from_ranked(&ranked, 3), vec![3, 7, 12]);
/// ```
pub fn base_pool_from_ranked(ranked: &[RankedNumber], size: usize) -> Vec<u32> {
    let mut order: Vec<RankedNumber> = ranked.to_vec();
    order.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.number.cmp(&b.number))
    });

    let mut pool: Vec<u32> = Vec::with_capacity(size);
    for entry in order {
        if pool.len() == size {
            break;
        }
        if !pool.contains(&entry.number) {
            pool.push(entry.number);
        }
    }
    pool.sort_unstable();
    pool
}
