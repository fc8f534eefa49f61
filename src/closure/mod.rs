//! Covering-design closures.
//!
//! A closure is a bounded set of games drawn from a base pool, chosen so
//! that as many `if_hit`-sized patterns of the pool as possible share at
//! least `guarantee` numbers with some game. Selection is a greedy
//! approximate set cover; see [`ClosureGenerator`].
//!
//! The enumeration is exponential in the pool size. Pools are capped at
//! [`MAX_POOL_SIZE`] numbers and [`MAX_CANDIDATES`] candidate games; larger
//! pools fail with [`LottoError::PoolTooLarge`](crate::LottoError::PoolTooLarge)
//! and must be pre-filtered by the caller.
//!
//! The [`guarantee_description`] attached to each result is a lookup on the
//! game count, not a combinatorially verified guarantee.

mod combinations;
mod config;
mod generator;
mod types;

pub use combinations::binomial;
pub use config::{ClosureConfig, GuaranteeSpec, MAX_CANDIDATES, MAX_POOL_SIZE};
pub use generator::ClosureGenerator;
pub use types::{guarantee_description, ClosureWarning, CoverageStats, GameSet};

use crate::error::Result;
use crate::lottery::LotteryConfig;

/// Builds a closure with the default [`ClosureConfig`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use u_lotto::closure::{generate_closure, GuaranteeSpec};
/// use u_lotto::lottery::LotteryConfig;
///
/// let lottery = LotteryConfig::new(6, 1, 60, Decimal::new(500, 2)).unwrap();
/// let pool: Vec<u32> = (1..=12).collect();
/// let set = generate_closure(&pool, GuaranteeSpec::new(4, 5), 5, &lottery).unwrap();
/// assert_eq!(set.coverage.total_games as usize, set.games.len());
/// ```
pub fn generate_closure(
    base_pool: &[u32],
    guarantee: GuaranteeSpec,
    max_games: u32,
    config: &LotteryConfig,
) -> Result<GameSet> {
    ClosureGenerator::default().generate(base_pool, guarantee, max_games, config)
}
