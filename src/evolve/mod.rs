//! Evolutionary search for lottery games.
//!
//! Wires the historical statistics, [`PopulationSeeder`] and
//! [`FitnessEvaluator`] into the generic [`GaRunner`] loop:
//!
//! ```text
//! draws → HistoricalStats → { PopulationSeeder, FitnessEvaluator } → GaRunner → EvolutionResult
//! ```
//!
//! With fewer than two draws the statistics fall back to
//! [`HistoricalStats::neutral`]: the whole population is seeded at random
//! and every number and pair scores alike, so selection is driven by the
//! sum, balance and distribution factors.

mod chromosome;
mod fitness;
pub mod operators;
mod problem;
mod seeder;

pub use chromosome::Chromosome;
pub use fitness::{
    FitnessBreakdown, FitnessEvaluator, BALANCE_WEIGHT, DISTRIBUTION_WEIGHT, FREQUENCY_WEIGHT,
    IDEAL_GAP, PAIR_WEIGHT, RECENCY_WEIGHT, SUM_WEIGHT,
};
pub use problem::LotteryProblem;
pub use seeder::{PopulationSeeder, FREQUENCY_SHARE_PERCENT, RECENT_SHARE_PERCENT};

use crate::error::{LottoError, Result};
use crate::ga::{GaConfig, GaResult, GaRunner};
use crate::lottery::{Draw, LotteryConfig};
use crate::stats::HistoricalStats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Parameters of an evolution run.
pub type EvolutionParams = GaConfig;

/// Output of an evolution run.
pub type EvolutionResult = GaResult<Chromosome>;

/// Evolves games from `draws` (most-recent-first).
///
/// Randomness comes from a [`StdRng`] seeded with `params.seed`, or a random
/// seed when unset.
///
/// # Errors
///
/// - [`LottoError::InvalidConfig`] for an inconsistent `config` or `params`
/// - [`LottoError::InvalidDraw`] for a malformed draw
/// - [`LottoError::SeedingExhausted`] from the seeder
pub fn evolve(
    draws: &[Draw],
    config: &LotteryConfig,
    params: &EvolutionParams,
) -> Result<EvolutionResult> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };
    evolve_with_cancel(draws, config, params, &mut rng, None)
}

/// Like [`evolve`], drawing all randomness from `rng`.
pub fn evolve_with_rng<R: Rng>(
    draws: &[Draw],
    config: &LotteryConfig,
    params: &EvolutionParams,
    rng: &mut R,
) -> Result<EvolutionResult> {
    evolve_with_cancel(draws, config, params, rng, None)
}

/// Like [`evolve_with_rng`], stopping at the next generation boundary once
/// `cancel` is set.
pub fn evolve_with_cancel<R: Rng>(
    draws: &[Draw],
    config: &LotteryConfig,
    params: &EvolutionParams,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<EvolutionResult> {
    config.validate()?;
    params.validate()?;

    let stats = stats_or_neutral(draws, config)?;
    let problem = LotteryProblem::new(config, &stats);
    GaRunner::run_with_cancel(&problem, params, rng, cancel)
}

fn stats_or_neutral(draws: &[Draw], config: &LotteryConfig) -> Result<HistoricalStats> {
    match HistoricalStats::extract(draws, config) {
        Err(LottoError::InsufficientData { required, actual }) => {
            tracing::warn!(
                required,
                actual,
                "not enough draws for statistics, using neutral snapshot"
            );
            Ok(HistoricalStats::neutral(config))
        }
        other => other,
    }
}
