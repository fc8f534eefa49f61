//! Greedy covering-design search.

use super::combinations::{binomial, combination_masks, mask_to_values};
use super::config::{ClosureConfig, GuaranteeSpec};
use super::types::{guarantee_description, ClosureWarning, CoverageStats, GameSet};
use crate::error::{LottoError, Result};
use crate::lottery::LotteryConfig;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Greedy approximate set cover over the games of a base pool.
///
/// # Algorithm
///
/// 1. Enumerate all `C(n, numbers_to_draw)` candidate games of the pool
/// 2. Enumerate all `C(n, if_hit)` patterns
/// 3. Up to `max_games` times, select the unchosen candidate covering the
///    most uncovered patterns (ties: first in enumeration order); stop early
///    on full coverage or when nothing improves
///
/// Each round costs O(candidates × patterns). No randomness is involved, so
/// identical inputs always yield identical closures.
///
/// # Usage
///
/// ```
/// use rust_decimal::Decimal;
/// use u_lotto::closure::{ClosureGenerator, ClosureConfig, GuaranteeSpec};
/// use u_lotto::lottery::LotteryConfig;
///
/// let lottery = LotteryConfig::new(6, 1, 60, Decimal::new(500, 2)).unwrap();
/// let pool: Vec<u32> = (1..=10).collect();
/// let set = ClosureGenerator::new(ClosureConfig::default())
///     .generate(&pool, GuaranteeSpec::new(4, 5), 10, &lottery)
///     .unwrap();
/// assert!(set.games.len() <= 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClosureGenerator {
    config: ClosureConfig,
}

impl ClosureGenerator {
    pub fn new(config: ClosureConfig) -> Self {
        Self { config }
    }

    /// Builds a closure of at most `max_games` games from `base_pool`.
    ///
    /// # Errors
    ///
    /// - [`LottoError::PoolTooLarge`] if the pool exceeds the configured bounds
    /// - [`LottoError::InvalidConfig`] for inconsistent guarantee parameters
    pub fn generate(
        &self,
        base_pool: &[u32],
        spec: GuaranteeSpec,
        max_games: u32,
        lottery: &LotteryConfig,
    ) -> Result<GameSet> {
        self.generate_with_cancel(base_pool, spec, max_games, lottery, None)
    }

    /// Like [`generate`](Self::generate), checking `cancel` once per greedy
    /// round. A cancelled run returns the games selected so far flagged with
    /// [`ClosureWarning::Cancelled`].
    pub fn generate_with_cancel(
        &self,
        base_pool: &[u32],
        spec: GuaranteeSpec,
        max_games: u32,
        lottery: &LotteryConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GameSet> {
        let pool = self.validate(base_pool, spec, lottery)?;
        let n = pool.len();
        let k = lottery.pick_count();
        let guarantee = spec.guarantee;

        let candidates = combination_masks(n, k);
        let patterns = combination_masks(n, spec.if_hit as usize);
        let total = patterns.len() as u64;

        let mut covered = vec![false; patterns.len()];
        let mut covered_count = 0u64;
        let mut chosen = vec![false; candidates.len()];
        let mut selected: Vec<u32> = Vec::new();
        let mut warning = None;

        tracing::debug!(
            pool = n,
            candidates = candidates.len(),
            patterns = patterns.len(),
            max_games,
            "closure search started"
        );

        for round in 0..max_games {
            if covered_count == total {
                break;
            }
            if cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                warning = Some(ClosureWarning::Cancelled { rounds: round });
                break;
            }

            let best = self.best_candidate(&candidates, &chosen, &patterns, &covered, guarantee);
            let Some((idx, gain)) = best.filter(|&(_, gain)| gain > 0) else {
                tracing::warn!(
                    covered = covered_count,
                    total,
                    "no candidate adds coverage, returning partial closure"
                );
                warning = Some(ClosureWarning::EmptyCoverage {
                    covered: covered_count,
                    total,
                });
                break;
            };

            let game = candidates[idx];
            chosen[idx] = true;
            for (flag, &pattern) in covered.iter_mut().zip(&patterns) {
                if !*flag && overlap(game, pattern) >= guarantee {
                    *flag = true;
                }
            }
            covered_count += gain as u64;
            selected.push(game);

            tracing::debug!(round, gain, covered = covered_count, total, "game selected");
        }

        let games: Vec<Vec<u32>> = selected.iter().map(|&m| mask_to_values(m, &pool)).collect();
        let coverage = coverage_stats(&games, n, covered_count, total);
        let total_cost = Decimal::from(games.len() as u64) * lottery.cost_per_game;

        tracing::info!(
            games = games.len(),
            covered = covered_count,
            total,
            "closure generated"
        );

        Ok(GameSet {
            games,
            coverage,
            total_cost,
            warning,
        })
    }

    /// Deduplicates and sorts the pool, then checks every precondition.
    fn validate(
        &self,
        base_pool: &[u32],
        spec: GuaranteeSpec,
        lottery: &LotteryConfig,
    ) -> Result<Vec<u32>> {
        self.config.validate()?;
        lottery.validate()?;

        let pool: Vec<u32> = base_pool
            .iter()
            .copied()
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect();
        let n = pool.len();
        let k = lottery.numbers_to_draw;

        if let Some(&bad) = pool.iter().find(|&&v| !lottery.contains(v)) {
            return Err(LottoError::invalid_config(format!(
                "base pool number {bad} outside {}..={}",
                lottery.min_number, lottery.max_number
            )));
        }

        let candidates = binomial(n as u64, k as u64);
        if n > self.config.max_pool_size || candidates > self.config.max_candidates {
            return Err(LottoError::PoolTooLarge {
                size: n,
                candidates,
                max_size: self.config.max_pool_size,
                max_candidates: self.config.max_candidates,
            });
        }

        if (k as usize) > n {
            return Err(LottoError::invalid_config(format!(
                "base pool of {n} numbers cannot fill a {k}-number game"
            )));
        }
        if spec.if_hit == 0 || spec.if_hit as usize > n {
            return Err(LottoError::invalid_config(format!(
                "if_hit ({}) must lie in 1..={n}",
                spec.if_hit
            )));
        }
        if spec.guarantee == 0 || spec.guarantee > spec.if_hit.min(k) {
            return Err(LottoError::invalid_config(format!(
                "guarantee ({}) must lie in 1..={}",
                spec.guarantee,
                spec.if_hit.min(k)
            )));
        }

        Ok(pool)
    }

    /// Index and gain of the best unchosen candidate, ties to the lowest
    /// index.
    fn best_candidate(
        &self,
        candidates: &[u32],
        chosen: &[bool],
        patterns: &[u32],
        covered: &[bool],
        guarantee: u32,
    ) -> Option<(usize, usize)> {
        if self.config.parallel && cfg!(feature = "parallel") {
            best_candidate_parallel(candidates, chosen, patterns, covered, guarantee)
        } else {
            best_candidate_sequential(candidates, chosen, patterns, covered, guarantee)
        }
    }
}

fn best_candidate_sequential(
    candidates: &[u32],
    chosen: &[bool],
    patterns: &[u32],
    covered: &[bool],
    guarantee: u32,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (i, &game) in candidates.iter().enumerate() {
        if chosen[i] {
            continue;
        }
        let g = gain(game, patterns, covered, guarantee);
        let better = match best {
            Some((_, best_gain)) => g > best_gain,
            None => true,
        };
        if better {
            best = Some((i, g));
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn best_candidate_parallel(
    candidates: &[u32],
    chosen: &[bool],
    patterns: &[u32],
    covered: &[bool],
    guarantee: u32,
) -> Option<(usize, usize)> {
    candidates
        .par_iter()
        .enumerate()
        .filter(|(i, _)| !chosen[*i])
        .map(|(i, &game)| (i, gain(game, patterns, covered, guarantee)))
        .reduce_with(|a, b| {
            if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
                b
            } else {
                a
            }
        })
}

#[cfg(not(feature = "parallel"))]
fn best_candidate_parallel(
    candidates: &[u32],
    chosen: &[bool],
    patterns: &[u32],
    covered: &[bool],
    guarantee: u32,
) -> Option<(usize, usize)> {
    best_candidate_sequential(candidates, chosen, patterns, covered, guarantee)
}

fn overlap(a: u32, b: u32) -> u32 {
    (a & b).count_ones()
}

/// Number of uncovered patterns `game` would cover.
fn gain(game: u32, patterns: &[u32], covered: &[bool], guarantee: u32) -> usize {
    patterns
        .iter()
        .zip(covered)
        .filter(|&(&p, &c)| !c && overlap(game, p) >= guarantee)
        .count()
}

fn coverage_stats(games: &[Vec<u32>], pool_size: usize, covered: u64, total: u64) -> CoverageStats {
    let mut numbers = BTreeSet::new();
    let mut pairs = BTreeSet::new();
    let mut trios = BTreeSet::new();

    for game in games {
        numbers.extend(game.iter().copied());
        for (i, &a) in game.iter().enumerate() {
            for (j, &b) in game.iter().enumerate().skip(i + 1) {
                pairs.insert((a, b));
                for &c in &game[j + 1..] {
                    trios.insert((a, b, c));
                }
            }
        }
    }

    let percent = |part: f64, whole: f64| if whole > 0.0 { part / whole * 100.0 } else { 0.0 };

    CoverageStats {
        total_games: games.len() as u32,
        number_coverage_percent: percent(numbers.len() as f64, pool_size as f64),
        unique_numbers_covered: numbers,
        pairs_covered: pairs.len() as u32,
        trios_covered: trios.len() as u32,
        covered_patterns: covered,
        total_patterns: total,
        pattern_coverage_percent: percent(covered as f64, total as f64),
        guarantee_description: guarantee_description(games.len()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lottery() -> LotteryConfig {
        LotteryConfig::new(6, 1, 60, dec!(5.00)).unwrap()
    }

    fn sequential() -> ClosureGenerator {
        ClosureGenerator::new(ClosureConfig::default().with_parallel(false))
    }

    /// Independent recount of covered patterns by value.
    fn recount(pool: &[u32], games: &[Vec<u32>], spec: GuaranteeSpec) -> u64 {
        combination_masks(pool.len(), spec.if_hit as usize)
            .into_iter()
            .map(|m| mask_to_values(m, pool))
            .filter(|pattern| {
                games.iter().any(|g| {
                    pattern.iter().filter(|v| g.contains(v)).count() as u32 >= spec.guarantee
                })
            })
            .count() as u64
    }

    #[test]
    fn test_coverage_correctness_pool_of_ten() {
        let pool: Vec<u32> = (1..=10).collect();
        let spec = GuaranteeSpec::new(4, 5);
        let set = sequential().generate(&pool, spec, 10, &lottery()).unwrap();

        assert!(!set.games.is_empty() && set.games.len() <= 10);
        for game in &set.games {
            assert_eq!(game.len(), 6);
            assert!(game.windows(2).all(|w| w[0] < w[1]));
            assert!(game.iter().all(|v| pool.contains(v)));
        }
        assert_eq!(set.coverage.covered_patterns, recount(&pool, &set.games, spec));
        assert_eq!(set.coverage.total_patterns, 252);
    }

    #[test]
    fn test_pool_of_twelve_with_budget_five() {
        let pool: Vec<u32> = (1..=12).collect();
        let set = sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 5, &lottery())
            .unwrap();

        assert!(set.games.len() == 5 || set.coverage.pattern_coverage_percent == 100.0);
        assert_eq!(set.coverage.total_games as usize, set.games.len());

        let union: BTreeSet<u32> = set.games.iter().flatten().copied().collect();
        let expected = union.len() as f64 / 12.0 * 100.0;
        assert!((set.coverage.number_coverage_percent - expected).abs() < 1e-9);
        assert_eq!(set.coverage.unique_numbers_covered, union);
        assert_eq!(set.total_cost, dec!(5.00) * Decimal::from(set.games.len() as u64));
    }

    #[test]
    fn test_first_pick_is_first_lexicographic_game() {
        // Every game of a 7-pool covers all 5-patterns at guarantee 4, so the
        // tie goes to the first enumerated candidate and coverage saturates.
        let pool: Vec<u32> = (11..=17).collect();
        let set = sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 10, &lottery())
            .unwrap();

        assert_eq!(set.games, vec![vec![11, 12, 13, 14, 15, 16]]);
        assert_eq!(set.coverage.pattern_coverage_percent, 100.0);
        assert!(set.warning.is_none());
        assert_eq!(set.coverage.pairs_covered, 15);
        assert_eq!(set.coverage.trios_covered, 20);
    }

    #[test]
    fn test_greedy_gain_never_increases() {
        let pool: Vec<u32> = (1..=11).collect();
        let spec = GuaranteeSpec::new(3, 4);
        let mut previous = u64::MAX;
        for budget in 1..=6 {
            let covered_before = if budget == 1 {
                0
            } else {
                sequential()
                    .generate(&pool, spec, budget - 1, &lottery())
                    .unwrap()
                    .coverage
                    .covered_patterns
            };
            let covered = sequential()
                .generate(&pool, spec, budget, &lottery())
                .unwrap()
                .coverage
                .covered_patterns;
            let gain = covered - covered_before;
            assert!(gain <= previous, "gain grew from {previous} to {gain}");
            previous = gain;
        }
    }

    #[test]
    fn test_deterministic() {
        let pool: Vec<u32> = vec![3, 7, 12, 19, 23, 31, 38, 44, 50, 57];
        let spec = GuaranteeSpec::new(4, 5);
        let a = sequential().generate(&pool, spec, 8, &lottery()).unwrap();
        let b = sequential().generate(&pool, spec, 8, &lottery()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pool: Vec<u32> = (1..=12).collect();
        let spec = GuaranteeSpec::new(3, 5);
        let a = sequential().generate(&pool, spec, 6, &lottery()).unwrap();
        let b = ClosureGenerator::default()
            .generate(&pool, spec, 6, &lottery())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_pool_entries_collapse() {
        let pool = vec![1, 2, 2, 3, 4, 5, 6, 6, 7];
        let set = sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 3, &lottery())
            .unwrap();
        assert_eq!(set.coverage.total_patterns, 21);
    }

    #[test]
    fn test_pool_too_large() {
        let pool: Vec<u32> = (1..=19).collect();
        let err = sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 5, &lottery())
            .unwrap_err();
        assert!(matches!(
            err,
            LottoError::PoolTooLarge {
                size: 19,
                max_size: 18,
                ..
            }
        ));
    }

    #[test]
    fn test_candidate_bound_applies_to_other_pick_counts() {
        // 18 numbers, 9-number games: C(18, 9) = 48,620 candidates.
        let lottery = LotteryConfig::new(9, 1, 60, dec!(1)).unwrap();
        let pool: Vec<u32> = (1..=18).collect();
        assert!(matches!(
            sequential().generate(&pool, GuaranteeSpec::new(4, 5), 5, &lottery),
            Err(LottoError::PoolTooLarge { candidates: 48_620, .. })
        ));
    }

    #[test]
    fn test_invalid_guarantee_specs() {
        let pool: Vec<u32> = (1..=10).collect();
        let lottery = lottery();
        for spec in [
            GuaranteeSpec::new(0, 5),
            GuaranteeSpec::new(6, 5),
            GuaranteeSpec::new(4, 0),
            GuaranteeSpec::new(4, 11),
        ] {
            assert!(
                matches!(
                    sequential().generate(&pool, spec, 5, &lottery),
                    Err(LottoError::InvalidConfig { .. })
                ),
                "{spec:?}"
            );
        }
    }

    #[test]
    fn test_pool_smaller_than_game() {
        let pool = vec![1, 2, 3, 4, 5];
        assert!(matches!(
            sequential().generate(&pool, GuaranteeSpec::new(3, 4), 5, &lottery()),
            Err(LottoError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_pool_out_of_range() {
        let pool = vec![0, 1, 2, 3, 4, 5, 6];
        assert!(sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 5, &lottery())
            .is_err());
    }

    #[test]
    fn test_zero_budget() {
        let pool: Vec<u32> = (1..=8).collect();
        let set = sequential()
            .generate(&pool, GuaranteeSpec::new(4, 5), 0, &lottery())
            .unwrap();
        assert!(set.games.is_empty());
        assert_eq!(set.total_cost, Decimal::ZERO);
        assert_eq!(set.coverage.guarantee_description, "no games selected");
        assert!(set.warning.is_none());
    }

    #[test]
    fn test_cancelled_before_first_round() {
        let pool: Vec<u32> = (1..=10).collect();
        let cancel = Arc::new(AtomicBool::new(true));
        let set = sequential()
            .generate_with_cancel(&pool, GuaranteeSpec::new(4, 5), 5, &lottery(), Some(cancel))
            .unwrap();
        assert!(set.games.is_empty());
        assert_eq!(set.warning, Some(ClosureWarning::Cancelled { rounds: 0 }));
    }

    #[test]
    fn test_gain_and_overlap() {
        assert_eq!(overlap(0b1111, 0b0011), 2);
        let patterns = [0b0111, 0b1110, 0b1011];
        let covered = [false, true, false];
        assert_eq!(gain(0b0011, &patterns, &covered, 2), 2);
        assert_eq!(gain(0b0011, &patterns, &covered, 3), 0);
    }
}
