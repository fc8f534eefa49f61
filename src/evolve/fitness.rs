//! Fitness scoring for candidate games.
//!
//! The score is the sum of six independently capped sub-scores:
//!
//! | Factor | Weight | Rewards |
//! |---|---|---|
//! | frequency | 30 | numbers drawn often |
//! | pair | 20 | pairs that co-occur often |
//! | sum | 15 | game sums near the historical average |
//! | balance | 15 | odd counts near the historical average |
//! | recency | 10 | numbers from the recent window |
//! | distribution | 10 | an average gap near [`IDEAL_GAP`] |

use crate::lottery::LotteryConfig;
use crate::stats::HistoricalStats;

pub const FREQUENCY_WEIGHT: f64 = 30.0;
pub const PAIR_WEIGHT: f64 = 20.0;
pub const SUM_WEIGHT: f64 = 15.0;
pub const BALANCE_WEIGHT: f64 = 15.0;
pub const RECENCY_WEIGHT: f64 = 10.0;
pub const DISTRIBUTION_WEIGHT: f64 = 10.0;

/// Average gap between consecutive sorted numbers that scores full marks.
pub const IDEAL_GAP: f64 = 10.0;

/// Per-factor contributions to a fitness score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBreakdown {
    pub frequency: f64,
    pub pair: f64,
    pub sum: f64,
    pub balance: f64,
    pub recency: f64,
    pub distribution: f64,
}

impl FitnessBreakdown {
    /// Sum of all factors, never negative.
    pub fn total(&self) -> f64 {
        (self.frequency + self.pair + self.sum + self.balance + self.recency + self.distribution)
            .max(0.0)
    }
}

/// Scores games against a statistics snapshot.
///
/// Pure and deterministic: identical inputs always produce identical scores.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    stats: &'a HistoricalStats,
    pick_count: usize,
    max_frequency: f64,
    max_pair_frequency: f64,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(config: &LotteryConfig, stats: &'a HistoricalStats) -> Self {
        Self {
            stats,
            pick_count: config.pick_count(),
            max_frequency: stats.max_frequency(),
            max_pair_frequency: stats.max_pair_frequency(),
        }
    }

    /// Total fitness of `genes`.
    pub fn evaluate(&self, genes: &[u32]) -> f64 {
        self.breakdown(genes).total()
    }

    /// Fitness split into its six factors.
    pub fn breakdown(&self, genes: &[u32]) -> FitnessBreakdown {
        if genes.is_empty() {
            return FitnessBreakdown::default();
        }
        FitnessBreakdown {
            frequency: FREQUENCY_WEIGHT * self.frequency_ratio(genes),
            pair: PAIR_WEIGHT * self.pair_ratio(genes),
            sum: SUM_WEIGHT * self.sum_ratio(genes),
            balance: BALANCE_WEIGHT * self.balance_ratio(genes),
            recency: RECENCY_WEIGHT * self.recency_ratio(genes),
            distribution: DISTRIBUTION_WEIGHT * distribution_ratio(genes),
        }
    }

    fn frequency_ratio(&self, genes: &[u32]) -> f64 {
        if self.max_frequency <= 0.0 {
            return 0.0;
        }
        let mean = genes.iter().map(|&g| self.stats.frequency(g)).sum::<f64>() / genes.len() as f64;
        unit(mean / self.max_frequency)
    }

    fn pair_ratio(&self, genes: &[u32]) -> f64 {
        if self.max_pair_frequency <= 0.0 || genes.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, &a) in genes.iter().enumerate() {
            for &b in &genes[i + 1..] {
                total += self.stats.pair(a, b);
                pairs += 1;
            }
        }
        unit(total / pairs as f64 / self.max_pair_frequency)
    }

    fn sum_ratio(&self, genes: &[u32]) -> f64 {
        let average = self.stats.average_sum;
        if average <= 0.0 {
            return 0.0;
        }
        let sum: f64 = genes.iter().map(|&g| g as f64).sum();
        unit(1.0 - ((sum - average).abs() / average).min(1.0))
    }

    fn balance_ratio(&self, genes: &[u32]) -> f64 {
        if self.pick_count == 0 {
            return 0.0;
        }
        let odd = genes.iter().filter(|&&g| g % 2 == 1).count() as f64;
        unit(1.0 - (odd - self.stats.average_odd_count).abs() / self.pick_count as f64)
    }

    fn recency_ratio(&self, genes: &[u32]) -> f64 {
        let recent = genes
            .iter()
            .filter(|&&g| self.stats.recent_numbers.contains(&g))
            .count();
        unit(recent as f64 / genes.len() as f64)
    }
}

/// Mean gap between consecutive sorted genes is `(max − min) / (len − 1)`.
fn distribution_ratio(genes: &[u32]) -> f64 {
    if genes.len() < 2 {
        return 0.0;
    }
    let (lo, hi) = genes
        .iter()
        .fold((u32::MAX, u32::MIN), |(lo, hi), &g| (lo.min(g), hi.max(g)));
    let average_gap = (hi - lo) as f64 / (genes.len() - 1) as f64;
    unit(1.0 - (average_gap - IDEAL_GAP).abs() / IDEAL_GAP)
}

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lottery::Draw;
    use rust_decimal_macros::dec;

    fn fixture() -> (LotteryConfig, HistoricalStats) {
        let config = LotteryConfig::new(2, 1, 20, dec!(1)).unwrap();
        let draws = vec![Draw::new(2, [1, 11]), Draw::new(1, [1, 11])];
        let stats = HistoricalStats::extract(&draws, &config).unwrap();
        (config, stats)
    }

    #[test]
    fn test_perfect_game_scores_100() {
        let (config, stats) = fixture();
        let eval = FitnessEvaluator::new(&config, &stats);
        let b = eval.breakdown(&[1, 11]);
        assert!((b.frequency - 30.0).abs() < 1e-9);
        assert!((b.pair - 20.0).abs() < 1e-9);
        assert!((b.sum - 15.0).abs() < 1e-9);
        assert!((b.balance - 15.0).abs() < 1e-9);
        assert!((b.recency - 10.0).abs() < 1e-9);
        assert!((b.distribution - 10.0).abs() < 1e-9);
        assert!((eval.evaluate(&[1, 11]) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_scores() {
        let (config, stats) = fixture();
        let eval = FitnessEvaluator::new(&config, &stats);
        let b = eval.breakdown(&[2, 4]);
        assert_eq!(b.frequency, 0.0);
        assert_eq!(b.pair, 0.0);
        // sum 6 vs average 12
        assert!((b.sum - 7.5).abs() < 1e-9);
        // 0 odd vs average 2, over 2 numbers
        assert_eq!(b.balance, 0.0);
        assert_eq!(b.recency, 0.0);
        // gap 2: 1 - 8/10
        assert!((b.distribution - 2.0).abs() < 1e-9);
        assert!((b.total() - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_sum_penalty_caps_at_zero() {
        let (config, stats) = fixture();
        let eval = FitnessEvaluator::new(&config, &stats);
        // sum 39 is more than double the average of 12
        assert_eq!(eval.breakdown(&[19, 20]).sum, 0.0);
    }

    #[test]
    fn test_bounds_and_determinism() {
        let config = LotteryConfig::new(6, 1, 60, dec!(5)).unwrap();
        let draws: Vec<Draw> = (0..30u32)
            .map(|i| Draw::new(i as u64, (0..6).map(|j| (i * 7 + j * 11) % 60 + 1)))
            .collect();
        let stats = HistoricalStats::extract(&draws, &config).unwrap();
        let eval = FitnessEvaluator::new(&config, &stats);

        for game in [[1, 2, 3, 4, 5, 6], [5, 17, 23, 38, 44, 59], [10, 20, 30, 40, 50, 60]] {
            let f = eval.evaluate(&game);
            assert!((0.0..=100.0).contains(&f), "{game:?} -> {f}");
            assert_eq!(f, eval.evaluate(&game));
        }
    }

    #[test]
    fn test_neutral_stats() {
        let config = LotteryConfig::new(6, 1, 60, dec!(5)).unwrap();
        let stats = HistoricalStats::neutral(&config);
        let eval = FitnessEvaluator::new(&config, &stats);
        let b = eval.breakdown(&[5, 15, 25, 35, 45, 55]);
        // Uniform frequencies give full frequency and pair marks.
        assert!((b.frequency - 30.0).abs() < 1e-9);
        assert!((b.pair - 20.0).abs() < 1e-9);
        assert_eq!(b.recency, 0.0);
        assert!((b.distribution - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_genes() {
        let (config, stats) = fixture();
        let eval = FitnessEvaluator::new(&config, &stats);
        assert_eq!(eval.evaluate(&[]), 0.0);
    }
}
