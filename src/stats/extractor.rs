use crate::error::{LottoError, Result};
use crate::lottery::{Draw, LotteryConfig};
use std::collections::{BTreeMap, BTreeSet};

/// Minimum number of draws needed for pair statistics.
pub const MIN_DRAWS: usize = 2;

/// Number of most recent draws contributing to the "recent" set.
pub const RECENT_WINDOW: usize = 20;

/// Statistics extracted from a window of historical draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalStats {
    /// Number of draws the snapshot was computed from (0 for neutral).
    pub sample_size: usize,

    /// Fraction of draws containing each number. Every number of the range
    /// is present; unseen numbers map to `0.0`.
    pub frequency_by_number: BTreeMap<u32, f64>,

    /// Fraction of draws containing each unordered pair, keyed `(low, high)`.
    /// Pairs missing from the map have [`unlisted_pair_frequency`].
    ///
    /// [`unlisted_pair_frequency`]: HistoricalStats::unlisted_pair_frequency
    pub pair_frequency: BTreeMap<(u32, u32), f64>,

    /// Frequency reported for pairs absent from `pair_frequency`: `0.0` for
    /// observed history, the uniform co-occurrence rate for a neutral
    /// snapshot.
    pub unlisted_pair_frequency: f64,

    /// Mean of the per-draw number sums.
    pub average_sum: f64,

    /// Mean count of odd numbers per draw.
    pub average_odd_count: f64,

    /// Numbers appearing in the most recent [`RECENT_WINDOW`] draws.
    pub recent_numbers: BTreeSet<u32>,
}

impl HistoricalStats {
    /// Extracts statistics from `draws`, ordered most-recent-first.
    ///
    /// # Errors
    ///
    /// - [`LottoError::InsufficientData`] with fewer than [`MIN_DRAWS`] draws
    /// - [`LottoError::InvalidDraw`] if a draw violates `config`
    pub fn extract(draws: &[Draw], config: &LotteryConfig) -> Result<Self> {
        config.validate()?;
        if draws.len() < MIN_DRAWS {
            return Err(LottoError::InsufficientData {
                required: MIN_DRAWS,
                actual: draws.len(),
            });
        }

        let mut counts: BTreeMap<u32, u64> = config.numbers().map(|n| (n, 0)).collect();
        let mut pair_counts: BTreeMap<(u32, u32), u64> = BTreeMap::new();
        let mut total_sum = 0u64;
        let mut total_odd = 0usize;
        let mut recent_numbers = BTreeSet::new();

        for (i, draw) in draws.iter().enumerate() {
            config.validate_draw(draw)?;

            let numbers: Vec<u32> = draw.numbers.iter().copied().collect();
            for (a_idx, &a) in numbers.iter().enumerate() {
                *counts.entry(a).or_insert(0) += 1;
                // Ascending set order makes (a, b) already (low, high).
                for &b in &numbers[a_idx + 1..] {
                    *pair_counts.entry((a, b)).or_insert(0) += 1;
                }
            }

            total_sum += draw.sum();
            total_odd += draw.odd_count();

            if i < RECENT_WINDOW {
                recent_numbers.extend(draw.numbers.iter().copied());
            }
        }

        let n = draws.len() as f64;
        Ok(Self {
            sample_size: draws.len(),
            frequency_by_number: counts
                .into_iter()
                .map(|(k, c)| (k, c as f64 / n))
                .collect(),
            pair_frequency: pair_counts
                .into_iter()
                .map(|(k, c)| (k, c as f64 / n))
                .collect(),
            unlisted_pair_frequency: 0.0,
            average_sum: total_sum as f64 / n,
            average_odd_count: total_odd as f64 / n,
            recent_numbers,
        })
    }

    /// Builds the statistics a perfectly uniform lottery would produce.
    ///
    /// Used in place of [`extract`](Self::extract) when there is not enough
    /// history. `sample_size` is `0`, which the population seeder treats as
    /// "seed at random". Pair frequencies are not enumerated; every pair
    /// reports the uniform rate through [`unlisted_pair_frequency`].
    ///
    /// [`unlisted_pair_frequency`]: HistoricalStats::unlisted_pair_frequency
    pub fn neutral(config: &LotteryConfig) -> Self {
        let range = config.range_size() as f64;
        let k = config.numbers_to_draw as f64;

        let number_freq = k / range;
        let pair_freq = if range > 1.0 {
            k * (k - 1.0) / (range * (range - 1.0))
        } else {
            0.0
        };

        let odd_in_range = config.numbers().filter(|n| n % 2 == 1).count() as f64;

        Self {
            sample_size: 0,
            frequency_by_number: config.numbers().map(|n| (n, number_freq)).collect(),
            pair_frequency: BTreeMap::new(),
            unlisted_pair_frequency: pair_freq,
            average_sum: k * (config.min_number as f64 + config.max_number as f64) / 2.0,
            average_odd_count: k * odd_in_range / range,
            recent_numbers: BTreeSet::new(),
        }
    }

    /// Frequency of a single number (0 if unknown).
    pub fn frequency(&self, n: u32) -> f64 {
        self.frequency_by_number.get(&n).copied().unwrap_or(0.0)
    }

    /// Co-occurrence frequency of an unordered pair.
    pub fn pair(&self, a: u32, b: u32) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.pair_frequency
            .get(&key)
            .copied()
            .unwrap_or(self.unlisted_pair_frequency)
    }

    /// Highest single-number frequency.
    pub fn max_frequency(&self) -> f64 {
        self.frequency_by_number.values().copied().fold(0.0, f64::max)
    }

    /// Highest pair frequency.
    pub fn max_pair_frequency(&self) -> f64 {
        self.pair_frequency
            .values()
            .copied()
            .fold(self.unlisted_pair_frequency, f64::max)
    }

    /// The `count` most frequent numbers, ties broken by ascending number.
    pub fn top_by_frequency(&self, count: usize) -> Vec<u32> {
        let mut ranked: Vec<(u32, f64)> = self
            .frequency_by_number
            .iter()
            .map(|(&n, &f)| (n, f))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.into_iter().take(count).map(|(n, _)| n).collect()
    }
}
