//! Initial population construction.

use super::chromosome::Chromosome;
use super::operators::complete_unique;
use crate::error::Result;
use crate::lottery::LotteryConfig;
use crate::stats::HistoricalStats;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Share of the population seeded from the most frequent numbers.
pub const FREQUENCY_SHARE_PERCENT: usize = 20;

/// Share of the population seeded from recently drawn numbers.
pub const RECENT_SHARE_PERCENT: usize = 20;

/// Builds initial populations from historical statistics.
///
/// Composition of a population of size `n`:
///
/// | Share | Source |
/// |---|---|
/// | 20% | top `2 × numbers_to_draw` most frequent numbers, shuffled |
/// | 20% | the recent set, shuffled, padded with random numbers if short |
/// | rest | uniformly random unique numbers |
///
/// Every chromosome is completed through [`complete_unique`], so seeding is
/// bounded even when a source pool is too small. Statistics without any
/// history ([`HistoricalStats::neutral`]) seed the whole population at random.
#[derive(Debug, Clone, Copy)]
pub struct PopulationSeeder<'a> {
    config: &'a LotteryConfig,
    stats: &'a HistoricalStats,
}

impl<'a> PopulationSeeder<'a> {
    pub fn new(config: &'a LotteryConfig, stats: &'a HistoricalStats) -> Self {
        Self { config, stats }
    }

    /// Seeds `size` unscored chromosomes.
    ///
    /// # Errors
    ///
    /// [`LottoError::SeedingExhausted`](crate::LottoError::SeedingExhausted)
    /// if the number range cannot supply enough distinct numbers.
    pub fn seed<R: Rng>(&self, size: usize, rng: &mut R) -> Result<Vec<Chromosome>> {
        // A neutral snapshot ranks every number equally, so its "hot" list
        // would just be the low end of the range.
        let (frequency_count, recent_count) = if self.stats.sample_size == 0 {
            (0, 0)
        } else {
            (
                size * FREQUENCY_SHARE_PERCENT / 100,
                size * RECENT_SHARE_PERCENT / 100,
            )
        };

        let hot = if frequency_count > 0 {
            self.stats.top_by_frequency(2 * self.config.pick_count())
        } else {
            Vec::new()
        };
        let recent: Vec<u32> = self.stats.recent_numbers.iter().copied().collect();

        let mut population = Vec::with_capacity(size);
        for _ in 0..frequency_count {
            population.push(self.from_pool(&hot, rng)?);
        }
        for _ in 0..recent_count {
            population.push(self.from_pool(&recent, rng)?);
        }
        while population.len() < size {
            population.push(self.from_pool(&[], rng)?);
        }

        tracing::debug!(
            size,
            frequency_count,
            recent_count,
            hot = hot.len(),
            recent = recent.len(),
            "population seeded"
        );
        Ok(population)
    }

    /// Shuffles `pool`, keeps up to one game's worth of in-range numbers and
    /// completes the rest at random.
    fn from_pool<R: Rng>(&self, pool: &[u32], rng: &mut R) -> Result<Chromosome> {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(rng);

        let mut chosen: BTreeSet<u32> = shuffled
            .into_iter()
            .filter(|&n| self.config.contains(n))
            .take(self.config.pick_count())
            .collect();
        complete_unique(&mut chosen, self.config, &BTreeSet::new(), rng)?;

        Ok(Chromosome::new(chosen, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LottoError;
    use crate::ga::Individual;
    use crate::lottery::Draw;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn config() -> LotteryConfig {
        LotteryConfig::new(3, 1, 30, dec!(1)).unwrap()
    }

    fn stats(config: &LotteryConfig) -> HistoricalStats {
        // 1..=6 dominate the history; recent window only holds 20..=25.
        let mut draws: Vec<Draw> = (0..20)
            .map(|i| Draw::new(100 - i, if i % 2 == 0 { [20, 21, 22] } else { [23, 24, 25] }))
            .collect();
        for i in 0..60 {
            draws.push(Draw::new(60 - i, if i % 2 == 0 { [1, 2, 3] } else { [4, 5, 6] }));
        }
        HistoricalStats::extract(&draws, config).unwrap()
    }

    #[test]
    fn test_population_size_and_validity() {
        let config = config();
        let stats = stats(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let pop = PopulationSeeder::new(&config, &stats).seed(50, &mut rng).unwrap();

        assert_eq!(pop.len(), 50);
        for c in &pop {
            assert!(c.is_valid(&config), "{:?}", c.genes());
            assert!(c.fitness().is_none());
        }
    }

    #[test]
    fn test_composition() {
        let config = config();
        let stats = stats(&config);
        let mut rng = StdRng::seed_from_u64(12);
        let pop = PopulationSeeder::new(&config, &stats).seed(50, &mut rng).unwrap();

        // Top 2k = 6 numbers are exactly 1..=6.
        let hot: BTreeSet<u32> = (1..=6).collect();
        for c in &pop[..10] {
            assert!(c.genes().iter().all(|g| hot.contains(g)), "{:?}", c.genes());
        }
        let recent: BTreeSet<u32> = (20..=25).collect();
        for c in &pop[10..20] {
            assert!(c.genes().iter().all(|g| recent.contains(g)), "{:?}", c.genes());
        }
    }

    #[test]
    fn test_small_recent_set_is_padded() {
        let config = config();
        let draws = vec![Draw::new(2, [1, 2, 3]), Draw::new(1, [1, 2, 3])];
        let mut stats = HistoricalStats::extract(&draws, &config).unwrap();
        stats.recent_numbers = [7].into_iter().collect();

        let mut rng = StdRng::seed_from_u64(13);
        let pop = PopulationSeeder::new(&config, &stats).seed(10, &mut rng).unwrap();
        // Recent-seeded chromosomes sit at indices 2..4.
        for c in &pop[2..4] {
            assert!(c.is_valid(&config));
            assert!(c.genes().contains(&7));
        }
    }

    #[test]
    fn test_neutral_stats_seed_randomly() {
        let config = config();
        let stats = HistoricalStats::neutral(&config);
        let mut rng = StdRng::seed_from_u64(14);
        let pop = PopulationSeeder::new(&config, &stats).seed(25, &mut rng).unwrap();
        assert_eq!(pop.len(), 25);
        assert!(pop.iter().all(|c| c.is_valid(&config)));
    }

    #[test]
    fn test_neutral_stats_not_biased_to_low_numbers() {
        let config = LotteryConfig::new(6, 1, 60, dec!(5)).unwrap();
        let stats = HistoricalStats::neutral(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let pop = PopulationSeeder::new(&config, &stats).seed(100, &mut rng).unwrap();

        // A uniform 6-of-60 game lies within 1..=12 with probability ~1.8e-5.
        let low = pop
            .iter()
            .filter(|c| c.genes().iter().all(|&g| g <= 12))
            .count();
        assert_eq!(low, 0, "{} of 100 games inside 1..=12", low);

        let used: BTreeSet<u32> = pop.iter().flat_map(|c| c.genes().iter().copied()).collect();
        assert!(used.len() > 40, "only {} distinct numbers used", used.len());
    }

    #[test]
    fn test_range_too_small_exhausts() {
        // Bypasses LotteryConfig::new validation on purpose.
        let config = LotteryConfig {
            numbers_to_draw: 5,
            min_number: 1,
            max_number: 3,
            cost_per_game: Decimal::ONE,
        };
        let stats = HistoricalStats::neutral(&config);
        let mut rng = StdRng::seed_from_u64(15);
        let err = PopulationSeeder::new(&config, &stats)
            .seed(10, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            LottoError::SeedingExhausted {
                needed: 5,
                available: 3
            }
        );
    }

    #[test]
    fn test_seeded_determinism() {
        let config = config();
        let stats = stats(&config);
        let seeder = PopulationSeeder::new(&config, &stats);
        let a = seeder.seed(30, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = seeder.seed(30, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
