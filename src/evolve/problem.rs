use super::chromosome::Chromosome;
use super::fitness::FitnessEvaluator;
use super::operators;
use super::seeder::PopulationSeeder;
use crate::error::Result;
use crate::ga::GaProblem;
use crate::lottery::LotteryConfig;
use crate::stats::HistoricalStats;
use rand::Rng;

/// The lottery game search expressed as a [`GaProblem`].
///
/// Borrows its configuration and statistics, so one snapshot can back
/// several concurrent runs.
#[derive(Debug, Clone)]
pub struct LotteryProblem<'a> {
    config: &'a LotteryConfig,
    seeder: PopulationSeeder<'a>,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> LotteryProblem<'a> {
    pub fn new(config: &'a LotteryConfig, stats: &'a HistoricalStats) -> Self {
        Self {
            config,
            seeder: PopulationSeeder::new(config, stats),
            evaluator: FitnessEvaluator::new(config, stats),
        }
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for LotteryProblem<'_> {
    type Individual = Chromosome;

    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Result<Vec<Chromosome>> {
        self.seeder.seed(size, rng)
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        self.evaluator.evaluate(individual.genes())
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        match operators::crossover(parent1.genes(), parent2.genes(), self.config, rng) {
            Ok((a, b)) => vec![Chromosome::new(a, 0), Chromosome::new(b, 0)],
            Err(e) => {
                tracing::warn!(error = %e, "crossover repair failed, copying parents");
                vec![parent1.clone(), parent2.clone()]
            }
        }
    }

    fn mutate<R: Rng>(&self, individual: &Chromosome, rng: &mut R) -> Chromosome {
        Chromosome::new(operators::mutate(individual.genes(), self.config, rng), 0)
    }
}
