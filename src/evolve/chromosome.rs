use crate::ga::Individual;
use crate::lottery::LotteryConfig;
use std::collections::BTreeSet;

/// A candidate game in the genetic search.
///
/// Genes are kept strictly ascending and unique. A chromosome is never
/// changed after scoring; [`Individual::scored`] returns a new value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<u32>,
    fitness: Option<f64>,
    generation: u32,
}

impl Chromosome {
    /// Creates an unscored chromosome. Duplicate numbers collapse and the
    /// genes are stored in ascending order.
    pub fn new(genes: impl IntoIterator<Item = u32>, generation: u32) -> Self {
        let genes: BTreeSet<u32> = genes.into_iter().collect();
        Self {
            genes: genes.into_iter().collect(),
            fitness: None,
            generation,
        }
    }

    /// The game's numbers, ascending.
    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    /// Generation in which this chromosome was evaluated (0 if unscored).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Checks the cardinality and range invariants against `config`.
    pub fn is_valid(&self, config: &LotteryConfig) -> bool {
        self.genes.len() == config.pick_count()
            && self.genes.windows(2).all(|w| w[0] < w[1])
            && self.genes.iter().all(|&g| config.contains(g))
    }
}

impl Individual for Chromosome {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn scored(&self, fitness: f64, generation: u32) -> Self {
        Self {
            genes: self.genes.clone(),
            fitness: Some(fitness),
            generation,
        }
    }
}
