use super::{base_pool_from_ranked, DrawSource, LotteryCatalog, RankedNumber, StrategyWeights};
use crate::advisor::{self, Recommendation};
use crate::closure::{ClosureConfig, ClosureGenerator, GameSet, GuaranteeSpec};
use crate::error::Result;
use crate::evolve::{self, EvolutionParams, EvolutionResult};
use rust_decimal::Decimal;

/// Entry point resolving a lottery identifier through the external sources
/// before running an optimization.
///
/// # Usage
///
/// ```ignore
/// let planner = Planner::new(history_db, weights_service, catalog);
/// let result = planner.evolve("mega", &EvolutionParams::balanced())?;
/// let closure = planner.closure("mega", 12, GuaranteeSpec::new(4, 5), 10)?;
/// let tiers = planner.recommend("mega", Decimal::from(30))?;
/// ```
#[derive(Debug, Clone)]
pub struct Planner<D, W, C> {
    draws: D,
    weights: W,
    catalog: C,
    closure: ClosureGenerator,
}

impl<D, W, C> Planner<D, W, C>
where
    D: DrawSource,
    W: StrategyWeights,
    C: LotteryCatalog,
{
    pub fn new(draws: D, weights: W, catalog: C) -> Self {
        Self {
            draws,
            weights,
            catalog,
            closure: ClosureGenerator::default(),
        }
    }

    pub fn with_closure_config(mut self, config: ClosureConfig) -> Self {
        self.closure = ClosureGenerator::new(config);
        self
    }

    /// Evolves games for `lottery_id` from its draw history.
    pub fn evolve(&self, lottery_id: &str, params: &EvolutionParams) -> Result<EvolutionResult> {
        let config = self.catalog.lottery_config(lottery_id)?;
        let draws = self.draws.fetch_draws(lottery_id)?;
        tracing::debug!(lottery_id, draws = draws.len(), "planning evolution");
        evolve::evolve(&draws, &config, params)
    }

    /// Builds a closure over the `pool_size` strongest numbers.
    ///
    /// Ranked numbers outside the lottery's range are ignored.
    pub fn closure(
        &self,
        lottery_id: &str,
        pool_size: usize,
        guarantee: GuaranteeSpec,
        max_games: u32,
    ) -> Result<GameSet> {
        let config = self.catalog.lottery_config(lottery_id)?;
        let ranked: Vec<RankedNumber> = self
            .weights
            .top_numbers(lottery_id)?
            .into_iter()
            .filter(|r| config.contains(r.number))
            .collect();
        let pool = base_pool_from_ranked(&ranked, pool_size);
        tracing::debug!(lottery_id, pool = ?pool, "planning closure");
        self.closure.generate(&pool, guarantee, max_games, &config)
    }

    pub fn recommend(&self, lottery_id: &str, budget: Decimal) -> Result<Vec<Recommendation>> {
        let config = self.catalog.lottery_config(lottery_id)?;
        advisor::recommend(budget, &config)
    }
}
