use crate::error::{LottoError, Result};
use crate::lottery::LotteryConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Tiers as `(game_count, estimated_coverage_percent, description)`.
///
/// Coverage estimates are static figures, not computed per pool.
pub const LADDER: [(u32, f64, &str); 5] = [
    (3, 15.0, "Economy: a few games for a light spread"),
    (5, 25.0, "Basic: covers the strongest numbers"),
    (10, 45.0, "Balanced: good spread for the cost"),
    (15, 60.0, "Extended: wide coverage of the base pool"),
    (20, 75.0, "Maximum: broadest coverage on the ladder"),
];

/// Share of the affordable game count the recommended tier aims for.
pub const RECOMMENDED_BUDGET_SHARE_PERCENT: u64 = 60;

/// One affordable tier of the ladder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub game_count: u32,
    pub cost: Decimal,
    pub estimated_coverage_percent: f64,
    pub description: String,
    pub is_recommended: bool,
}

/// Lists the affordable ladder tiers for `budget`.
///
/// The recommended tier is the one whose game count is closest to
/// `0.6 × floor(budget / cost_per_game)`; on equal distance the larger tier
/// wins. An empty list means not even the smallest tier is affordable.
///
/// # Errors
///
/// [`LottoError::InvalidConfig`] for a non-positive game cost or a negative
/// budget.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use u_lotto::advisor::recommend;
/// use u_lotto::lottery::LotteryConfig;
///
/// let config = LotteryConfig::new(6, 1, 60, Decimal::new(500, 2)).unwrap();
/// let tiers = recommend(Decimal::from(30), &config).unwrap();
/// let counts: Vec<u32> = tiers.iter().map(|t| t.game_count).collect();
/// assert_eq!(counts, vec![3, 5]);
/// ```
pub fn recommend(budget: Decimal, config: &LotteryConfig) -> Result<Vec<Recommendation>> {
    let cost = config.cost_per_game;
    if cost <= Decimal::ZERO {
        return Err(LottoError::invalid_config(
            "cost_per_game must be positive to size a budget",
        ));
    }
    if budget.is_sign_negative() && !budget.is_zero() {
        return Err(LottoError::invalid_config("budget must not be negative"));
    }

    let affordable = (budget / cost).floor().to_u64().unwrap_or(u64::MAX);
    // Distances in tenths keep the 60% target exact.
    let target_tenths = affordable.saturating_mul(RECOMMENDED_BUDGET_SHARE_PERCENT / 10);
    let distance = |count: u32| (count as u64 * 10).abs_diff(target_tenths);

    let mut tiers: Vec<Recommendation> = LADDER
        .iter()
        .filter(|(count, _, _)| Decimal::from(*count) * cost <= budget)
        .map(|&(count, coverage, description)| Recommendation {
            game_count: count,
            cost: Decimal::from(count) * cost,
            estimated_coverage_percent: coverage,
            description: description.to_string(),
            is_recommended: false,
        })
        .collect();

    let mut best: Option<usize> = None;
    for (i, tier) in tiers.iter().enumerate() {
        let closer = match best {
            Some(b) => distance(tier.game_count) <= distance(tiers[b].game_count),
            None => true,
        };
        if closer {
            best = Some(i);
        }
    }
    if let Some(i) = best {
        tiers[i].is_recommended = true;
    }

    tracing::debug!(%budget, %cost, affordable, tiers = tiers.len(), "recommendations computed");
    Ok(tiers)
}
