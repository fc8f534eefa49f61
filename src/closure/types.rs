use crate::error::{LottoError, Result};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Summary of what a set of games covers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageStats {
    /// Number of selected games.
    pub total_games: u32,

    /// Pool numbers used by at least one game.
    pub unique_numbers_covered: BTreeSet<u32>,

    /// `|unique_numbers_covered| / |pool| × 100`.
    pub number_coverage_percent: f64,

    /// Distinct unordered pairs appearing in any game.
    pub pairs_covered: u32,

    /// Distinct unordered trios appearing in any game.
    pub trios_covered: u32,

    /// Patterns overlapped by at least `guarantee` numbers of some game.
    pub covered_patterns: u64,

    /// All `C(|pool|, if_hit)` patterns.
    pub total_patterns: u64,

    /// `covered_patterns / total_patterns × 100`.
    pub pattern_coverage_percent: f64,

    /// Heuristic label keyed on the game count; not a verified guarantee.
    pub guarantee_description: String,
}

/// Why a closure stopped before its game budget or full coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClosureWarning {
    /// No remaining candidate covers any uncovered pattern.
    EmptyCoverage { covered: u64, total: u64 },

    /// The cancellation flag was observed after `rounds` greedy rounds.
    Cancelled { rounds: u32 },
}

/// A budget-bounded set of games produced by the covering generator.
///
/// Partial closures are still usable, so incomplete runs are reported
/// through [`warning`](GameSet::warning) rather than as errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSet {
    /// Selected games, each ascending, in selection order.
    pub games: Vec<Vec<u32>>,

    pub coverage: CoverageStats,

    /// `games.len() × cost_per_game`.
    pub total_cost: Decimal,

    pub warning: Option<ClosureWarning>,
}

impl GameSet {
    /// Returns the set only if every pattern is covered.
    ///
    /// # Errors
    ///
    /// [`LottoError::EmptyCoverage`] when any pattern is uncovered, whether
    /// the search stalled, ran out of `max_games` or was cancelled.
    pub fn require_full_coverage(self) -> Result<Self> {
        let CoverageStats {
            covered_patterns,
            total_patterns,
            ..
        } = self.coverage;
        if covered_patterns < total_patterns {
            return Err(LottoError::EmptyCoverage {
                covered: covered_patterns as usize,
                total: total_patterns as usize,
            });
        }
        Ok(self)
    }
}

/// Heuristic guarantee label for a closure of `game_count` games.
pub fn guarantee_description(game_count: usize) -> &'static str {
    match game_count {
        20.. => "quadra guaranteed if 5 of base hit",
        10..=19 => "terno guaranteed if 4 of base hit",
        5..=9 => "terno likely if 5 of base hit",
        1..=4 => "partial coverage, no formal guarantee",
        0 => "no games selected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_stats() -> CoverageStats {
        CoverageStats {
            total_games: 0,
            unique_numbers_covered: BTreeSet::new(),
            number_coverage_percent: 0.0,
            pairs_covered: 0,
            trios_covered: 0,
            covered_patterns: 3,
            total_patterns: 10,
            pattern_coverage_percent: 30.0,
            guarantee_description: guarantee_description(0).to_string(),
        }
    }

    #[test]
    fn test_guarantee_description_thresholds() {
        assert_eq!(guarantee_description(0), "no games selected");
        assert_eq!(guarantee_description(4), "partial coverage, no formal guarantee");
        assert_eq!(guarantee_description(5), "terno likely if 5 of base hit");
        assert_eq!(guarantee_description(10), "terno guaranteed if 4 of base hit");
        assert_eq!(guarantee_description(19), "terno guaranteed if 4 of base hit");
        assert_eq!(guarantee_description(20), "quadra guaranteed if 5 of base hit");
        assert_eq!(guarantee_description(500), "quadra guaranteed if 5 of base hit");
    }

    #[test]
    fn test_require_full_coverage_rejects_stall() {
        let set = GameSet {
            games: vec![],
            coverage: empty_stats(),
            total_cost: Decimal::ZERO,
            warning: Some(ClosureWarning::EmptyCoverage {
                covered: 3,
                total: 10,
            }),
        };
        assert_eq!(
            set.require_full_coverage(),
            Err(LottoError::EmptyCoverage {
                covered: 3,
                total: 10
            })
        );
    }

    #[test]
    fn test_require_full_coverage_rejects_budget_stop() {
        // Stopped at max_games without a warning, 3 of 10 patterns covered.
        let set = GameSet {
            games: vec![vec![1, 2, 3, 4, 5, 6]],
            coverage: empty_stats(),
            total_cost: Decimal::ONE,
            warning: None,
        };
        assert!(matches!(
            set.clone().require_full_coverage(),
            Err(LottoError::EmptyCoverage { covered: 3, total: 10 })
        ));

        let cancelled = GameSet {
            warning: Some(ClosureWarning::Cancelled { rounds: 1 }),
            ..set
        };
        assert!(cancelled.require_full_coverage().is_err());
    }

    #[test]
    fn test_require_full_coverage_accepts_complete_set() {
        let mut coverage = empty_stats();
        coverage.covered_patterns = 10;
        coverage.pattern_coverage_percent = 100.0;
        let complete = GameSet {
            games: vec![vec![1, 2, 3, 4, 5, 6]],
            coverage,
            total_cost: Decimal::ONE,
            warning: None,
        };
        assert_eq!(complete.clone().require_full_coverage(), Ok(complete));
    }
}
