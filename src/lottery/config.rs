//! Lottery variant configuration.

use crate::error::{LottoError, Result};
use rust_decimal::Decimal;

use super::draw::Draw;

/// Immutable description of a lottery variant.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use u_lotto::lottery::LotteryConfig;
///
/// let mega = LotteryConfig::new(6, 1, 60, Decimal::new(500, 2)).unwrap();
/// assert_eq!(mega.range_size(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryConfig {
    /// How many numbers a game (and a draw) contains.
    pub numbers_to_draw: u32,

    /// Smallest legal number (inclusive).
    pub min_number: u32,

    /// Largest legal number (inclusive).
    pub max_number: u32,

    /// Price of a single game.
    pub cost_per_game: Decimal,
}

impl LotteryConfig {
    /// Creates a validated configuration.
    pub fn new(
        numbers_to_draw: u32,
        min_number: u32,
        max_number: u32,
        cost_per_game: Decimal,
    ) -> Result<Self> {
        let config = Self {
            numbers_to_draw,
            min_number,
            max_number,
            cost_per_game,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the range and pick-count invariants.
    pub fn validate(&self) -> Result<()> {
        if self.min_number >= self.max_number {
            return Err(LottoError::invalid_config(format!(
                "min_number ({}) must be below max_number ({})",
                self.min_number, self.max_number
            )));
        }
        if self.numbers_to_draw == 0 {
            return Err(LottoError::invalid_config(
                "numbers_to_draw must be at least 1",
            ));
        }
        if self.numbers_to_draw as u64 > self.range_size() {
            return Err(LottoError::invalid_config(format!(
                "numbers_to_draw ({}) exceeds the {} numbers in range",
                self.numbers_to_draw,
                self.range_size()
            )));
        }
        if self.cost_per_game.is_sign_negative() {
            return Err(LottoError::invalid_config(
                "cost_per_game must not be negative",
            ));
        }
        Ok(())
    }

    /// Number of distinct legal values, `max - min + 1`.
    pub fn range_size(&self) -> u64 {
        (self.max_number as u64).saturating_sub(self.min_number as u64) + 1
    }

    /// Pick count as a `usize`, for sizing collections.
    pub fn pick_count(&self) -> usize {
        self.numbers_to_draw as usize
    }

    /// Returns `true` if `n` lies within `[min_number, max_number]`.
    pub fn contains(&self, n: u32) -> bool {
        (self.min_number..=self.max_number).contains(&n)
    }

    /// Iterates every legal number in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = u32> {
        self.min_number..=self.max_number
    }

    /// Checks that a draw has the right cardinality and in-range numbers.
    pub fn validate_draw(&self, draw: &Draw) -> Result<()> {
        if draw.numbers.len() != self.pick_count() {
            return Err(LottoError::InvalidDraw {
                sequence_id: draw.sequence_id,
                reason: format!(
                    "expected {} distinct numbers, got {}",
                    self.numbers_to_draw,
                    draw.numbers.len()
                ),
            });
        }
        if let Some(&bad) = draw.numbers.iter().find(|&&n| !self.contains(n)) {
            return Err(LottoError::InvalidDraw {
                sequence_id: draw.sequence_id,
                reason: format!(
                    "number {bad} outside {}..={}",
                    self.min_number, self.max_number
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_valid() {
        let config = LotteryConfig::new(6, 1, 60, dec!(5.00)).unwrap();
        assert_eq!(config.range_size(), 60);
        assert_eq!(config.pick_count(), 6);
        assert!(config.contains(1));
        assert!(config.contains(60));
        assert!(!config.contains(0));
        assert!(!config.contains(61));
    }

    #[test]
    fn test_inverted_range() {
        let err = LotteryConfig::new(6, 60, 1, dec!(5)).unwrap_err();
        assert!(matches!(err, LottoError::InvalidConfig { .. }));
    }

    #[test]
    fn test_pick_count_exceeds_range() {
        assert!(LotteryConfig::new(11, 1, 10, dec!(1)).is_err());
        assert!(LotteryConfig::new(10, 1, 10, dec!(1)).is_ok());
    }

    #[test]
    fn test_zero_pick_count() {
        assert!(LotteryConfig::new(0, 1, 10, dec!(1)).is_err());
    }

    #[test]
    fn test_negative_cost() {
        assert!(LotteryConfig::new(6, 1, 60, dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_draw() {
        let config = LotteryConfig::new(3, 1, 10, dec!(1)).unwrap();
        assert!(config.validate_draw(&Draw::new(1, [1, 5, 10])).is_ok());

        let short = Draw::new(2, [1, 5]);
        assert!(matches!(
            config.validate_draw(&short),
            Err(LottoError::InvalidDraw { sequence_id: 2, .. })
        ));

        let out_of_range = Draw::new(3, [0, 5, 9]);
        assert!(config.validate_draw(&out_of_range).is_err());

        // Duplicates collapse in the set, so the count check catches them.
        let dup = Draw::new(4, [5, 5, 9]);
        assert!(config.validate_draw(&dup).is_err());
    }
}
