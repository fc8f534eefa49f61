use std::collections::BTreeSet;

/// One historical drawing.
///
/// Owned by the external draw store. Numbers are kept as an ordered set so
/// duplicate values cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Draw {
    /// Monotonic identifier assigned by the draw source.
    pub sequence_id: u64,

    /// Winning numbers.
    pub numbers: BTreeSet<u32>,
}

impl Draw {
    pub fn new(sequence_id: u64, numbers: impl IntoIterator<Item = u32>) -> Self {
        Self {
            sequence_id,
            numbers: numbers.into_iter().collect(),
        }
    }

    /// Sum of the drawn numbers.
    pub fn sum(&self) -> u64 {
        self.numbers.iter().map(|&n| n as u64).sum()
    }

    /// How many drawn numbers are odd.
    pub fn odd_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| n % 2 == 1).count()
    }
}
