//! Set-based genetic operators for fixed-size games of unique numbers.
//!
//! Games are sets, not permutations, so position-preserving crossovers
//! (OX, PMX) do not apply. Both operators here keep the invariant that a
//! game holds exactly `numbers_to_draw` distinct in-range numbers.
//!
//! - [`crossover`]: union of parent sets, shuffled, sliced into two children
//! - [`mutate`]: replace one number with an unused one
//! - [`complete_unique`]: bounded completion shared with the seeder

use crate::error::{LottoError, Result};
use crate::lottery::LotteryConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Tops `chosen` up to `numbers_to_draw` numbers, never picking a value in
/// `excluded`.
///
/// Samples uniformly from the range with at most `3 × (max − min)`
/// rejection attempts, then falls back to shuffling the explicit list of
/// unused numbers. Never loops unboundedly.
///
/// # Errors
///
/// [`LottoError::SeedingExhausted`] when the range has fewer unused numbers
/// than still needed; `chosen` is left untouched.
pub fn complete_unique<R: Rng>(
    chosen: &mut BTreeSet<u32>,
    config: &LotteryConfig,
    excluded: &BTreeSet<u32>,
    rng: &mut R,
) -> Result<()> {
    let target = config.pick_count();
    if chosen.len() >= target {
        return Ok(());
    }
    let available = config
        .numbers()
        .filter(|n| !chosen.contains(n) && !excluded.contains(n))
        .count();
    if available < target - chosen.len() {
        return Err(LottoError::SeedingExhausted {
            needed: target - chosen.len(),
            available,
        });
    }

    let max_attempts = 3 * config.max_number.saturating_sub(config.min_number) as usize;
    let mut attempts = 0;
    while chosen.len() < target && attempts < max_attempts {
        let n = rng.random_range(config.min_number..=config.max_number);
        if !excluded.contains(&n) {
            chosen.insert(n);
        }
        attempts += 1;
    }

    if chosen.len() < target {
        let needed = target - chosen.len();
        let mut remaining: Vec<u32> = config
            .numbers()
            .filter(|n| !chosen.contains(n) && !excluded.contains(n))
            .collect();
        let (picked, _) = remaining.partial_shuffle(rng, needed);
        chosen.extend(picked.iter().copied());
    }

    Ok(())
}

/// Recombines two parent games.
///
/// The union of both parents is shuffled; child A takes the first
/// `numbers_to_draw` values and child B the last, which differ whenever the
/// union is larger than one game. A union shorter than a game is repaired
/// with uniformly random unused numbers.
pub fn crossover<R: Rng>(
    parent1: &[u32],
    parent2: &[u32],
    config: &LotteryConfig,
    rng: &mut R,
) -> Result<(Vec<u32>, Vec<u32>)> {
    let k = config.pick_count();
    let mut union: Vec<u32> = parent1
        .iter()
        .chain(parent2)
        .copied()
        .filter(|&n| config.contains(n))
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect();
    union.shuffle(rng);

    let head = k.min(union.len());
    let mut child_a: BTreeSet<u32> = union[..head].iter().copied().collect();
    let mut child_b: BTreeSet<u32> = union[union.len() - head..].iter().copied().collect();

    let none = BTreeSet::new();
    complete_unique(&mut child_a, config, &none, rng)?;
    complete_unique(&mut child_b, config, &none, rng)?;

    Ok((child_a.into_iter().collect(), child_b.into_iter().collect()))
}

/// Replaces exactly one randomly chosen number with a value from the range
/// that the game does not already hold.
///
/// Returns the game unchanged when the range has no free value.
pub fn mutate<R: Rng>(genes: &[u32], config: &LotteryConfig, rng: &mut R) -> Vec<u32> {
    if genes.is_empty() || config.range_size() <= genes.len() as u64 {
        return genes.to_vec();
    }

    let current: BTreeSet<u32> = genes.iter().copied().collect();
    let idx = rng.random_range(0..genes.len());
    let mut kept: BTreeSet<u32> = current.iter().copied().filter(|&g| g != genes[idx]).collect();

    match complete_unique(&mut kept, config, &current, rng) {
        Ok(()) => kept.into_iter().collect(),
        Err(_) => genes.to_vec(),
    }
}
