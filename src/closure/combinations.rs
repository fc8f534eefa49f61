//! k-subset enumeration over pool indices.
//!
//! Subsets are encoded as `u32` bitmasks (bit `i` set ⇔ pool element `i`
//! present), which bounds pools to 32 elements and turns overlap counting
//! into a single `count_ones`.

/// Binomial coefficient `C(n, r)`, saturating at `u64::MAX`.
pub fn binomial(n: u64, r: u64) -> u64 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut acc: u128 = 1;
    for i in 0..r {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    acc as u64
}

/// All `r`-subsets of `{0, .., n-1}` as bitmasks, in lexicographic order of
/// their sorted index lists.
///
/// # Panics
/// Panics if `n > 32`.
pub fn combination_masks(n: usize, r: usize) -> Vec<u32> {
    assert!(n <= 32, "bitmask combinations support at most 32 elements");
    if r > n {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(binomial(n as u64, r as u64) as usize);
    let mut idx: Vec<usize> = (0..r).collect();
    loop {
        out.push(idx.iter().fold(0u32, |mask, &i| mask | (1 << i)));

        // Rightmost position that can still advance.
        let mut i = r;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] != i + n - r {
                break;
            }
        }
        idx[i] += 1;
        for j in i + 1..r {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Maps a bitmask back to the pool values it selects, ascending when
/// `pool` is ascending.
pub fn mask_to_values(mask: u32, pool: &[u32]) -> Vec<u32> {
    pool.iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, &v)| v)
        .collect()
}
