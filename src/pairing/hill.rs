//! King and queen of the hill: pairing strictly by current rank.

use crate::core::types::{Pairing, PlayerId};
use crate::pairing::{ensure_even, pair_consecutive, PairingError};

/// 1-2, 3-4, 5-6, ...
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd pool.
pub fn pair_king(ids: &[PlayerId]) -> Result<Vec<Pairing>, PairingError> {
    ensure_even(ids.len())?;
    Ok(pair_consecutive(ids))
}

/// 1-3 and 2-4 within each block of four
///
/// When the pool size is not a multiple of four, the last six players pair
/// 1-4, 2-5, 3-6 instead. A pool of two just plays each other.
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd pool.
pub fn pair_queen(ids: &[PlayerId]) -> Result<Vec<Pairing>, PairingError> {
    let n = ids.len();
    ensure_even(n)?;
    if n == 2 {
        return Ok(pair_consecutive(ids));
    }

    let tail = if n % 4 == 2 { 6 } else { 0 };
    let blocks = n - tail;

    let pair = |a: usize, b: usize| Pairing::new(ids[a].clone(), ids[b].clone());
    let mut pairings = Vec::with_capacity(n / 2);
    for i in (0..blocks).step_by(4) {
        pairings.push(pair(i, i + 2));
        pairings.push(pair(i + 1, i + 3));
    }
    if tail > 0 {
        for i in blocks..blocks + 3 {
            pairings.push(pair(i, i + 3));
        }
    }
    Ok(pairings)
}
