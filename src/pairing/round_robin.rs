//! Round robin by the circle method.
//!
//! Player 0 stays put while the other `n - 1` rotate one step per round.
//! The rotated sequence is folded in half: the first half plays the
//! reversed second half.

use crate::core::types::{Pairing, PlayerId};
use crate::pairing::{ensure_even, PairingError};

/// Index pairs for round `r` (0-based) of an `n`-player round robin
#[must_use]
pub fn circle(n: usize, r: usize) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }
    let others: Vec<usize> = (1..n).collect();
    let start = (n - 1) - (r % (n - 1));

    let mut rotated = Vec::with_capacity(n);
    rotated.push(0);
    rotated.extend_from_slice(&others[start..]);
    rotated.extend_from_slice(&others[..start]);

    let half = n / 2;
    let (top, bottom) = rotated.split_at(half);
    top.iter()
        .copied()
        .zip(bottom.iter().rev().copied())
        .collect()
}

/// Pairings for cycle `position` (1-based) of a round robin over `field`
///
/// Positions past `n - 1` wrap around to the start of the cycle.
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd field.
pub fn pair(field: &[PlayerId], position: u32) -> Result<Vec<Pairing>, PairingError> {
    ensure_even(field.len())?;
    let r = position.saturating_sub(1) as usize;
    Ok(circle(field.len(), r)
        .into_iter()
        .map(|(a, b)| Pairing::new(field[a].clone(), field[b].clone()))
        .collect())
}

/// Double round robin: positions 1 and 2 repeat round 1, 3 and 4 round 2, ...
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd field.
pub fn pair_double(field: &[PlayerId], position: u32) -> Result<Vec<Pairing>, PairingError> {
    pair(field, position.div_ceil(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<PlayerId> {
        (0..n).map(|i| PlayerId::new(format!("p{i}"))).collect()
    }

    #[test]
    fn test_four_player_first_round() {
        assert_eq!(circle(4, 0), vec![(0, 3), (1, 2)]);
    }

    #[test]
    fn test_every_pair_meets_once() {
        for n in [2, 4, 6, 10, 16] {
            let mut seen = HashSet::new();
            for r in 0..n - 1 {
                let round = circle(n, r);
                assert_eq!(round.len(), n / 2);
                let mut players: Vec<usize> = round.iter().flat_map(|&(a, b)| [a, b]).collect();
                players.sort_unstable();
                assert_eq!(players, (0..n).collect::<Vec<_>>());
                for (a, b) in round {
                    assert!(seen.insert((a.min(b), a.max(b))), "repeat in n={n}");
                }
            }
            assert_eq!(seen.len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_double_round_robin_repeats_consecutively() {
        let field = ids(6);
        assert_eq!(pair_double(&field, 1), pair(&field, 1));
        assert_eq!(pair_double(&field, 2), pair(&field, 1));
        assert_eq!(pair_double(&field, 3), pair(&field, 2));
        assert_ne!(pair(&field, 1), pair(&field, 2));
    }

    #[test]
    fn test_position_wraps() {
        let field = ids(4);
        assert_eq!(pair(&field, 4), pair(&field, 1));
    }

    #[test]
    fn test_odd_field() {
        assert_eq!(pair(&ids(5), 1), Err(PairingError::OddPool(5)));
    }
}
