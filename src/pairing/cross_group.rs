//! Charlottesville pairing: a round robin between two fixed halves of the field.
//!
//! Seeds are dealt into two groups in snake order:
//!
//! ```text
//! group 1: 1, 4, 5, 8, 9, 12, ...
//! group 2: 2, 3, 6, 7, 10, 11, ...
//! ```
//!
//! Group 2 is reversed (so seeds 1 and 2 meet last) and rotated one place per
//! round; each player meets everyone in the other group once over as many
//! rounds as a group has members.

use crate::core::entrant::Roster;
use crate::core::types::{Pairing, PlayerId};
use crate::pairing::{ensure_even, PairingError};

/// Split seeds into the two Charlottesville groups
#[must_use]
pub fn split(roster: &Roster) -> (Vec<PlayerId>, Vec<PlayerId>) {
    let mut fixed = Vec::with_capacity(roster.len() / 2);
    let mut rotating = Vec::with_capacity(roster.len() / 2);
    for (i, entrant) in roster.entrants().iter().enumerate() {
        let seed = i + 1;
        if seed % 4 == 0 || seed % 4 == 1 {
            fixed.push(entrant.id.clone());
        } else {
            rotating.push(entrant.id.clone());
        }
    }
    (fixed, rotating)
}

/// Pairings for `round` (1-based)
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd roster.
pub fn pair(roster: &Roster, round: u32) -> Result<Vec<Pairing>, PairingError> {
    ensure_even(roster.len())?;
    let (fixed, mut rotating) = split(roster);
    if rotating.is_empty() {
        return Ok(Vec::new());
    }

    rotating.reverse();
    let shift = round.saturating_sub(1) as usize % rotating.len();
    rotating.rotate_left(shift);

    Ok(fixed
        .into_iter()
        .zip(rotating)
        .map(|(a, b)| Pairing::new(a, b))
        .collect())
}
