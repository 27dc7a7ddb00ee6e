//! Quads: groups of four playing a three-round round robin.
//!
//! When the field is two short of a multiple of four, the last six players
//! form a hex playing three rounds of an incomplete round robin.

use crate::core::types::{Pairing, PlayerId};
use crate::pairing::{ensure_even, PairingError, QuadLayout};

/// Who plays whom inside a quad, per cycle position
const QUAD_ROUNDS: [[(usize, usize); 2]; 3] = [[(0, 3), (1, 2)], [(0, 2), (1, 3)], [(0, 1), (2, 3)]];

/// Who plays whom inside a hex, per cycle position
const HEX_ROUNDS: [[(usize, usize); 3]; 3] = [
    [(0, 1), (2, 3), (4, 5)],
    [(0, 2), (3, 4), (1, 5)],
    [(0, 3), (1, 4), (2, 5)],
];

/// Number of players that go into quads; the rest (zero or six) form a hex
fn quad_span(n: usize) -> Result<usize, PairingError> {
    ensure_even(n)?;
    if n % 4 == 0 {
        Ok(n)
    } else if n >= 6 {
        Ok(n - 6)
    } else {
        Err(PairingError::PoolTooSmall {
            system: "quad",
            needed: 4,
            got: n,
        })
    }
}

/// Split `field` into groups; a trailing hex is the last group
///
/// # Errors
///
/// Returns an error for an odd field or a field of two.
pub fn groups(field: &[PlayerId], layout: QuadLayout) -> Result<Vec<Vec<PlayerId>>, PairingError> {
    let span = quad_span(field.len())?;
    let count = span / 4;

    let mut groups: Vec<Vec<PlayerId>> = match layout {
        QuadLayout::Clustered => field[..span].chunks(4).map(<[PlayerId]>::to_vec).collect(),
        QuadLayout::Distributed => deal(&field[..span], count),
        QuadLayout::Evans => {
            let mut snake = Vec::with_capacity(span);
            for (i, slice) in field[..span].chunks(count.max(1)).enumerate() {
                if i % 2 == 1 {
                    snake.extend(slice.iter().rev().cloned());
                } else {
                    snake.extend_from_slice(slice);
                }
            }
            deal(&snake, count)
        }
    };

    if span < field.len() {
        groups.push(field[span..].to_vec());
    }
    Ok(groups)
}

/// Player `i` goes to group `i % count`
fn deal(players: &[PlayerId], count: usize) -> Vec<Vec<PlayerId>> {
    let mut groups = vec![Vec::with_capacity(4); count];
    for (i, p) in players.iter().enumerate() {
        groups[i % count].push(p.clone());
    }
    groups
}

/// Pairings for cycle `position` (1-based; wraps every three rounds)
///
/// # Errors
///
/// Returns an error for an odd field or a field of two.
pub fn pair(
    field: &[PlayerId],
    layout: QuadLayout,
    position: u32,
) -> Result<Vec<Pairing>, PairingError> {
    let slot = position.saturating_sub(1) as usize % 3;
    let mut pairings = Vec::with_capacity(field.len() / 2);
    for group in groups(field, layout)? {
        let table: &[(usize, usize)] = if group.len() == 4 {
            &QUAD_ROUNDS[slot]
        } else {
            &HEX_ROUNDS[slot]
        };
        for &(a, b) in table {
            pairings.push(Pairing::new(group[a].clone(), group[b].clone()));
        }
    }
    Ok(pairings)
}
