//! Random pairing, with and without repeat avoidance.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::types::{Pairing, PlayerId};
use crate::matching::{max_weight_matching, Edge, MatchMode};
use crate::pairing::{ensure_even, pair_consecutive, PairingContext, PairingError};

/// Shuffle the pool and pair neighbours
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd pool.
pub fn pair_shuffled<R: Rng + ?Sized>(
    ids: &[PlayerId],
    rng: &mut R,
) -> Result<Vec<Pairing>, PairingError> {
    ensure_even(ids.len())?;
    let mut shuffled = ids.to_vec();
    shuffled.shuffle(rng);
    Ok(pair_consecutive(&shuffled))
}

/// Random pairing with the fewest possible repeat encounters
///
/// Every pair of players is an edge. An encounter costs more than the
/// largest possible sum of random weights over a full pairing, so the
/// matching minimises total repeats first and is random among the ties.
/// Before any games have been played this is plain random pairing.
///
/// # Errors
///
/// Returns `PairingError::OddPool` for an odd pool.
pub fn pair_avoiding_repeats(
    ids: &[PlayerId],
    ctx: &mut PairingContext<'_>,
) -> Result<Vec<Pairing>, PairingError> {
    if ctx.source_round == 0 {
        return pair_shuffled(ids, &mut *ctx.rng);
    }
    ensure_even(ids.len())?;

    let jitter = ctx.config.random.jitter.max(1);
    let half = i64::try_from(ids.len() / 2).unwrap_or(i64::MAX);
    let penalty = jitter.saturating_mul(half.saturating_add(1));

    let mut edges = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
    for (u, a) in ids.iter().enumerate() {
        for (v, b) in ids.iter().enumerate().skip(u + 1) {
            let reps = i64::from(ctx.repeats.get(a, b));
            let noise = ctx.rng.gen_range(0..jitter);
            edges.push(Edge::new(u, v, -(penalty.saturating_mul(reps) + noise)));
        }
    }

    let matching = max_weight_matching(ids.len(), &edges, MatchMode::MaxCardinality);
    let pairings: Vec<Pairing> = matching
        .pairs()
        .into_iter()
        .map(|(u, v)| Pairing::new(ids[u].clone(), ids[v].clone()))
        .collect();

    let repeats: u32 = pairings
        .iter()
        .map(|p| ctx.repeats.get(&p.first.player, &p.second.player))
        .sum();
    debug!(round = ctx.round, repeats, "Random no-repeat pairing");

    Ok(pairings)
}
