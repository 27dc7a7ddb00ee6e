//! Pairings pinned by the tournament director, and the bye.
//!
//! Pinned players and the bye are taken out of the pool before a pairing
//! system runs; the resulting pairs are appended to its output afterwards.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::core::standings::{PlayerRecord, Standings};
use crate::core::types::{Pairing, PlayerId};
use crate::pairing::PairingError;
use crate::tracking::ByeTracker;
use crate::utils::validation::{parse_standing_ref, strip_display_suffix};

/// A player named directly, or by 1-based position in the current standings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    Id(PlayerId),
    Standing(usize),
}

impl PlayerRef {
    /// Parse `#N` as a standing reference, anything else as a player id.
    /// A trailing display suffix such as ` (#3)` is dropped.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim_start().starts_with('#') {
            return parse_standing_ref(text).map(Self::Standing);
        }
        let name = strip_display_suffix(text);
        if name.is_empty() {
            None
        } else {
            Some(Self::Id(PlayerId::new(name)))
        }
    }

    /// Resolve against `standings`
    ///
    /// # Errors
    ///
    /// Returns `PairingError::StandingOutOfRange` for a position past the end
    /// of the standings.
    pub fn resolve(&self, standings: &Standings) -> Result<PlayerId, PairingError> {
        match self {
            Self::Id(id) => Ok(id.clone()),
            Self::Standing(pos) => standings
                .at_position(*pos)
                .map(|r| r.id.clone())
                .ok_or(PairingError::StandingOutOfRange(*pos)),
        }
    }
}

impl std::fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Standing(pos) => write!(f, "#{pos}"),
        }
    }
}

/// One pinned pair for a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPairing {
    pub first: PlayerRef,
    pub second: PlayerRef,
    /// Player who must start this game
    pub starter: Option<PlayerRef>,
}

impl FixedPairing {
    pub fn new(first: PlayerRef, second: PlayerRef) -> Self {
        Self {
            first,
            second,
            starter: None,
        }
    }

    #[must_use]
    pub fn with_starter(mut self, starter: PlayerRef) -> Self {
        self.starter = Some(starter);
        self
    }
}

/// Fixed pairings for every round
#[derive(Debug, Clone, Default)]
pub struct FixedPairingBook {
    rounds: HashMap<u32, Vec<FixedPairing>>,
}

impl FixedPairingBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, pairing: FixedPairing) {
        self.rounds.entry(round).or_default().push(pairing);
    }

    /// Pins for `round`; empty if there are none
    #[must_use]
    pub fn for_round(&self, round: u32) -> &[FixedPairing] {
        self.rounds
            .get(&round)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Starters named by id, as `(round, player)`
    pub fn pinned_starters(&self) -> impl Iterator<Item = (u32, PlayerId)> + '_ {
        self.rounds.iter().flat_map(|(&round, pins)| {
            pins.iter().filter_map(move |p| match &p.starter {
                Some(PlayerRef::Id(id)) => Some((round, id.clone())),
                _ => None,
            })
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.values().all(Vec::is_empty)
    }
}

/// The pool left for automatic pairing, and the pairs taken out of it
#[derive(Debug, Clone)]
pub struct Resolution {
    pub pool: Vec<PlayerRecord>,
    pub pinned: Vec<Pairing>,
}

/// Take pinned pairs and the bye out of `standings`
///
/// References are resolved against `standings`. A pin whose two sides name
/// the same player is ignored. If a bye is in the remaining pool it is
/// paired with the player who has had the fewest byes, then the lowest
/// score, then the lowest spread, then the lowest standing.
///
/// # Errors
///
/// Returns an error if a reference cannot be resolved, names a player who is
/// not in the standings, or names a player already pinned this round.
pub fn resolve(
    standings: &Standings,
    fixed: &[FixedPairing],
    byes: &ByeTracker,
) -> Result<Resolution, PairingError> {
    let mut removed: HashSet<PlayerId> = HashSet::new();
    let mut pinned = Vec::new();

    for pin in fixed {
        let first = pin.first.resolve(standings)?;
        let second = pin.second.resolve(standings)?;
        if first == second {
            continue;
        }
        for id in [&first, &second] {
            if standings.get(id).is_none() {
                return Err(PairingError::UnknownPlayer(id.to_string()));
            }
            if !removed.insert(id.clone()) {
                return Err(PairingError::DuplicatePin(id.to_string()));
            }
        }
        let starter = match &pin.starter {
            Some(r) => Some(r.resolve(standings)?),
            None => None,
        };
        pinned.push(Pairing::new(first, second).with_pinned_starter(starter));
    }

    let mut pool: Vec<PlayerRecord> = standings
        .iter()
        .filter(|r| !removed.contains(&r.id))
        .cloned()
        .collect();

    if let Some(bye_pairing) = pair_bye(&pool, byes) {
        pool.retain(|r| !bye_pairing.involves(&r.id));
        pinned.push(bye_pairing);
    }

    Ok(Resolution { pool, pinned })
}

/// Pair the bye in `pool` with its most deserving opponent
#[must_use]
pub fn pair_bye(pool: &[PlayerRecord], byes: &ByeTracker) -> Option<Pairing> {
    let bye = pool.iter().find(|r| r.id.is_bye())?;

    // Later standing wins the final tie-break, so walk the pool bottom-up.
    let candidate = pool
        .iter()
        .rev()
        .filter(|r| !r.id.is_bye())
        .min_by(|a, b| {
            byes.get(&a.id)
                .cmp(&byes.get(&b.id))
                .then(a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
                .then(a.spread.cmp(&b.spread))
        })?;

    debug!(player = %candidate.id, byes = byes.get(&candidate.id), "Assigned bye");
    Some(Pairing::new(bye.id.clone(), candidate.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, wins: u32, spread: i32) -> PlayerRecord {
        let mut r = PlayerRecord::new(PlayerId::new(id));
        r.wins = wins;
        r.score = f64::from(wins);
        r.spread = spread;
        r
    }

    fn standings() -> Standings {
        Standings::new(vec![
            record("amy", 3, 200),
            record("ben", 2, 50),
            record("cat", 1, -40),
            record("dan", 1, -60),
            record("eve", 0, -150),
            record("bye", 0, 0),
        ])
    }

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn test_parse_refs() {
        assert_eq!(PlayerRef::parse("#3"), Some(PlayerRef::Standing(3)));
        assert_eq!(PlayerRef::parse("amy (#1)"), Some(PlayerRef::Id(id("amy"))));
        assert_eq!(PlayerRef::parse(" ben "), Some(PlayerRef::Id(id("ben"))));
        assert_eq!(PlayerRef::parse("#x"), None);
        assert_eq!(PlayerRef::parse(""), None);
    }

    #[test]
    fn test_standing_refs_resolve_against_current_standings() {
        let fixed = vec![FixedPairing::new(PlayerRef::Standing(1), PlayerRef::Standing(2))];
        let res = resolve(&standings(), &fixed, &ByeTracker::new()).unwrap();
        assert_eq!(res.pinned[0], Pairing::new(id("amy"), id("ben")));
        assert!(!res.pool.iter().any(|r| r.id == id("amy") || r.id == id("ben")));
    }

    #[test]
    fn test_same_player_pin_is_ignored() {
        let fixed = vec![FixedPairing::new(
            PlayerRef::Standing(1),
            PlayerRef::Id(id("amy")),
        )];
        let res = resolve(&standings(), &fixed, &ByeTracker::new()).unwrap();
        // only the bye pairing
        assert_eq!(res.pinned.len(), 1);
        assert!(res.pool.iter().any(|r| r.id == id("amy")));
    }

    #[test]
    fn test_bye_goes_to_lowest_player() {
        let res = resolve(&standings(), &[], &ByeTracker::new()).unwrap();
        assert_eq!(res.pinned, vec![Pairing::new(id("bye"), id("eve"))]);
        assert_eq!(res.pool.len(), 4);
    }

    #[test]
    fn test_bye_prefers_fewest_byes() {
        let mut byes = ByeTracker::new();
        byes.add(&id("eve"));
        let res = resolve(&standings(), &[], &byes).unwrap();
        // cat and dan share a score; dan has the lower spread
        assert_eq!(res.pinned, vec![Pairing::new(id("bye"), id("dan"))]);
    }

    #[test]
    fn test_full_tie_goes_to_lower_standing() {
        let pool = vec![record("amy", 0, 0), record("ben", 0, 0), record("bye", 0, 0)];
        let pairing = pair_bye(&pool, &ByeTracker::new()).unwrap();
        assert_eq!(pairing.second.player, id("ben"));
    }

    #[test]
    fn test_pinned_player_cannot_get_bye() {
        let fixed = vec![FixedPairing::new(
            PlayerRef::Id(id("eve")),
            PlayerRef::Id(id("amy")),
        )];
        let res = resolve(&standings(), &fixed, &ByeTracker::new()).unwrap();
        assert_eq!(res.pinned[1], Pairing::new(id("bye"), id("dan")));
    }

    #[test]
    fn test_bad_references() {
        let out_of_range = vec![FixedPairing::new(PlayerRef::Standing(9), PlayerRef::Standing(1))];
        assert_eq!(
            resolve(&standings(), &out_of_range, &ByeTracker::new()).unwrap_err(),
            PairingError::StandingOutOfRange(9)
        );

        let unknown = vec![FixedPairing::new(PlayerRef::Id(id("zed")), PlayerRef::Standing(1))];
        assert!(matches!(
            resolve(&standings(), &unknown, &ByeTracker::new()),
            Err(PairingError::UnknownPlayer(_))
        ));

        let twice = vec![
            FixedPairing::new(PlayerRef::Standing(1), PlayerRef::Standing(2)),
            FixedPairing::new(PlayerRef::Id(id("amy")), PlayerRef::Standing(3)),
        ];
        assert_eq!(
            resolve(&standings(), &twice, &ByeTracker::new()).unwrap_err(),
            PairingError::DuplicatePin("amy".to_string())
        );
    }

    #[test]
    fn test_starter_reference_is_resolved() {
        let fixed = vec![FixedPairing::new(PlayerRef::Standing(1), PlayerRef::Standing(2))
            .with_starter(PlayerRef::Standing(2))];
        let res = resolve(&standings(), &fixed, &ByeTracker::new()).unwrap();
        assert_eq!(res.pinned[0].pinned_starter, Some(id("ben")));
    }

    #[test]
    fn test_book_lookup() {
        let mut book = FixedPairingBook::new();
        assert!(book.is_empty());
        book.push(
            2,
            FixedPairing::new(PlayerRef::Id(id("amy")), PlayerRef::Standing(4))
                .with_starter(PlayerRef::Id(id("amy"))),
        );
        assert_eq!(book.for_round(2).len(), 1);
        assert!(book.for_round(3).is_empty());
        assert_eq!(book.pinned_starters().collect::<Vec<_>>(), vec![(2, id("amy"))]);
    }
}
