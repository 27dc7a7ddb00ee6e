use std::collections::{HashMap, HashSet};

use crate::core::types::{Pairing, PlayerId};

/// Tracks who goes first and decides it for new pairings
///
/// Decision order for `add(a, b, round)`:
///
/// 1. the bye always starts
/// 2. a player pinned to start in `round` starts
/// 3. the player with fewer starts so far starts
/// 4. if the two met before, whoever went second last time starts
/// 5. otherwise whoever started least recently starts (`a` on a tie)
#[derive(Debug, Clone, Default)]
pub struct StartsTracker {
    starts: HashMap<PlayerId, u32>,
    /// Most recent round each player started
    recent: HashMap<PlayerId, u32>,
    /// For (a, b): did a start the last time they met?
    head_to_head: HashMap<(PlayerId, PlayerId), bool>,
    /// (round, player) pinned to start
    pinned: HashSet<(u32, PlayerId)>,
}

impl StartsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `id` to start whatever game it plays in `round`
    pub fn pin(&mut self, round: u32, id: PlayerId) {
        self.pinned.insert((round, id));
    }

    #[must_use]
    pub fn starts(&self, id: &PlayerId) -> u32 {
        self.starts.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn last_started(&self, id: &PlayerId) -> u32 {
        self.recent.get(id).copied().unwrap_or(0)
    }

    /// Did `a` start the most recent game against `b`?
    #[must_use]
    pub fn started_against(&self, a: &PlayerId, b: &PlayerId) -> Option<bool> {
        self.head_to_head.get(&(a.clone(), b.clone())).copied()
    }

    fn record(&mut self, a: &PlayerId, b: &PlayerId, round: u32, a_starts: bool) {
        self.starts.entry(a.clone()).or_insert(0);
        self.starts.entry(b.clone()).or_insert(0);
        let (starter, other) = if a_starts { (a, b) } else { (b, a) };
        *self.starts.entry(starter.clone()).or_insert(0) += 1;
        self.recent.insert(starter.clone(), round);
        self.head_to_head
            .insert((starter.clone(), other.clone()), true);
        self.head_to_head
            .insert((other.clone(), starter.clone()), false);
    }

    /// Record a pairing whose starter is already known (e.g. a played game)
    pub fn register(&mut self, pairing: &Pairing, round: u32) {
        self.record(
            &pairing.first.player,
            &pairing.second.player,
            round,
            pairing.first.starts,
        );
    }

    /// Decide who starts between `a` and `b` in `round` and record it
    ///
    /// Returns true if `a` starts.
    pub fn add(&mut self, a: &PlayerId, b: &PlayerId, round: u32) -> bool {
        let a_starts = self.decide(a, b, round);
        self.record(a, b, round, a_starts);
        a_starts
    }

    fn decide(&self, a: &PlayerId, b: &PlayerId, round: u32) -> bool {
        if a.is_bye() {
            return true;
        }
        if b.is_bye() {
            return false;
        }
        if self.pinned.contains(&(round, a.clone())) {
            return true;
        }
        if self.pinned.contains(&(round, b.clone())) {
            return false;
        }
        let (starts_a, starts_b) = (self.starts(a), self.starts(b));
        if starts_a != starts_b {
            return starts_a < starts_b;
        }
        match self.started_against(a, b) {
            Some(a_started_last) => !a_started_last,
            None => self.last_started(a) <= self.last_started(b),
        }
    }

    /// Fill in `starts` on both seats of `pairing` for `round`
    pub fn assign(&mut self, pairing: &mut Pairing, round: u32) {
        if let Some(pinned) = &pairing.pinned_starter {
            self.pin(round, pinned.clone());
        }
        let first_starts = self.add(&pairing.first.player, &pairing.second.player, round);
        pairing.first.starts = first_starts;
        pairing.second.starts = !first_starts;
    }
}
