use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::entrant::Roster;
use crate::core::result::{GameResult, ResultLog, SideResult};
use crate::core::types::PlayerId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StandingsError {
    #[error("Standings requested as of round {0}; rounds must not be negative")]
    NegativeCutoff(i64),
}

/// Aggregate record of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// wins + 0.5 * ties
    pub score: f64,
    /// Cumulative score differential
    pub spread: i32,
    pub starts: u32,
    pub byes: u32,
}

impl PlayerRecord {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            wins: 0,
            losses: 0,
            ties: 0,
            score: 0.0,
            spread: 0,
            starts: 0,
            byes: 0,
        }
    }

    /// Fold one game, seen from this player's side
    pub fn absorb(&mut self, side: &SideResult<'_>) {
        let spread = side.spread();
        self.spread = self.spread.saturating_add(spread);
        match spread.cmp(&0) {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
        self.score = f64::from(self.wins) + 0.5 * f64::from(self.ties);
        if side.started {
            self.starts += 1;
        }
        if side.opponent.is_bye() {
            self.byes += 1;
        }
    }

    /// Losses counted the way scores are: ties are half a loss
    #[must_use]
    pub fn loss_score(&self) -> f64 {
        f64::from(self.losses) + 0.5 * f64::from(self.ties)
    }
}

/// Fold games into per-player records, in order of first appearance
pub fn fold_records<'a>(games: impl IntoIterator<Item = &'a GameResult>) -> Vec<PlayerRecord> {
    let mut records: Vec<PlayerRecord> = Vec::new();
    let mut index: HashMap<PlayerId, usize> = HashMap::new();

    for game in games {
        for side in [game.winner_side(), game.loser_side()] {
            let i = *index.entry(side.player.clone()).or_insert_with(|| {
                records.push(PlayerRecord::new(side.player.clone()));
                records.len() - 1
            });
            records[i].absorb(&side);
        }
    }

    records
}

/// Players ranked by score, then spread, then seed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    records: Vec<PlayerRecord>,
}

impl Standings {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self { records }
    }

    /// Pre-tournament standings: the roster in seed order with empty records
    pub fn seed_order(roster: &Roster) -> Self {
        Self {
            records: roster
                .entrants()
                .iter()
                .map(|e| PlayerRecord::new(e.id.clone()))
                .collect(),
        }
    }

    /// Standings as of the end of round `cutoff`
    ///
    /// Only entrants on the roster are ranked. Entrants with no games so far
    /// follow the ranked players in seed order.
    ///
    /// # Errors
    ///
    /// Returns `StandingsError::NegativeCutoff` if `cutoff` is negative.
    pub fn calculate(
        results: &ResultLog,
        roster: &Roster,
        cutoff: i64,
    ) -> Result<Self, StandingsError> {
        if cutoff < 0 {
            return Err(StandingsError::NegativeCutoff(cutoff));
        }
        if cutoff == 0 {
            return Ok(Self::seed_order(roster));
        }
        let cutoff = u32::try_from(cutoff).unwrap_or(u32::MAX);

        let mut ranked: Vec<PlayerRecord> = fold_records(results.through_round(cutoff))
            .into_iter()
            .filter(|r| roster.contains(&r.id))
            .collect();
        ranked.sort_by(|a, b| compare_records(a, b, roster));

        let newcomers: Vec<PlayerRecord> = roster
            .entrants()
            .iter()
            .filter(|e| !ranked.iter().any(|r| r.id == e.id))
            .map(|e| PlayerRecord::new(e.id.clone()))
            .collect();
        ranked.extend(newcomers);

        Ok(Self { records: ranked })
    }

    #[must_use]
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PlayerRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }

    /// Record at 1-based standing `position`
    #[must_use]
    pub fn at_position(&self, position: usize) -> Option<&PlayerRecord> {
        position.checked_sub(1).and_then(|i| self.records.get(i))
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.records.iter().find(|r| &r.id == id)
    }
}

/// Descending score, then descending spread, then ascending seed
pub fn compare_records(a: &PlayerRecord, b: &PlayerRecord, roster: &Roster) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(b.spread.cmp(&a.spread))
        .then(roster.seed_of(&a.id).cmp(&roster.seed_of(&b.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entrant::Entrant;

    fn roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .zip(1..)
                .map(|(n, seed)| Entrant::new(*n, 1500, seed))
                .collect(),
        )
    }

    #[test]
    fn test_round_zero_is_seed_order() {
        let roster = roster(&["a", "b", "c", "d"]);
        let mut log = ResultLog::default();
        log.push(GameResult::new(1, "d", 400, "a", 300, true));
        let s = Standings::calculate(&log, &roster, 0).unwrap();
        let ids: Vec<&str> = s.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(s.iter().all(|r| r.wins == 0 && r.spread == 0));
    }

    #[test]
    fn test_negative_cutoff_fails() {
        let roster = roster(&["a", "b"]);
        let log = ResultLog::default();
        assert_eq!(
            Standings::calculate(&log, &roster, -1),
            Err(StandingsError::NegativeCutoff(-1))
        );
    }

    #[test]
    fn test_sorted_by_score_then_spread() {
        let roster = roster(&["a", "b", "c", "d"]);
        let log = ResultLog::new(vec![
            GameResult::new(1, "c", 400, "a", 390, true),
            GameResult::new(1, "d", 500, "b", 300, false),
            GameResult::new(2, "c", 350, "d", 350, true),
            GameResult::new(2, "a", 450, "b", 400, false),
        ]);
        let s = Standings::calculate(&log, &roster, 2).unwrap();
        let ids: Vec<&str> = s.iter().map(|r| r.id.as_str()).collect();
        // d: 1.5 (+200), c: 1.5 (+10), a: 1 (+40), b: 0
        assert_eq!(ids, vec!["d", "c", "a", "b"]);
        let d = s.get(&"d".into()).unwrap();
        assert_eq!((d.wins, d.ties, d.losses), (1, 1, 0));
        assert!((d.score - 1.5).abs() < f64::EPSILON);
        assert_eq!(d.starts, 0);
        assert_eq!(s.get(&"c".into()).unwrap().starts, 2);
    }

    #[test]
    fn test_cutoff_ignores_later_rounds() {
        let roster = roster(&["a", "b"]);
        let log = ResultLog::new(vec![
            GameResult::new(1, "b", 400, "a", 300, true),
            GameResult::new(2, "a", 500, "b", 300, true),
        ]);
        let s = Standings::calculate(&log, &roster, 1).unwrap();
        assert_eq!(s.at_position(1).unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_newcomers_appended_in_seed_order_and_strangers_dropped() {
        let roster = roster(&["a", "b", "c", "d"]);
        let log = ResultLog::new(vec![
            GameResult::new(1, "c", 400, "a", 300, true),
            GameResult::new(1, "x", 400, "y", 300, true),
        ]);
        let s = Standings::calculate(&log, &roster, 1).unwrap();
        let ids: Vec<&str> = s.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_byes_counted_from_results() {
        let records = fold_records(&[GameResult::new(1, "a", 50, "Bye", 0, false)]);
        assert_eq!(records[0].byes, 1);
        assert_eq!(records[1].byes, 0);
    }
}
