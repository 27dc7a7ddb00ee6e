use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{Pairing, PlayerId};

/// A single recorded game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub round: u32,
    pub winner: PlayerId,
    pub winner_score: i32,
    pub loser: PlayerId,
    pub loser_score: i32,
    /// Did the winner go first?
    pub winner_started: bool,
}

/// One player's view of a game
#[derive(Debug, Clone, Copy)]
pub struct SideResult<'a> {
    pub player: &'a PlayerId,
    pub score: i32,
    pub opponent: &'a PlayerId,
    pub opponent_score: i32,
    pub started: bool,
}

impl SideResult<'_> {
    #[must_use]
    pub fn spread(&self) -> i32 {
        self.score.saturating_sub(self.opponent_score)
    }
}

impl GameResult {
    pub fn new(
        round: u32,
        winner: impl Into<String>,
        winner_score: i32,
        loser: impl Into<String>,
        loser_score: i32,
        winner_started: bool,
    ) -> Self {
        Self {
            round,
            winner: PlayerId::new(winner),
            winner_score,
            loser: PlayerId::new(loser),
            loser_score,
            winner_started,
        }
    }

    #[must_use]
    pub fn winner_side(&self) -> SideResult<'_> {
        SideResult {
            player: &self.winner,
            score: self.winner_score,
            opponent: &self.loser,
            opponent_score: self.loser_score,
            started: self.winner_started,
        }
    }

    #[must_use]
    pub fn loser_side(&self) -> SideResult<'_> {
        SideResult {
            player: &self.loser,
            score: self.loser_score,
            opponent: &self.winner,
            opponent_score: self.winner_score,
            started: !self.winner_started,
        }
    }

    /// Winner's margin; zero for a tie
    #[must_use]
    pub fn spread(&self) -> i32 {
        self.winner_score.saturating_sub(self.loser_score)
    }

    /// Combined score of both players
    #[must_use]
    pub fn total(&self) -> i32 {
        self.winner_score.saturating_add(self.loser_score)
    }

    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winner_score == self.loser_score
    }

    #[must_use]
    pub fn involves_bye(&self) -> bool {
        self.winner.is_bye() || self.loser.is_bye()
    }

    /// The pairing that produced this game, with starts filled in
    #[must_use]
    pub fn to_pairing(&self) -> Pairing {
        let mut pairing = Pairing::new(self.winner.clone(), self.loser.clone());
        pairing.first.starts = self.winner_started;
        pairing.second.starts = !self.winner_started;
        pairing
    }
}

/// The full result history of a tournament
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLog {
    pub results: Vec<GameResult>,
}

impl ResultLog {
    pub fn new(results: Vec<GameResult>) -> Self {
        Self { results }
    }

    pub fn push(&mut self, result: GameResult) {
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = GameResult>) {
        self.results.extend(results);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Rounds that have at least one recorded game
    #[must_use]
    pub fn rounds(&self) -> BTreeSet<u32> {
        self.results.iter().map(|r| r.round).collect()
    }

    /// Highest round with a recorded game, or 0 before the first game
    #[must_use]
    pub fn last_round(&self) -> u32 {
        self.results.iter().map(|r| r.round).max().unwrap_or(0)
    }

    /// Games recorded for `round`, in input order
    pub fn games_in_round(&self, round: u32) -> impl Iterator<Item = &GameResult> {
        self.results.iter().filter(move |r| r.round == round)
    }

    /// Games recorded up to and including `round`
    pub fn through_round(&self, round: u32) -> impl Iterator<Item = &GameResult> {
        self.results.iter().filter(move |r| r.round <= round)
    }
}
