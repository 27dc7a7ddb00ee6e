//! Top-10 game lists.

use serde::Serialize;

use crate::core::result::{GameResult, ResultLog};

/// Entries per list
pub const LIST_LENGTH: usize = 10;

/// A titled, numbered list of games
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsList {
    pub title: &'static str,
    pub entries: Vec<String>,
}

impl StatsList {
    fn new<'a>(
        title: &'static str,
        games: impl IntoIterator<Item = &'a GameResult>,
        show: fn(&GameResult) -> String,
    ) -> Self {
        let entries = games
            .into_iter()
            .take(LIST_LENGTH)
            .enumerate()
            .map(|(i, g)| format!("{}. {}", i + 1, show(g)))
            .collect();
        Self { title, entries }
    }
}

/// Game records over a whole event; games against the bye are left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub lists: Vec<StatsList>,
}

fn sorted<'a>(games: &[&'a GameResult], key: fn(&GameResult) -> i32) -> Vec<&'a GameResult> {
    let mut out = games.to_vec();
    out.sort_by_key(|g| key(g));
    out
}

fn show_win(g: &GameResult) -> String {
    format!("{} {} - {} {}", g.winner, g.winner_score, g.loser, g.loser_score)
}

fn show_loss(g: &GameResult) -> String {
    format!("{} {} - {} {}", g.loser, g.loser_score, g.winner, g.winner_score)
}

fn show_total(g: &GameResult) -> String {
    format!("{} ({})", show_win(g), g.total())
}

fn show_spread(g: &GameResult) -> String {
    format!("{} ({})", show_win(g), g.spread())
}

impl Statistics {
    #[must_use]
    pub fn calculate(results: &ResultLog) -> Self {
        let games: Vec<&GameResult> = results.results.iter().filter(|g| !g.involves_bye()).collect();
        let decisive: Vec<&GameResult> = games.iter().copied().filter(|g| !g.is_tie()).collect();

        let high_wins = sorted(&games, |g| g.winner_score.saturating_neg());
        let low_wins = sorted(&games, |g| g.winner_score);
        let high_losses = sorted(&decisive, |g| g.loser_score.saturating_neg());
        let low_losses = sorted(&decisive, |g| g.loser_score);
        let high_games = sorted(&games, |g| g.total().saturating_neg());
        let blowouts = sorted(&decisive, |g| g.spread().saturating_neg());
        let nailbiters = sorted(&decisive, GameResult::spread);
        let mut ties: Vec<&GameResult> = games.iter().copied().filter(|g| g.is_tie()).collect();
        ties.sort_by_key(|g| g.loser_score.saturating_neg());

        Self {
            lists: vec![
                StatsList::new("Highest Wins", high_wins, show_win),
                StatsList::new("Highest Losses", high_losses, show_loss),
                StatsList::new("Lowest Wins", low_wins, show_win),
                StatsList::new("Lowest Losses", low_losses, show_loss),
                StatsList::new("Highest Games", high_games, show_total),
                StatsList::new("Biggest Blowouts", blowouts, show_spread),
                StatsList::new("Nailbiters", nailbiters, show_spread),
                StatsList::new("Ties", ties, show_win),
            ],
        }
    }

    #[must_use]
    pub fn list(&self, title: &str) -> Option<&StatsList> {
        self.lists.iter().find(|l| l.title == title)
    }
}
