//! Presentation of standings and pairings.
//!
//! - [`standings_rows`]: ranked rows with display names and ratings
//! - [`pairing_rows`]: one row per pairing with a table number, starter first
//! - [`summary_line`]: the one-line plain-text form of a round
//! - [`stats`]: top-10 game lists over all results

pub mod stats;

use serde::Serialize;
use std::collections::HashSet;

use crate::core::entrant::Roster;
use crate::core::standings::Standings;
use crate::tournament::RoundPairings;

pub use stats::{Statistics, StatsList};

/// One line of the standings table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsRow {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    /// losses + 0.5 * ties
    pub losses: f64,
    pub spread: i32,
    pub rating: i32,
    pub starts: u32,
}

/// Standings rows in rank order; the bye is left out
#[must_use]
pub fn standings_rows(standings: &Standings, roster: &Roster) -> Vec<StandingsRow> {
    standings
        .iter()
        .filter(|r| !r.id.is_bye())
        .enumerate()
        .map(|(i, r)| StandingsRow {
            rank: i + 1,
            name: roster.display_name(&r.id),
            score: r.score,
            losses: r.loss_score(),
            spread: r.spread,
            rating: roster.get(&r.id).map_or(0, |e| e.rating),
            starts: r.starts,
        })
        .collect()
}

/// One line of a round's pairing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingRow {
    pub table: u32,
    pub starter: String,
    pub follower: String,
    /// Encounter count including this game
    pub repeats: u32,
    pub starter_starts: u32,
    pub follower_starts: u32,
}

impl PairingRow {
    /// `(rep N)` for repeat pairings, empty otherwise
    #[must_use]
    pub fn repeat_label(&self) -> String {
        if self.repeats > 1 {
            format!("(rep {})", self.repeats)
        } else {
            String::new()
        }
    }

    /// Cumulative starts as `a - b`
    #[must_use]
    pub fn starts_label(&self) -> String {
        format!("{} - {}", self.starter_starts, self.follower_starts)
    }
}

/// Rows for one round, ordered by table
///
/// A pairing sits at the fixed table of its first player, else of its second,
/// else at the lowest table that no entrant reserves and that is still free
/// this round.
#[must_use]
pub fn pairing_rows(round: &RoundPairings, roster: &Roster) -> Vec<PairingRow> {
    let reserved: HashSet<u32> = roster.reserved_tables().collect();
    let mut used: HashSet<u32> = HashSet::new();
    let mut next = 1;

    let mut rows: Vec<PairingRow> = round
        .pairings
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let fixed = roster
                .get(&p.first.player)
                .and_then(|e| e.table)
                .or_else(|| roster.get(&p.second.player).and_then(|e| e.table));
            let table = fixed.unwrap_or_else(|| {
                while reserved.contains(&next) || used.contains(&next) {
                    next += 1;
                }
                next
            });
            used.insert(table);

            let (starter_starts, follower_starts) =
                round.start_counts.get(i).copied().unwrap_or_default();
            PairingRow {
                table,
                starter: roster.display_name(p.starter()),
                follower: roster.display_name(p.follower()),
                repeats: p.repeats,
                starter_starts,
                follower_starts,
            }
        })
        .collect();

    rows.sort_by_key(|r| r.table);
    rows
}

/// `ROUND n: a v. b | c v. d`
#[must_use]
pub fn summary_line(round: &RoundPairings) -> String {
    let games: Vec<String> = round.pairings.iter().map(ToString::to_string).collect();
    format!("ROUND {}: {}", round.round, games.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entrant::Entrant;
    use crate::core::result::{GameResult, ResultLog};
    use crate::core::types::Pairing;

    fn roster() -> Roster {
        Roster::new(vec![
            Entrant::new("amy", 1800, 1),
            Entrant::new("ben", 1700, 2).with_table(2),
            Entrant::new("cat", 1600, 3),
            Entrant::new("dan", 1500, 4),
            Entrant::new("eve", 1400, 5),
            Entrant::new("Bye", 0, 6),
        ])
    }

    fn started(a: &str, b: &str, second_starts: bool, repeats: u32) -> Pairing {
        let mut p = Pairing::new(a.into(), b.into());
        p.first.starts = !second_starts;
        p.second.starts = second_starts;
        p.repeats = repeats;
        p
    }

    #[test]
    fn test_standings_rows_skip_bye() {
        let results = ResultLog::new(vec![
            GameResult::new(1, "cat", 400, "amy", 350, true),
            GameResult::new(1, "ben", 380, "dan", 380, false),
            GameResult::new(1, "eve", 30, "Bye", 0, true),
        ]);
        let standings = Standings::calculate(&results, &roster(), 1).unwrap();
        let rows = standings_rows(&standings, &roster());

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].name, "cat (#3)");
        assert_eq!(rows[0].rating, 1600);
        assert_eq!(rows[1].name, "eve (#5)");
        assert_eq!(rows[2].name, "ben (#2)");
        assert!((rows[2].score - 0.5).abs() < f64::EPSILON);
        assert!((rows[2].losses - 0.5).abs() < f64::EPSILON);
        assert_eq!(rows[4].rank, 5);
        assert_eq!(rows[4].spread, -50);
    }

    #[test]
    fn test_tables_skip_reserved_and_sort() {
        let round = RoundPairings {
            round: 3,
            system: None,
            pairings: vec![
                started("amy", "cat", false, 1),
                started("dan", "ben", true, 2),
                started("eve", "Bye", false, 1),
            ],
            start_counts: vec![(2, 1), (1, 2), (3, 0)],
        };
        let rows = pairing_rows(&round, &roster());
        let tables: Vec<u32> = rows.iter().map(|r| r.table).collect();
        assert_eq!(tables, vec![1, 2, 3]);

        assert_eq!(rows[1].starter, "ben (#2)");
        assert_eq!(rows[1].follower, "dan (#4)");
        assert_eq!(rows[1].repeat_label(), "(rep 2)");
        assert_eq!(rows[1].starts_label(), "1 - 2");
        assert_eq!(rows[0].repeat_label(), "");
        assert_eq!(rows[2].follower, "Bye (#6)");
    }

    #[test]
    fn test_summary_line() {
        let round = RoundPairings {
            round: 2,
            system: None,
            pairings: vec![started("amy", "cat", false, 1), started("dan", "ben", true, 1)],
            start_counts: vec![],
        };
        assert_eq!(summary_line(&round), "ROUND 2: amy v. cat | dan v. ben");
    }
}
