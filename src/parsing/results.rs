use std::path::Path;
use tracing::warn;

use crate::core::result::{GameResult, ResultLog};
use crate::core::types::PlayerId;
use crate::parsing::tsv::{delimiter_for, rows, Row};
use crate::parsing::ParseError;
use crate::utils::validation::{check_result_limit, is_valid_score};

const HEADER_KEYS: &[&str] = &["round", "rd", "r"];

/// Placeholder entrant used to check a results sheet; its games are ignored
const TEST_PLAYER: &str = "Test Player";

/// Parse a results file; the delimiter follows the extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read.
pub fn parse_results_file(path: &Path) -> Result<ResultLog, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_results_text(&content, delimiter_for(path))
}

/// Parse result rows: round, winner, winner score, loser, loser score, first|second
///
/// Rows that cannot be read as a game are skipped with a warning, as are
/// scores beyond `MAX_SCORE` and games won by the "Test Player" placeholder.
/// A missing or unrecognised last column means the loser went first.
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_results_text(text: &str, delimiter: char) -> Result<ResultLog, ParseError> {
    let mut log = ResultLog::default();

    for row in rows(text, delimiter, HEADER_KEYS) {
        if let Some(message) = check_result_limit(log.len()) {
            return Err(ParseError::TooManyRows(message));
        }
        match parse_row(&row) {
            Ok(game) => log.push(game),
            Err(reason) => warn!(line = row.line, reason, "Skipping malformed result row"),
        }
    }

    Ok(log)
}

fn parse_row(row: &Row<'_>) -> Result<GameResult, &'static str> {
    let round: u32 = row.field(0).parse().map_err(|_| "invalid round")?;
    let winner = row.optional(1).ok_or("missing winner")?;
    let winner_score: i32 = row.field(2).parse().map_err(|_| "invalid winner score")?;
    let loser = row.optional(3).ok_or("missing loser")?;
    let loser_score: i32 = row.field(4).parse().map_err(|_| "invalid loser score")?;
    if !is_valid_score(winner_score) || !is_valid_score(loser_score) {
        return Err("score out of range");
    }
    if winner == TEST_PLAYER {
        return Err("test player game");
    }
    if winner == loser {
        return Err("player listed against themselves");
    }

    Ok(GameResult {
        round,
        winner: PlayerId::new(winner),
        winner_score,
        loser: PlayerId::new(loser),
        loser_score,
        winner_started: row.field(5).eq_ignore_ascii_case("first"),
    })
}
