//! Input hardening tests
//!
//! Oversized, malformed and unusual input files must either parse with the
//! bad rows dropped or fail with a clear error, never panic.

use std::fs;

use pairing_engine::parsing::entrants::{parse_entrants_file, parse_entrants_text};
use pairing_engine::parsing::results::{parse_results_file, parse_results_text};
use pairing_engine::parsing::settings::{parse_fixed_text, parse_settings_file};
use pairing_engine::parsing::ParseError;
use pairing_engine::utils::validation::{MAX_ENTRANTS, MAX_SCORE};
use pairing_engine::{Entrant, GameResult, ResultLog, Roster, Standings};
use tempfile::TempDir;

/// Entrant files beyond the limit are rejected rather than loaded
#[test]
fn test_entrant_limit_is_enforced() {
    let mut text = String::new();
    for i in 0..=MAX_ENTRANTS {
        text.push_str(&format!("p{i}\t1500\t\t\t{i}\n"));
    }

    let err = parse_entrants_text(&text, '\t').unwrap_err();
    assert!(matches!(err, ParseError::TooManyRows(_)));
    assert!(err.to_string().contains("Too many entrants"));
}

#[test]
fn test_entrant_limit_boundary_is_accepted() {
    let mut text = String::new();
    for i in 0..MAX_ENTRANTS {
        text.push_str(&format!("p{i}\t1500\t\t\t{i}\n"));
    }

    let roster = parse_entrants_text(&text, '\t').unwrap();
    assert_eq!(roster.len(), MAX_ENTRANTS);
}

#[test]
fn test_garbage_results_are_skipped() {
    let text = "\u{feff}\u{0}\u{0}\u{0}\n\
                1\tamy\t420\tben\t380\tfirst\n\
                \t\t\t\t\t\n\
                99999999999999999999\tamy\t1\tben\t0\tfirst\n\
                1\tcat\t1e9\tdan\t0\tfirst\n\
                1\tcat\t400\tdan\t300\tfirst\textra\tcolumns\n";

    let log = parse_results_text(text, '\t').unwrap();
    let winners: Vec<&str> = log.results.iter().map(|g| g.winner.as_str()).collect();
    assert_eq!(winners, vec!["amy", "cat"]);
}

/// Scores at the i32 bounds are dropped instead of overflowing the spread
#[test]
fn test_extreme_scores_are_skipped() {
    let text = format!(
        "1,amy,{},ben,{},first\n\
         1,cat,{MAX_SCORE},dan,-{MAX_SCORE},first\n\
         1,eve,{},fay,0,first\n",
        i32::MAX,
        i32::MIN,
        MAX_SCORE + 1,
    );
    let log = parse_results_text(&text, ',').unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.results[0].winner.as_str(), "cat");

    let roster = Roster::new(
        ["amy", "ben", "cat", "dan"]
            .iter()
            .zip(1..)
            .map(|(name, seed)| Entrant::new(*name, 1500, seed))
            .collect(),
    );
    let standings = Standings::calculate(&log, &roster, 1).unwrap();
    let top = standings.at_position(1).unwrap();
    assert_eq!(top.id.as_str(), "cat");
    assert_eq!(top.spread, 2 * MAX_SCORE);
}

/// Results built in code bypass the parser; the spread saturates
#[test]
fn test_standings_survive_unchecked_extreme_scores() {
    let log = ResultLog::new(vec![
        GameResult::new(1, "amy", i32::MAX, "ben", i32::MIN, true),
        GameResult::new(2, "amy", i32::MAX, "ben", 0, false),
    ]);
    let roster = Roster::new(vec![Entrant::new("amy", 1500, 1), Entrant::new("ben", 1500, 2)]);

    let standings = Standings::calculate(&log, &roster, 2).unwrap();
    assert_eq!(standings.get(&"amy".into()).map(|r| r.spread), Some(i32::MAX));
    assert_eq!(standings.get(&"ben".into()).map(|r| r.spread), Some(i32::MIN));
}

#[test]
fn test_negative_scores_within_range_are_kept() {
    let log = parse_results_text("3,amy,-5,ben,-40,second\n", ',').unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.results[0].spread(), 35);
    assert!(!log.results[0].winner_started);
}

#[test]
fn test_wrong_delimiter_drops_every_row() {
    // tab-separated content read as CSV has no numeric round column
    let text = "1\tamy\t420\tben\t380\tfirst\n";
    let log = parse_results_text(text, ',').unwrap();
    assert!(log.is_empty());
}

#[test]
fn test_duplicate_entrant_reports_line() {
    let text = "name,rating,notes,table,seed\namy,1800,,,1\nben,1700,,,2\namy,1600,,,3\n";
    match parse_entrants_text(text, ',') {
        Err(ParseError::DuplicateEntrant { line, name }) => {
            assert_eq!(line, 4);
            assert_eq!(name, "amy");
        }
        other => panic!("expected duplicate entrant error, got {other:?}"),
    }
}

#[test]
fn test_fixed_pairing_needs_both_players() {
    assert!(matches!(
        parse_fixed_text("3,amy\n", ','),
        Err(ParseError::InvalidFormat { line: 1, .. })
    ));
    assert!(matches!(
        parse_fixed_text("3,amy,#0\n", ','),
        Err(ParseError::InvalidFormat { line: 1, .. })
    ));
}

#[test]
fn test_file_readers_pick_delimiter_from_extension() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("results.CSV");
    let tsv = dir.path().join("results.txt");
    fs::write(&csv, "1,amy,420,ben,380,first\n").unwrap();
    fs::write(&tsv, "1\tamy\t420\tben\t380\tfirst\n").unwrap();

    assert_eq!(
        parse_results_file(&csv).unwrap(),
        parse_results_file(&tsv).unwrap()
    );

    let settings = dir.path().join("settings.csv");
    fs::write(&settings, "round,tag\n1,S\n2,S\n").unwrap();
    assert_eq!(parse_settings_file(&settings).unwrap().len(), 2);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.tsv");
    assert!(matches!(
        parse_entrants_file(&missing),
        Err(ParseError::Io(_))
    ));
}
