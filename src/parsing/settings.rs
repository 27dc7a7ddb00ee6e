//! Round settings (the pairing schedule) and fixed pairings.

use std::path::Path;

use crate::pairing::{FixedPairing, FixedPairingBook, PlayerRef};
use crate::parsing::tsv::{delimiter_for, rows, Row};
use crate::parsing::ParseError;

const HEADER_KEYS: &[&str] = &["round", "rd"];

/// Parse a settings file; the delimiter follows the extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_settings_file(path: &Path) -> Result<Vec<(u32, String)>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_settings_text(&content, delimiter_for(path))
}

/// Parse schedule rows: round, pairing tag
///
/// Tags are checked when the schedule is built, not here.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for a row with a bad round number or
/// no tag.
pub fn parse_settings_text(text: &str, delimiter: char) -> Result<Vec<(u32, String)>, ParseError> {
    rows(text, delimiter, HEADER_KEYS)
        .iter()
        .map(|row| -> Result<(u32, String), ParseError> {
            let round = parse_round(row)?;
            let tag = row
                .optional(1)
                .ok_or_else(|| ParseError::invalid(row.line, "missing pairing tag"))?;
            Ok((round, tag.to_string()))
        })
        .collect()
}

/// Parse a fixed-pairings file; the delimiter follows the extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_fixed_file(path: &Path) -> Result<FixedPairingBook, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_fixed_text(&content, delimiter_for(path))
}

/// Parse fixed-pairing rows: round, player, player, optional starter
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for a bad round number or a player
/// reference that cannot be read.
pub fn parse_fixed_text(text: &str, delimiter: char) -> Result<FixedPairingBook, ParseError> {
    let mut book = FixedPairingBook::new();

    for row in rows(text, delimiter, HEADER_KEYS) {
        let round = parse_round(&row)?;
        let first = parse_ref(&row, 1)?;
        let second = parse_ref(&row, 2)?;
        let mut pairing = FixedPairing::new(first, second);
        if row.optional(3).is_some() {
            pairing = pairing.with_starter(parse_ref(&row, 3)?);
        }
        book.push(round, pairing);
    }

    Ok(book)
}

fn parse_round(row: &Row<'_>) -> Result<u32, ParseError> {
    row.field(0)
        .parse()
        .ok()
        .filter(|&r| r > 0)
        .ok_or_else(|| ParseError::invalid(row.line, format!("invalid round '{}'", row.field(0))))
}

fn parse_ref(row: &Row<'_>, i: usize) -> Result<PlayerRef, ParseError> {
    PlayerRef::parse(row.field(i))
        .ok_or_else(|| ParseError::invalid(row.line, format!("invalid player '{}'", row.field(i))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;

    #[test]
    fn test_parse_settings_text() {
        let text = "Round\tPairing\n1\tK\n2\tR1\n# later\n3\tR1\n";
        let rows = parse_settings_text(text, '\t').unwrap();
        assert_eq!(
            rows,
            vec![(1, "K".to_string()), (2, "R1".to_string()), (3, "R1".to_string())]
        );
    }

    #[test]
    fn test_settings_errors() {
        assert!(matches!(
            parse_settings_text("0,K\n", ','),
            Err(ParseError::InvalidFormat { line: 1, .. })
        ));
        assert!(matches!(
            parse_settings_text("1,K\n2,\n", ','),
            Err(ParseError::InvalidFormat { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_fixed_text() {
        let text = "round,first,second,starter
3,amy (#1),#4,#4
3,cat,dan
5,ben,eve,ben (#2)
";
        let book = parse_fixed_text(text, ',').unwrap();
        let round3 = book.for_round(3);
        assert_eq!(round3.len(), 2);
        assert_eq!(round3[0].first, PlayerRef::Id(PlayerId::new("amy")));
        assert_eq!(round3[0].second, PlayerRef::Standing(4));
        assert_eq!(round3[0].starter, Some(PlayerRef::Standing(4)));
        assert_eq!(round3[1].starter, None);

        let starters: Vec<(u32, PlayerId)> = book.pinned_starters().collect();
        assert_eq!(starters, vec![(5, PlayerId::new("ben"))]);
        assert!(book.for_round(4).is_empty());
    }

    #[test]
    fn test_fixed_bad_reference() {
        assert!(matches!(
            parse_fixed_text("2,amy,#x\n", ','),
            Err(ParseError::InvalidFormat { line: 1, .. })
        ));
    }
}
