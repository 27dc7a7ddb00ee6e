use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

use crate::core::entrant::{Entrant, Roster};
use crate::parsing::tsv::{delimiter_for, rows};
use crate::parsing::ParseError;
use crate::utils::validation::check_entrant_limit;

const HEADER_KEYS: &[&str] = &["name", "player", "entrant"];

/// Parse an entrants file; the delimiter follows the extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_entrants_file(path: &Path) -> Result<Roster, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_entrants_text(&content, delimiter_for(path))
}

/// Parse entrant rows: name, rating, (unused), table, seed
///
/// A missing or non-numeric rating counts as 0. An unreadable table is
/// ignored with a warning.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for a row without a name or a valid
/// seed, `ParseError::DuplicateEntrant` for a name listed twice, or
/// `ParseError::TooManyRows` if the entrant limit is exceeded.
pub fn parse_entrants_text(text: &str, delimiter: char) -> Result<Roster, ParseError> {
    let mut entrants = Vec::new();
    let mut names = HashSet::new();

    for row in rows(text, delimiter, HEADER_KEYS) {
        let name = row
            .optional(0)
            .ok_or_else(|| ParseError::invalid(row.line, "missing name"))?;
        let rating: i32 = row.field(1).parse().unwrap_or(0);
        let seed: u32 = row
            .field(4)
            .parse()
            .map_err(|_| ParseError::invalid(row.line, format!("invalid seed '{}'", row.field(4))))?;

        if !names.insert(name) {
            return Err(ParseError::DuplicateEntrant {
                line: row.line,
                name: name.to_string(),
            });
        }
        if let Some(message) = check_entrant_limit(entrants.len()) {
            return Err(ParseError::TooManyRows(message));
        }

        let mut entrant = Entrant::new(name, rating, seed);
        if let Some(table) = row.optional(3) {
            match table.parse() {
                Ok(table) => entrant = entrant.with_table(table),
                Err(_) => warn!(line = row.line, table, "Ignoring invalid table number"),
            }
        }
        entrants.push(entrant);
    }

    Ok(Roster::new(entrants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;

    #[test]
    fn test_parse_entrants_text() {
        let csv = "name,rating,notes,table,seed
cat,1600,,,3
amy,1800,,1,1
ben,,late,x,2
Bye,0,,,4
";
        let roster = parse_entrants_text(csv, ',').unwrap();
        assert_eq!(roster.len(), 4);
        let names: Vec<&str> = roster.entrants().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names, vec!["amy", "ben", "cat", "Bye"]);
        assert_eq!(roster.entrants()[0].table, Some(1));
        assert_eq!(roster.entrants()[1].rating, 0);
        assert_eq!(roster.entrants()[1].table, None);
        assert_eq!(roster.display_name(&PlayerId::new("cat")), "cat (#3)");
    }

    #[test]
    fn test_missing_seed_is_an_error() {
        let err = parse_entrants_text("amy,1800,,,\n", ',').unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_entrant() {
        let err = parse_entrants_text("amy\t1\t\t\t1\namy\t1\t\t\t2\n", '\t').unwrap_err();
        assert!(matches!(err, ParseError::DuplicateEntrant { line: 2, .. }));
    }
}
