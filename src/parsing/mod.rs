//! Readers for the delimited text files that describe a tournament.
//!
//! Every reader takes comma- or tab-separated text, skips blank lines and
//! `#` comments, and drops an optional header row.
//!
//! | File | Columns |
//! |------|---------|
//! | results | round, winner, winner score, loser, loser score, `first`/`second` |
//! | entrants | name, rating, (unused), table, seed |
//! | settings | round, pairing tag |
//! | fixed pairings | round, player, player, [starter] |
//!
//! In fixed pairings a player is named directly or written `#N` for
//! whoever stands N-th; a trailing ` (…)` display suffix is ignored.
//!
//! ## Example
//!
//! ```rust
//! use pairing_engine::parsing::results::parse_results_text;
//!
//! let text = "round\twinner\twscore\tloser\tlscore\tstart\n1\tamy\t420\tben\t380\tfirst\n";
//! let results = parse_results_text(text, '\t').unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod entrants;
pub mod results;
pub mod settings;
pub mod tsv;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format on line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error("Duplicate entrant '{name}' on line {line}")]
    DuplicateEntrant { line: usize, name: String },

    #[error("{0}")]
    TooManyRows(String),
}

impl ParseError {
    pub(crate) fn invalid(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line,
            message: message.into(),
        }
    }
}
