//! Core data types for tournament pairing.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`PlayerId`]: Identifier of a participant (the bye is a participant named "bye")
//! - [`Pairing`], [`Seat`]: Two players meeting in a round and who goes first
//! - [`GameResult`], [`ResultLog`]: Recorded games
//! - [`Entrant`], [`Roster`]: The registered field in seed order
//! - [`PlayerRecord`], [`Standings`]: Aggregated records ranked as of a round
//!
//! ## Ranking
//!
//! | Key | Order |
//! |-----|-------|
//! | score (wins + ½ ties) | descending |
//! | spread | descending |
//! | seed | ascending |
//!
//! Round 0 denotes the pre-tournament seed order.

pub mod entrant;
pub mod result;
pub mod standings;
pub mod types;

pub use entrant::{Entrant, Roster};
pub use result::{GameResult, ResultLog};
pub use standings::{PlayerRecord, Standings, StandingsError};
pub use types::{Pairing, PlayerId, Seat};
