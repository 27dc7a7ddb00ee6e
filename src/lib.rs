//! # pairing-engine
//!
//! A library for pairing the rounds of a board-game tournament.
//!
//! Given the registered entrants, the results so far and a schedule that
//! names a pairing system for every round, `pairing-engine` produces the
//! pairings for every round that can be paired now. Rounds that were already
//! played are read back from the results, so who met whom and who went
//! first carry across the whole event.
//!
//! ## Features
//!
//! - **Swiss pairing**: Score groups paired by maximum-weight matching, with
//!   repeat avoidance that escalates only as far as it must
//! - **Schedule-driven systems**: Round robins, double round robins, quads and
//!   cross-group rotations
//! - **Rank-driven systems**: King and queen of the hill, random pairing
//!   with or without repeat avoidance
//! - **Fixed pairings**: Pin players by name or by current standing
//! - **Byes**: The bye goes to the eligible player with the fewest byes
//! - **First-player balancing**: Who starts each game is assigned from history
//!
//! ## Example
//!
//! ```rust
//! use pairing_engine::{Entrant, ResultLog, Roster, Schedule, Tournament};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let roster = Roster::new(
//!     (1..=8).map(|i| Entrant::new(format!("player{i}"), 1500, i)).collect(),
//! );
//! let schedule = Schedule::from_rows(&[(1, "S"), (2, "S"), (3, "S")]).unwrap();
//! let tournament = Tournament::new(roster, ResultLog::default(), schedule);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let run = tournament.run(&mut rng).unwrap();
//! for round in &run.rounds {
//!     for pairing in &round.pairings {
//!         println!("Round {}: {pairing}", round.round);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Players, pairings, results, rosters and standings
//! - [`tracking`]: Repeat, first-player and bye bookkeeping
//! - [`matching`]: Maximum-weight matching on general graphs
//! - [`pairing`]: The pairing systems
//! - [`schedule`]: Which system pairs each round
//! - [`tournament`]: The round-by-round driver
//! - [`report`]: Standings and pairing tables, statistics
//! - [`simulate`]: Dry runs with made-up results
//! - [`parsing`]: Readers for entrants, results, settings and fixed pairings
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod pairing;
pub mod parsing;
pub mod report;
pub mod schedule;
pub mod simulate;
pub mod tournament;
pub mod tracking;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::{Entrant, GameResult, Pairing, PlayerId, PlayerRecord, ResultLog, Roster, Standings};
pub use pairing::{PairingConfig, PairingError, PairingSystem};
pub use schedule::{RoundSpec, Schedule};
pub use tournament::{EngineError, RoundPairings, Tournament, TournamentRun};
