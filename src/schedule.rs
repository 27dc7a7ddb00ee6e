//! Round-by-round schedule: which system pairs each round, and on which standings.
//!
//! Rows of `(round, tag)` are turned into [`RoundSpec`]s. Round robin and
//! quad tags form cycles keyed by their exact text (`R1` and `R2` are two
//! separate round robins); every round of a cycle is paired on the
//! standings from just before the cycle began.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::pairing::{PairingError, PairingSystem};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Round {round}: {source}")]
    UnknownTag {
        round: u32,
        #[source]
        source: PairingError,
    },

    #[error("Round {0} is scheduled more than once")]
    DuplicateRound(u32),

    #[error("Round numbers start at 1")]
    ZeroRound,
}

/// How one round is paired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSpec {
    pub round: u32,
    pub system: PairingSystem,
    /// Tag as written in the schedule
    pub tag: String,
    /// Round whose standings anchor this pairing; may be negative early on
    pub source_round: i64,
    /// 1-based position inside a cycle; 0 outside cycles
    pub position: u32,
}

impl RoundSpec {
    /// Source round clamped to seed order
    #[must_use]
    pub fn anchor_round(&self) -> u32 {
        u32::try_from(self.source_round.max(0)).unwrap_or(u32::MAX)
    }
}

/// All scheduled rounds, keyed by round number
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    rounds: BTreeMap<u32, RoundSpec>,
}

impl Schedule {
    /// Build a schedule from `(round, tag)` rows
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tag, round 0, or a round listed twice.
    pub fn from_rows<S: AsRef<str>>(rows: &[(u32, S)]) -> Result<Self, ScheduleError> {
        let mut sorted: Vec<(u32, &str)> = rows.iter().map(|(r, t)| (*r, t.as_ref().trim())).collect();
        sorted.sort_by_key(|(r, _)| *r);

        let mut rounds = BTreeMap::new();
        let mut cycles: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

        for (round, tag) in sorted {
            if round == 0 {
                return Err(ScheduleError::ZeroRound);
            }
            let system: PairingSystem = tag
                .parse()
                .map_err(|source| ScheduleError::UnknownTag { round, source })?;

            let (source_round, position) = if system.is_cyclic() {
                let (first, seen) = cycles.entry(tag).or_insert((round, 0));
                *seen += 1;
                (i64::from(*first) - 1, *seen)
            } else {
                let source = match system {
                    PairingSystem::CrossGroup => 0,
                    PairingSystem::LaggedSwiss => i64::from(round) - 2,
                    _ => i64::from(round) - 1,
                };
                (source, 0)
            };

            let spec = RoundSpec {
                round,
                system,
                tag: tag.to_string(),
                source_round,
                position,
            };
            if rounds.insert(round, spec).is_some() {
                return Err(ScheduleError::DuplicateRound(round));
            }
        }

        Ok(Self { rounds })
    }

    #[must_use]
    pub fn get(&self, round: u32) -> Option<&RoundSpec> {
        self.rounds.get(&round)
    }

    pub fn rounds(&self) -> impl Iterator<Item = &RoundSpec> {
        self.rounds.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Highest scheduled round
    #[must_use]
    pub fn last_round(&self) -> u32 {
        self.rounds.keys().next_back().copied().unwrap_or(0)
    }

    /// Last round that can be paired once results through `last_result` are in
    ///
    /// A round is pairable when its source round has been played. A round of
    /// a cycle is also pairable when its source round is itself pairable,
    /// since the whole cycle hangs off the same standings.
    #[must_use]
    pub fn pairable_through(&self, last_result: u32) -> u32 {
        let mut last = 0;
        for spec in self.rounds.values() {
            if spec.source_round <= i64::from(last_result)
                || (spec.system.is_cyclic() && spec.source_round <= i64::from(last))
            {
                last = spec.round;
            }
        }
        last
    }
}
