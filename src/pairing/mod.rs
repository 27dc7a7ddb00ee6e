//! Pairing systems.
//!
//! Every round is paired by one [`PairingSystem`], chosen by the round's tag:
//!
//! | Tag | System | Pool order |
//! |-----|--------|------------|
//! | `K` | King of the hill: 1-2, 3-4, ... | standings |
//! | `Q` | Queen of the hill: 1-3, 2-4 in blocks of four | standings |
//! | `RAND` | Uniform random | shuffled |
//! | `RANDNR` | Random, fewest possible repeats | weighted matching |
//! | `R…` | Round robin (circle method) | standings at cycle start |
//! | `DR…` | Double round robin, each pairing twice in a row | standings at cycle start |
//! | `QC…`/`QD…`/`QE…` | Clustered, distributed or Evans quads | standings at cycle start |
//! | `CH` | Fixed cross-group rotation | seeds |
//! | `S`/`ST` | Swiss, on the previous or the one before | score groups |
//!
//! Systems that work from current rank ([`PairingSystem::uses_resolver`])
//! first hand the standings to [`fixed::resolve`], which removes pinned
//! pairs and the bye; those pairs are appended to the system's output.

pub mod config;
pub mod cross_group;
pub mod fixed;
pub mod hill;
pub mod quads;
pub mod random;
pub mod round_robin;
pub mod swiss;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::core::entrant::Roster;
use crate::core::standings::Standings;
use crate::core::types::{Pairing, PlayerId};
use crate::tracking::{ByeTracker, RepeatTracker};

pub use config::{PairingConfig, RandomConfig, SwissConfig};
pub use fixed::{FixedPairing, FixedPairingBook, PlayerRef};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("Unknown pairing system tag '{0}'")]
    UnknownSystem(String),

    #[error("Cannot pair an odd number of players ({0})")]
    OddPool(usize),

    #[error("{system} pairing needs at least {needed} players, got {got}")]
    PoolTooSmall {
        system: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("Standing reference #{0} is outside the field")]
    StandingOutOfRange(usize),

    #[error("Fixed pairing names unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("Player '{0}' is pinned more than once in the same round")]
    DuplicatePin(String),

    #[error("Swiss pairing blocked in score group {group}: no legal pairing with up to {threshold} repeats")]
    SwissBlocked { group: usize, threshold: u32 },

    #[error("Swiss pairing did not settle within {0} steps")]
    IterationLimit(usize),
}

/// How quads are drawn from the standings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadLayout {
    /// Contiguous blocks of four
    Clustered,
    /// Every k-th player, k being the number of quads
    Distributed,
    /// Distributed after reversing every other slice of the standings
    Evans,
}

/// The algorithm used to pair one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairingSystem {
    KingOfTheHill,
    QueenOfTheHill,
    Random,
    RandomNoRepeat,
    RoundRobin,
    DoubleRoundRobin,
    Quads(QuadLayout),
    CrossGroup,
    Swiss,
    /// Swiss paired on standings two rounds back
    LaggedSwiss,
}

impl PairingSystem {
    /// Short display name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::KingOfTheHill => "KotH",
            Self::QueenOfTheHill => "QotH",
            Self::Random => "random",
            Self::RandomNoRepeat => "random no-repeat",
            Self::RoundRobin => "round robin",
            Self::DoubleRoundRobin => "double round robin",
            Self::Quads(QuadLayout::Clustered) => "clustered quads",
            Self::Quads(QuadLayout::Distributed) => "distributed quads",
            Self::Quads(QuadLayout::Evans) => "Evans quads",
            Self::CrossGroup => "Charlottesville",
            Self::Swiss => "Swiss",
            Self::LaggedSwiss => "lagged Swiss",
        }
    }

    /// True for systems played as a cycle of consecutive positions
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Self::RoundRobin | Self::DoubleRoundRobin | Self::Quads(_)
        )
    }

    /// True for systems that honour fixed pairings and pair the bye separately
    #[must_use]
    pub fn uses_resolver(&self) -> bool {
        matches!(
            self,
            Self::KingOfTheHill
                | Self::QueenOfTheHill
                | Self::Random
                | Self::RandomNoRepeat
                | Self::Swiss
                | Self::LaggedSwiss
        )
    }

    /// Pair one round
    ///
    /// `standings` are the standings as of `ctx.source_round`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be paired by this system.
    pub fn produce_pairings(
        &self,
        standings: &Standings,
        ctx: &mut PairingContext<'_>,
    ) -> Result<Vec<Pairing>, PairingError> {
        if !self.uses_resolver() {
            let field: Vec<PlayerId> = standings.iter().map(|r| r.id.clone()).collect();
            return match self {
                Self::RoundRobin => round_robin::pair(&field, ctx.position),
                Self::DoubleRoundRobin => round_robin::pair_double(&field, ctx.position),
                Self::Quads(layout) => quads::pair(&field, *layout, ctx.position),
                Self::CrossGroup => cross_group::pair(ctx.roster, ctx.round),
                _ => Ok(Vec::new()),
            };
        }

        let resolution = fixed::resolve(standings, ctx.fixed, ctx.byes)?;
        let pool = resolution.pool;
        let ids: Vec<PlayerId> = pool.iter().map(|r| r.id.clone()).collect();

        let mut pairings = match self {
            Self::KingOfTheHill => hill::pair_king(&ids)?,
            Self::QueenOfTheHill => hill::pair_queen(&ids)?,
            Self::Random => random::pair_shuffled(&ids, &mut *ctx.rng)?,
            Self::RandomNoRepeat => random::pair_avoiding_repeats(&ids, ctx)?,
            _ => swiss::pair(&pool, ctx)?,
        };
        pairings.extend(resolution.pinned);
        Ok(pairings)
    }
}

impl FromStr for PairingSystem {
    type Err = PairingError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim();
        let system = match tag {
            "K" => Self::KingOfTheHill,
            "Q" => Self::QueenOfTheHill,
            "RAND" => Self::Random,
            "RANDNR" => Self::RandomNoRepeat,
            "CH" => Self::CrossGroup,
            "S" => Self::Swiss,
            "ST" => Self::LaggedSwiss,
            t if t.starts_with("QC") => Self::Quads(QuadLayout::Clustered),
            t if t.starts_with("QD") => Self::Quads(QuadLayout::Distributed),
            t if t.starts_with("QE") => Self::Quads(QuadLayout::Evans),
            t if t.starts_with("DR") => Self::DoubleRoundRobin,
            t if t.starts_with('R') && !t.starts_with("RAND") => Self::RoundRobin,
            _ => return Err(PairingError::UnknownSystem(tag.to_string())),
        };
        Ok(system)
    }
}

impl std::fmt::Display for PairingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Everything a pairing system may consult besides the standings
pub struct PairingContext<'a> {
    /// Round being paired
    pub round: u32,
    /// Round whose standings anchor this pairing; 0 is seed order
    pub source_round: u32,
    /// 1-based position inside a round robin or quad cycle
    pub position: u32,
    pub roster: &'a Roster,
    pub repeats: &'a RepeatTracker,
    pub byes: &'a ByeTracker,
    /// Pins for this round
    pub fixed: &'a [FixedPairing],
    pub config: &'a PairingConfig,
    pub rng: &'a mut dyn RngCore,
}

/// Pair consecutive entries of `ids`: 0-1, 2-3, ...
pub(crate) fn pair_consecutive(ids: &[PlayerId]) -> Vec<Pairing> {
    ids.chunks_exact(2)
        .map(|c| Pairing::new(c[0].clone(), c[1].clone()))
        .collect()
}

pub(crate) fn ensure_even(n: usize) -> Result<(), PairingError> {
    if n % 2 == 0 {
        Ok(())
    } else {
        Err(PairingError::OddPool(n))
    }
}
