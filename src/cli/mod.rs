//! Command-line interface for pairing-engine.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **pair**: Print current standings and every round that can be paired now
//! - **standings**: Print standings (and optionally game statistics) after a round
//! - **simulate**: Dry-run a schedule against randomly generated results
//!
//! ## Usage
//!
//! ```text
//! # Pair the next rounds of an event
//! pairing-engine pair --entrants entrants.tsv --settings settings.tsv --results results.tsv
//!
//! # Standings after round 5, with statistics, as JSON
//! pairing-engine standings --entrants entrants.tsv --results results.tsv --after 5 --stats --format json
//!
//! # Try a schedule before the event
//! pairing-engine simulate --entrants entrants.tsv --settings settings.tsv --seed 7
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::core::entrant::Roster;
use crate::core::result::ResultLog;
use crate::pairing::{FixedPairingBook, PairingConfig};
use crate::parsing::{entrants, results, settings};
use crate::report::{PairingRow, StandingsRow};
use crate::schedule::Schedule;
use crate::tournament::{RoundPairings, Tournament};
use crate::utils::validation::check_even_field;

pub mod pair;
pub mod simulate;
pub mod standings;

#[derive(Parser)]
#[command(name = "pairing-engine")]
#[command(version)]
#[command(about = "Pair tournament rounds from entrants, results and a round schedule")]
#[command(
    long_about = "pairing-engine pairs the rounds of a board-game tournament.\n\nEach round is paired by the system named in the schedule (Swiss, round robin, quads, king of the hill, random, ...), taking fixed pairings, byes, repeat encounters and who went first into account."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pair every round the current results allow
    Pair(pair::PairArgs),

    /// Show standings after a round
    Standings(standings::StandingsArgs),

    /// Simulate a full event with made-up results
    Simulate(simulate::SimulateArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Inputs shared by the commands that pair rounds
#[derive(clap::Args)]
pub struct EventArgs {
    /// Entrants file: name, rating, (unused), table, seed
    #[arg(short, long)]
    pub entrants: PathBuf,

    /// Round settings file: round, pairing tag
    #[arg(short, long)]
    pub settings: PathBuf,

    /// Fixed pairings file: round, player, player, [starter]
    #[arg(long)]
    pub fixed: Option<PathBuf>,

    /// JSON file overriding pairing constants
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,
}

impl EventArgs {
    /// Read every input file into a tournament
    pub fn load(&self, results: ResultLog) -> anyhow::Result<Tournament> {
        let roster = load_roster(&self.entrants)?;
        if let Some(message) = check_even_field(roster.len()) {
            anyhow::bail!(message);
        }

        let rows = settings::parse_settings_file(&self.settings)
            .with_context(|| format!("reading {}", self.settings.display()))?;
        let schedule = Schedule::from_rows(&rows)?;

        let fixed = match &self.fixed {
            Some(path) => settings::parse_fixed_file(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => FixedPairingBook::new(),
        };

        let config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                PairingConfig::from_json(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => PairingConfig::default(),
        };

        Ok(Tournament::new(roster, results, schedule)
            .with_fixed_pairings(fixed)
            .with_config(config))
    }

    /// Seeded generator; draws and logs a seed if none was given
    pub fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!(seed, "Random seed");
        StdRng::seed_from_u64(seed)
    }
}

pub(crate) fn load_roster(path: &Path) -> anyhow::Result<Roster> {
    entrants::parse_entrants_file(path).with_context(|| format!("reading {}", path.display()))
}

pub(crate) fn load_results(path: Option<&Path>) -> anyhow::Result<ResultLog> {
    match path {
        Some(path) => results::parse_results_file(path)
            .with_context(|| format!("reading {}", path.display())),
        None => Ok(ResultLog::default()),
    }
}

pub(crate) fn print_standings_text(title: &str, rows: &[StandingsRow]) {
    println!("{title}");
    println!(
        "{:>5}  {:<28} {:>6} {:>6} {:>7} {:>6} {:>6}",
        "Rank", "Player", "Wins", "Losses", "Spread", "Rating", "Firsts"
    );
    for row in rows {
        println!(
            "{:>5}  {:<28} {:>6} {:>6} {:>7} {:>6} {:>6}",
            format!("{}.", row.rank),
            row.name,
            row.score,
            row.losses,
            row.spread,
            row.rating,
            row.starts
        );
    }
}

pub(crate) fn print_standings_tsv(rows: &[StandingsRow]) {
    println!("rank\tplayer\twins\tlosses\tspread\trating\tfirsts");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.rank, row.name, row.score, row.losses, row.spread, row.rating, row.starts
        );
    }
}

pub(crate) fn print_round_text(round: &RoundPairings, rows: &[PairingRow]) {
    let system = round.system.map_or_else(|| "played".to_string(), |s| s.to_string());
    println!("\nROUND {} ({system})", round.round);
    println!(
        "{:>5}  {:<28} {:<28} {:<9} {}",
        "Table", "First", "Second", "", "Firsts"
    );
    for row in rows {
        println!(
            "{:>5}  {:<28} {:<28} {:<9} {}",
            row.table,
            row.starter,
            row.follower,
            row.repeat_label(),
            row.starts_label()
        );
    }
}

pub(crate) fn print_round_tsv(round: &RoundPairings, rows: &[PairingRow]) {
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            round.round,
            row.table,
            row.starter,
            row.follower,
            row.repeats,
            row.starts_label()
        );
    }
}
