//! Standings command - standings after a round, with optional game statistics.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_results, load_roster, print_standings_text, print_standings_tsv, OutputFormat};
use crate::core::standings::Standings;
use crate::report::{standings_rows, Statistics};

#[derive(Args)]
pub struct StandingsArgs {
    /// Entrants file: name, rating, (unused), table, seed
    #[arg(short, long)]
    pub entrants: PathBuf,

    /// Results file: round, winner, score, loser, score, first|second
    #[arg(short, long)]
    pub results: PathBuf,

    /// Round to report after (defaults to the last round with results)
    #[arg(short, long)]
    pub after: Option<u32>,

    /// Also print top-10 game lists
    #[arg(long)]
    pub stats: bool,
}

pub fn run(args: StandingsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = load_roster(&args.entrants)?;
    let results = load_results(Some(&args.results))?;
    let round = args.after.unwrap_or_else(|| results.last_round());

    if verbose {
        eprintln!(
            "Loaded {} entrants and {} results",
            roster.len(),
            results.len()
        );
    }

    let standings = Standings::calculate(&results, &roster, i64::from(round))?;
    let rows = standings_rows(&standings, &roster);
    let stats = args.stats.then(|| Statistics::calculate(&results));

    match format {
        OutputFormat::Text => {
            print_standings_text(&format!("STANDINGS AFTER ROUND {round}"), &rows);
            if let Some(stats) = &stats {
                for list in &stats.lists {
                    println!("\n{}", list.title);
                    for entry in &list.entries {
                        println!("  {entry}");
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "after_round": round,
                "standings": rows,
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            print_standings_tsv(&rows);
            if let Some(stats) = &stats {
                println!();
                println!("list\tentry");
                for list in &stats.lists {
                    for entry in &list.entries {
                        println!("{}\t{entry}", list.title);
                    }
                }
            }
        }
    }

    Ok(())
}
