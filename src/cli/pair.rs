//! Pair command - pair every round the current results allow.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{
    load_results, print_round_text, print_round_tsv, print_standings_text, print_standings_tsv,
    EventArgs, OutputFormat,
};
use crate::report::{pairing_rows, standings_rows, summary_line};

#[derive(Args)]
pub struct PairArgs {
    #[command(flatten)]
    pub event: EventArgs,

    /// Results file: round, winner, score, loser, score, first|second
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// Show rounds that were read back from results too
    #[arg(long)]
    pub all_rounds: bool,
}

pub fn run(args: PairArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let results = load_results(args.results.as_deref())?;
    let tournament = args.event.load(results)?;

    let last_result = tournament.results().last_round();
    let horizon = tournament.last_pairable_round();
    if verbose {
        eprintln!(
            "Loaded {} entrants and {} results; pairing through round {horizon}",
            tournament.roster().len(),
            tournament.results().len(),
        );
    }

    let mut rng = args.event.rng();
    let run = tournament.run(&mut rng)?;
    let standings = standings_rows(&tournament.standings_after(last_result)?, tournament.roster());

    let shown: Vec<_> = run
        .rounds
        .iter()
        .filter(|r| args.all_rounds || !r.is_extracted())
        .collect();

    match format {
        OutputFormat::Text => {
            print_standings_text(&format!("STANDINGS AFTER ROUND {last_result}"), &standings);
            for round in &shown {
                print_round_text(round, &pairing_rows(round, tournament.roster()));
            }
            println!();
            for round in &shown {
                println!("{}", summary_line(round));
            }
        }
        OutputFormat::Json => {
            let rounds: Vec<serde_json::Value> = shown
                .iter()
                .map(|round| {
                    serde_json::json!({
                        "round": round.round,
                        "system": round.system.map(|s| s.name()),
                        "summary": summary_line(round),
                        "pairings": pairing_rows(round, tournament.roster()),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "after_round": last_result,
                "standings": standings,
                "rounds": rounds,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            if verbose {
                print_standings_tsv(&standings);
            }
            println!("round\ttable\tfirst\tsecond\trepeats\tfirsts");
            for round in &shown {
                print_round_tsv(round, &pairing_rows(round, tournament.roster()));
            }
        }
    }

    Ok(())
}
