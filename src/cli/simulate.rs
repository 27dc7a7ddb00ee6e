//! Simulate command - play a whole schedule with made-up results.
//!
//! Useful for checking a schedule before an event: every round is paired
//! from the simulated history, exactly as it would be during play.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{
    print_round_text, print_round_tsv, print_standings_text, print_standings_tsv, EventArgs,
    OutputFormat,
};
use crate::core::result::{GameResult, ResultLog};
use crate::report::{pairing_rows, standings_rows, summary_line, Statistics};
use crate::simulate::simulate;

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub event: EventArgs,

    /// Write the simulated results to this file, in results-file format
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print standings after every round, not just the last
    #[arg(long)]
    pub each_round: bool,
}

pub fn run(args: SimulateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut tournament = args.event.load(ResultLog::default())?;
    if verbose {
        eprintln!(
            "Simulating {} rounds for {} entrants",
            tournament.schedule().len(),
            tournament.roster().len()
        );
    }

    let mut rng = args.event.rng();
    let rounds = simulate(&mut tournament, &mut rng)?;

    if let Some(path) = &args.output {
        std::fs::write(path, results_tsv(tournament.results()))
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let roster = tournament.roster();
    match format {
        OutputFormat::Text => {
            for (i, sim) in rounds.iter().enumerate() {
                print_round_text(&sim.pairings, &pairing_rows(&sim.pairings, roster));
                if args.each_round || i + 1 == rounds.len() {
                    println!();
                    print_standings_text(
                        &format!("STANDINGS AFTER ROUND {}", sim.pairings.round),
                        &standings_rows(&sim.standings, roster),
                    );
                }
            }
            println!();
            for sim in &rounds {
                println!("{}", summary_line(&sim.pairings));
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rounds
                .iter()
                .map(|sim| {
                    serde_json::json!({
                        "round": sim.pairings.round,
                        "pairings": pairing_rows(&sim.pairings, roster),
                        "results": sim.results,
                        "standings": standings_rows(&sim.standings, roster),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "rounds": output,
                "statistics": Statistics::calculate(tournament.results()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("round\ttable\tfirst\tsecond\trepeats\tfirsts");
            for sim in &rounds {
                print_round_tsv(&sim.pairings, &pairing_rows(&sim.pairings, roster));
            }
            if let Some(last) = rounds.last() {
                println!();
                print_standings_tsv(&standings_rows(&last.standings, roster));
            }
        }
    }

    Ok(())
}

fn results_tsv(results: &ResultLog) -> String {
    let mut out = String::from("round\twinner\twinner_score\tloser\tloser_score\tstart\n");
    for GameResult {
        round,
        winner,
        winner_score,
        loser,
        loser_score,
        winner_started,
    } in &results.results
    {
        let start = if *winner_started { "first" } else { "second" };
        out.push_str(&format!(
            "{round}\t{winner}\t{winner_score}\t{loser}\t{loser_score}\t{start}\n"
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::results::parse_results_text;

    #[test]
    fn test_results_tsv_reads_back() {
        let log = ResultLog::new(vec![
            GameResult::new(1, "amy", 420, "ben", 380, true),
            GameResult::new(1, "cat", 50, "Bye", 0, false),
        ]);
        let text = results_tsv(&log);
        assert_eq!(parse_results_text(&text, '\t').unwrap(), log);
    }
}
