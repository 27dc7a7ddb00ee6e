//! The per-run driver: pairs every pairable round in order.
//!
//! Each call to [`Tournament::run`] creates a fresh [`RunContext`] holding the
//! repeat, starts and bye trackers, and threads it through every round.
//! Rounds whose games are all in the results are not re-paired; their
//! pairings are read back from the results instead.

use rand::RngCore;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::entrant::Roster;
use crate::core::result::ResultLog;
use crate::core::standings::{Standings, StandingsError};
use crate::core::types::{Pairing, PlayerId};
use crate::pairing::{FixedPairingBook, PairingConfig, PairingContext, PairingError, PairingSystem};
use crate::schedule::{RoundSpec, Schedule, ScheduleError};
use crate::tracking::{ByeTracker, RepeatTracker, StartsTracker};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Field has an odd number of players ({0}). Add a bye if needed.")]
    OddField(usize),

    #[error("No pairing system is scheduled for round {0}")]
    MissingRound(u32),

    #[error("Round {round}: {source}")]
    Pairing {
        round: u32,
        #[source]
        source: PairingError,
    },

    #[error(transparent)]
    Standings(#[from] StandingsError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Trackers owned by a single pairing run
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub repeats: RepeatTracker,
    pub starts: StartsTracker,
    pub byes: ByeTracker,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pairings of one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundPairings {
    pub round: u32,
    /// System that paired the round; `None` when read back from results
    pub system: Option<PairingSystem>,
    pub pairings: Vec<Pairing>,
    /// Cumulative starts of (starter, follower) after this round, per pairing
    pub start_counts: Vec<(u32, u32)>,
}

impl RoundPairings {
    /// True if the round was already played and read back from results
    #[must_use]
    pub fn is_extracted(&self) -> bool {
        self.system.is_none()
    }
}

/// Output of one run
#[derive(Debug, Clone)]
pub struct TournamentRun {
    pub rounds: Vec<RoundPairings>,
    pub context: RunContext,
}

impl TournamentRun {
    #[must_use]
    pub fn round(&self, round: u32) -> Option<&RoundPairings> {
        self.rounds.iter().find(|r| r.round == round)
    }
}

/// Everything known about a tournament
#[derive(Debug, Clone)]
pub struct Tournament {
    roster: Roster,
    results: ResultLog,
    schedule: Schedule,
    fixed: FixedPairingBook,
    config: PairingConfig,
}

impl Tournament {
    pub fn new(roster: Roster, results: ResultLog, schedule: Schedule) -> Self {
        Self {
            roster,
            results,
            schedule,
            fixed: FixedPairingBook::new(),
            config: PairingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_fixed_pairings(mut self, fixed: FixedPairingBook) -> Self {
        self.fixed = fixed;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PairingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultLog {
        &mut self.results
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Check that the field can be paired at all
    ///
    /// # Errors
    ///
    /// Returns `EngineError::OddField` if the roster has an odd size.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.roster.len() % 2 != 0 {
            return Err(EngineError::OddField(self.roster.len()));
        }
        Ok(())
    }

    /// Standings as of the end of `round` (0 is seed order)
    ///
    /// # Errors
    ///
    /// Propagates standings errors.
    pub fn standings_after(&self, round: u32) -> Result<Standings, EngineError> {
        Ok(Standings::calculate(
            &self.results,
            &self.roster,
            i64::from(round),
        )?)
    }

    /// True if every entrant has a game in `round`
    #[must_use]
    pub fn is_round_complete(&self, round: u32) -> bool {
        let played: Vec<&PlayerId> = self
            .results
            .games_in_round(round)
            .flat_map(|g| [&g.winner, &g.loser])
            .collect();
        !played.is_empty() && self.roster.entrants().iter().all(|e| played.contains(&&e.id))
    }

    /// Pairings of a played round, winner first, starter from the results
    #[must_use]
    pub fn extract_round(&self, round: u32) -> Vec<Pairing> {
        self.results
            .games_in_round(round)
            .map(|g| g.to_pairing())
            .collect()
    }

    /// Last round that the current results allow pairing
    #[must_use]
    pub fn last_pairable_round(&self) -> u32 {
        self.schedule.pairable_through(self.results.last_round())
    }

    /// Pair every round up to the pairable horizon
    ///
    /// # Errors
    ///
    /// Returns an error for an odd field, a round missing from the schedule,
    /// or a round that cannot be paired.
    pub fn run(&self, rng: &mut dyn RngCore) -> Result<TournamentRun, EngineError> {
        self.run_through(self.last_pairable_round(), rng)
    }

    /// Pair every round from 1 through `last`
    ///
    /// # Errors
    ///
    /// See [`Tournament::run`].
    pub fn run_through(&self, last: u32, rng: &mut dyn RngCore) -> Result<TournamentRun, EngineError> {
        self.validate()?;

        let mut ctx = RunContext::new();
        for (round, id) in self.fixed.pinned_starters() {
            ctx.starts.pin(round, id);
        }

        let mut rounds = Vec::with_capacity(last as usize);
        for round in 1..=last {
            let (system, mut pairings) = if self.is_round_complete(round) {
                let pairings = self.extract_round(round);
                for p in &pairings {
                    ctx.starts.register(p, round);
                }
                (None, pairings)
            } else {
                let spec = self
                    .schedule
                    .get(round)
                    .ok_or(EngineError::MissingRound(round))?;
                let mut pairings = self.pair_round(spec, &ctx, rng)?;
                for p in &mut pairings {
                    ctx.starts.assign(p, round);
                }
                (Some(spec.system), pairings)
            };

            for p in &mut pairings {
                ctx.byes.update(p);
                p.repeats = ctx.repeats.add(&p.first.player, &p.second.player);
            }
            let start_counts = pairings
                .iter()
                .map(|p| (ctx.starts.starts(p.starter()), ctx.starts.starts(p.follower())))
                .collect();

            info!(
                round,
                system = system.map_or("results", |s| s.name()),
                pairings = pairings.len(),
                "Paired round"
            );
            rounds.push(RoundPairings {
                round,
                system,
                pairings,
                start_counts,
            });
        }

        Ok(TournamentRun {
            rounds,
            context: ctx,
        })
    }

    fn pair_round(
        &self,
        spec: &RoundSpec,
        ctx: &RunContext,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Pairing>, EngineError> {
        let anchor = spec.anchor_round();
        let standings = self.standings_after(anchor)?;
        let fixed = self.fixed.for_round(spec.round);
        if !fixed.is_empty() && !spec.system.uses_resolver() {
            warn!(
                round = spec.round,
                system = spec.system.name(),
                "Fixed pairings are ignored for this pairing system"
            );
        }

        let mut pairing_ctx = PairingContext {
            round: spec.round,
            source_round: anchor,
            position: spec.position,
            roster: &self.roster,
            repeats: &ctx.repeats,
            byes: &ctx.byes,
            fixed,
            config: &self.config,
            rng,
        };
        spec.system
            .produce_pairings(&standings, &mut pairing_ctx)
            .map_err(|source| EngineError::Pairing {
                round: spec.round,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entrant::Entrant;
    use crate::core::result::GameResult;
    use crate::pairing::{FixedPairing, PlayerRef};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(n: u32) -> Roster {
        Roster::new((1..=n).map(|i| Entrant::new(format!("p{i}"), 1500, i)).collect())
    }

    fn schedule(tags: &[&str]) -> Schedule {
        let rows: Vec<(u32, &str)> = tags
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, *t))
            .collect();
        Schedule::from_rows(&rows).unwrap()
    }

    fn shown(round: &RoundPairings) -> Vec<String> {
        round.pairings.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_odd_field_is_rejected() {
        let t = Tournament::new(roster(15), ResultLog::default(), schedule(&["S"]));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(t.run(&mut rng), Err(EngineError::OddField(15))));
    }

    #[test]
    fn test_first_round_only_without_results() {
        let t = Tournament::new(roster(8), ResultLog::default(), schedule(&["S", "S", "S"]));
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        assert_eq!(run.rounds.len(), 1);
        assert_eq!(
            shown(&run.rounds[0]),
            vec!["p1 v. p5", "p2 v. p6", "p3 v. p7", "p4 v. p8"]
        );
    }

    #[test]
    fn test_played_round_is_extracted_and_next_is_paired() {
        let results = ResultLog::new(vec![
            GameResult::new(1, "p1", 400, "p3", 300, true),
            GameResult::new(1, "p4", 410, "p2", 390, false),
        ]);
        let t = Tournament::new(roster(4), results, schedule(&["K", "K"]));
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        assert_eq!(run.rounds.len(), 2);
        assert!(run.rounds[0].is_extracted());
        assert_eq!(shown(&run.rounds[0]), vec!["p1 v. p3", "p4 v. p2"]);
        assert!(run.rounds[0].pairings[0].first.starts);
        assert!(run.rounds[0].pairings[1].second.starts);
        // p1 (+100) and p4 (+20) lead
        assert_eq!(shown(&run.rounds[1]), vec!["p1 v. p4", "p2 v. p3"]);
        assert_eq!(run.rounds[1].system, Some(PairingSystem::KingOfTheHill));
    }

    #[test]
    fn test_repeats_are_annotated() {
        let t = Tournament::new(roster(2), ResultLog::default(), schedule(&["R", "R", "R"]));
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        let reps: Vec<u32> = run.rounds.iter().map(|r| r.pairings[0].repeats).collect();
        assert_eq!(reps, vec![1, 2, 3]);
    }

    #[test]
    fn test_starts_alternate() {
        let t = Tournament::new(roster(2), ResultLog::default(), schedule(&["R", "R"]));
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        let starters: Vec<&PlayerId> = run.rounds.iter().map(|r| r.pairings[0].starter()).collect();
        assert_ne!(starters[0], starters[1]);
        assert_eq!(run.rounds[1].start_counts, vec![(1, 1)]);
    }

    #[test]
    fn test_bye_rotates_through_the_bottom() {
        let mut entrants: Vec<Entrant> = (1..=5).map(|i| Entrant::new(format!("p{i}"), 1500, i)).collect();
        entrants.push(Entrant::new("Bye", 0, 6));
        let t = Tournament::new(
            Roster::new(entrants),
            ResultLog::default(),
            schedule(&["R", "R", "R", "R", "R"]),
        );
        // round robin gives everyone exactly one bye
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        for i in 1..=5 {
            assert_eq!(run.context.byes.get(&PlayerId::new(format!("p{i}"))), 1);
        }
    }

    #[test]
    fn test_fixed_pin_and_starter() {
        let mut book = FixedPairingBook::new();
        book.push(
            1,
            FixedPairing::new(PlayerRef::Id(PlayerId::new("p1")), PlayerRef::Id(PlayerId::new("p2")))
                .with_starter(PlayerRef::Id(PlayerId::new("p2"))),
        );
        let t = Tournament::new(roster(4), ResultLog::default(), schedule(&["K"]))
            .with_fixed_pairings(book);
        let mut rng = StdRng::seed_from_u64(1);
        let run = t.run(&mut rng).unwrap();
        assert_eq!(shown(&run.rounds[0]), vec!["p3 v. p4", "p1 v. p2"]);
        assert_eq!(run.rounds[0].pairings[1].starter(), &PlayerId::new("p2"));
    }

    #[test]
    fn test_missing_round() {
        let rows = [(2u32, "CH")];
        let schedule = Schedule::from_rows(&rows).unwrap();
        let t = Tournament::new(roster(4), ResultLog::default(), schedule);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            t.run(&mut rng),
            Err(EngineError::MissingRound(1))
        ));
    }
}
