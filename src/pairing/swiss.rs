//! Swiss pairing by score groups.
//!
//! Players are grouped by win count and each group, top first, is paired
//! with a maximum-cardinality weighted matching that penalizes repeat
//! encounters and rank distance. A group that cannot be paired either
//! pulls players up from below or raises the number of repeats tolerated.
//!
//! The search runs as a small state machine:
//!
//! ```text
//! Grouping -> Merge -> CandidateSearch <-> Promote
//!                           |
//!                           +-> Succeeded | Failed
//! ```
//!
//! Every transition counts against `max_iterations`; the repeat threshold
//! is capped at `max_repeat_threshold`. Either limit ends the search with
//! an error rather than an approximate pairing.

use std::collections::BTreeMap;
use tracing::debug;

use crate::core::standings::PlayerRecord;
use crate::core::types::{Pairing, PlayerId};
use crate::matching::{max_weight_matching, Edge, MatchMode};
use crate::pairing::config::SwissConfig;
use crate::pairing::{ensure_even, PairingContext, PairingError};
use crate::tracking::RepeatTracker;

/// Players partitioned by win count, highest first
#[derive(Debug, Clone, Default)]
pub struct ScoreGroups<'a> {
    groups: Vec<Vec<&'a PlayerRecord>>,
}

impl<'a> ScoreGroups<'a> {
    /// Group `pool` (in standings order) by wins and balance odd groups
    ///
    /// A group with an odd count takes the top player of the group below,
    /// so every group but the last ends up even.
    #[must_use]
    pub fn build(pool: &'a [PlayerRecord]) -> Self {
        let mut by_wins: BTreeMap<u32, Vec<&PlayerRecord>> = BTreeMap::new();
        for record in pool {
            by_wins.entry(record.wins).or_default().push(record);
        }
        let mut groups: Vec<Vec<&PlayerRecord>> = by_wins.into_values().rev().collect();

        for i in 0..groups.len().saturating_sub(1) {
            if groups[i].len() % 2 == 1 && !groups[i + 1].is_empty() {
                let moved = groups[i + 1].remove(0);
                groups[i].push(moved);
            }
        }
        groups.retain(|g| !g.is_empty());
        Self { groups }
    }

    /// Fold the bottom group into the one above while it is under `min_size`
    pub fn merge_small_bottom(&mut self, min_size: usize) {
        while self.groups.len() > 1 && self.groups.last().is_some_and(|g| g.len() < min_size) {
            if let Some(bottom) = self.groups.pop() {
                if let Some(above) = self.groups.last_mut() {
                    above.extend(bottom);
                }
            }
        }
    }

    /// Move up to `count` players from the top of the following groups into
    /// the first group. Returns the number moved.
    pub fn promote_into_top(&mut self, count: usize) -> usize {
        let mut moved = 0;
        while moved < count {
            let Some(source) = (1..self.groups.len()).find(|&i| !self.groups[i].is_empty()) else {
                break;
            };
            let player = self.groups[source].remove(0);
            self.groups[0].push(player);
            moved += 1;
        }
        self.groups.retain(|g| !g.is_empty());
        moved
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<&'a PlayerRecord>] {
        &self.groups
    }

    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn top(&self) -> Option<&[&'a PlayerRecord]> {
        self.groups.first().map(Vec::as_slice)
    }

    fn pop_top(&mut self) {
        if !self.groups.is_empty() {
            self.groups.remove(0);
        }
    }
}

/// Top half against bottom half: 1 v. n/2+1, 2 v. n/2+2, ...
#[must_use]
pub fn pair_initial(ids: &[PlayerId]) -> Vec<Pairing> {
    let half = ids.len() / 2;
    (0..half)
        .map(|i| Pairing::new(ids[i].clone(), ids[i + half].clone()))
        .collect()
}

/// Swiss pairing of `pool`, which must be in standings order
///
/// With no games played yet (`source_round` 0) the top half of the pool
/// plays the bottom half.
///
/// # Errors
///
/// Returns `PairingError::SwissBlocked` if some score group cannot be paired
/// within the repeat threshold cap, or `PairingError::IterationLimit`.
pub fn pair(pool: &[PlayerRecord], ctx: &PairingContext<'_>) -> Result<Vec<Pairing>, PairingError> {
    ensure_even(pool.len())?;
    if ctx.source_round == 0 {
        let ids: Vec<PlayerId> = pool.iter().map(|r| r.id.clone()).collect();
        return Ok(pair_initial(&ids));
    }
    SwissRun::new(pool, ctx.repeats, &ctx.config.swiss).run()
}

#[derive(Debug)]
enum Step {
    Grouping,
    Merge,
    CandidateSearch,
    Promote,
    Succeeded,
    Failed(PairingError),
}

/// Outcome of trying to pair the top group
enum Search {
    Matched(Vec<Pairing>),
    /// Some player has no legal opponent in the group
    Blocked,
    /// Everyone has a candidate but no complete pairing exists
    Incomplete,
}

struct SwissRun<'a> {
    pool: &'a [PlayerRecord],
    groups: ScoreGroups<'a>,
    repeats: &'a RepeatTracker,
    config: &'a SwissConfig,
    /// Pairs that have met this many times or more are not allowed
    threshold: u32,
    /// Groups paired so far
    settled: usize,
    pairings: Vec<Pairing>,
}

impl<'a> SwissRun<'a> {
    fn new(pool: &'a [PlayerRecord], repeats: &'a RepeatTracker, config: &'a SwissConfig) -> Self {
        Self {
            pool,
            groups: ScoreGroups::default(),
            repeats,
            config,
            threshold: 1,
            settled: 0,
            pairings: Vec::with_capacity(pool.len() / 2),
        }
    }

    fn run(mut self) -> Result<Vec<Pairing>, PairingError> {
        let mut step = Step::Grouping;
        for _ in 0..self.config.max_iterations {
            step = match step {
                Step::Grouping => {
                    self.groups = ScoreGroups::build(self.pool);
                    Step::Merge
                }
                Step::Merge => {
                    self.groups.merge_small_bottom(self.config.min_group_size);
                    debug!(groups = ?self.groups.sizes(), "Swiss score groups");
                    Step::CandidateSearch
                }
                Step::CandidateSearch => self.search(),
                Step::Promote => self.promote(),
                Step::Succeeded => return Ok(self.pairings),
                Step::Failed(err) => return Err(err),
            };
        }
        Err(PairingError::IterationLimit(self.config.max_iterations))
    }

    fn search(&mut self) -> Step {
        let outcome = match self.groups.top() {
            Some(group) => self.match_group(group),
            None => return Step::Succeeded,
        };
        match outcome {
            Search::Matched(pairs) => {
                self.pairings.extend(pairs);
                self.groups.pop_top();
                self.settled += 1;
                if self.groups.is_empty() {
                    Step::Succeeded
                } else {
                    Step::CandidateSearch
                }
            }
            Search::Blocked if self.groups.len() > 1 => Step::Promote,
            Search::Blocked | Search::Incomplete => self.relax(),
        }
    }

    fn match_group(&self, group: &[&PlayerRecord]) -> Search {
        let n = group.len();
        let reps = |i: usize, j: usize| self.repeats.get(&group[i].id, &group[j].id);

        let blocked = (0..n).any(|i| !(0..n).any(|j| j != i && reps(i, j) < self.threshold));
        if blocked {
            return Search::Blocked;
        }

        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                let r = reps(i, j);
                let distance = j - i;
                if r < self.threshold && distance <= self.config.max_rank_distance {
                    let weight = self.config.repeat_penalty * i64::from(r) + distance as i64;
                    edges.push(Edge::new(i, j, -weight));
                }
            }
        }

        let matching = max_weight_matching(n, &edges, MatchMode::MaxCardinality);
        if !matching.is_perfect() {
            return Search::Incomplete;
        }
        Search::Matched(
            matching
                .pairs()
                .into_iter()
                .map(|(i, j)| Pairing::new(group[i].id.clone(), group[j].id.clone()))
                .collect(),
        )
    }

    fn promote(&mut self) -> Step {
        let moved = self.groups.promote_into_top(2);
        debug!(moved, groups = ?self.groups.sizes(), "Promoted players into blocked group");
        if self.groups.len() == 1 {
            self.relax()
        } else {
            Step::CandidateSearch
        }
    }

    fn relax(&mut self) -> Step {
        self.threshold += 1;
        if self.threshold > self.config.max_repeat_threshold {
            return Step::Failed(PairingError::SwissBlocked {
                group: self.settled + 1,
                threshold: self.config.max_repeat_threshold,
            });
        }
        debug!(threshold = self.threshold, "Relaxed repeat threshold");
        Step::CandidateSearch
    }
}
