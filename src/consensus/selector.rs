//! Candidate scoring and minimum-score selection with ties.
//!
//! Every candidate is scored against every expert; the lowest score wins and
//! all candidates reaching it form the tie set. The winner is the tie with
//! the smallest enumeration index, both sequentially and in parallel: slice
//! outcomes are reduced in enumeration order, never in completion order.

use super::method::Objective;
use super::stop::StopSignal;
use crate::distance::{positions_of, ExpertProfile};
use crate::enumeration::{CandidateSpace, Slice};
use rayon::prelude::*;
use tracing::debug;

/// How often (in candidates) a search loop polls the stop signal.
pub(crate) const STOP_CHECK_INTERVAL: u64 = 1024;

/// Per-expert distances of one candidate reduced by both criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Evaluation {
    pub sum: u64,
    pub max: u64,
}

/// Scores candidates (dense-index permutations) against fixed expert profiles.
#[derive(Debug, Clone)]
pub(crate) struct Scorer {
    objective: Objective,
    profiles: Vec<ExpertProfile>,
    n: usize,
}

impl Scorer {
    /// `restricted[e]` is expert `e`'s order restricted to the universe.
    pub fn new(objective: Objective, restricted: &[Vec<usize>], n: usize) -> Self {
        Self {
            objective,
            profiles: restricted
                .iter()
                .map(|order| ExpertProfile::new(objective.metric, order, n))
                .collect(),
            n,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn experts(&self) -> usize {
        self.profiles.len()
    }

    #[inline]
    pub fn score(&self, eval: Evaluation) -> u64 {
        self.objective.score(eval.sum, eval.max)
    }

    /// Full evaluation; per-expert distances are left in `dists`.
    pub fn evaluate(&self, candidate: &[usize], positions: &mut [usize], dists: &mut Vec<u64>) -> Evaluation {
        self.evaluate_bounded(candidate, positions, dists, u64::MAX)
            .unwrap_or(Evaluation { sum: u64::MAX, max: u64::MAX })
    }

    /// Evaluation that gives up (`None`) as soon as the score is known to
    /// exceed `bound`. Candidates scoring exactly `bound` are completed.
    pub fn evaluate_bounded(
        &self,
        candidate: &[usize],
        positions: &mut [usize],
        dists: &mut Vec<u64>,
        bound: u64,
    ) -> Option<Evaluation> {
        positions_of(candidate, positions);
        dists.clear();
        let mut sum = 0u64;
        let mut max = 0u64;
        for profile in &self.profiles {
            let d = profile.distance(positions);
            sum = sum.saturating_add(d);
            max = max.max(d);
            if self.objective.score(sum, max) > bound {
                return None;
            }
            dists.push(d);
        }
        Some(Evaluation { sum, max })
    }
}

/// A candidate that reached the best score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tie {
    /// 0-based position in the search order.
    pub index: u64,
    pub candidate: Vec<usize>,
    pub distances: Vec<u64>,
    pub sum: u64,
    pub max: u64,
}

/// Best score, ties and counters of a (partial) search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectionOutcome {
    /// `u64::MAX` until a candidate has been scored.
    pub best_score: u64,
    /// Retained ties in search order.
    pub ties: Vec<Tie>,
    /// All candidates that reached `best_score`, retained or not.
    pub tie_count: u64,
    pub explored: u64,
    /// Whether a stop signal cut the search short.
    pub interrupted: bool,
}

impl SelectionOutcome {
    pub fn empty() -> Self {
        Self {
            best_score: u64::MAX,
            ties: Vec::new(),
            tie_count: 0,
            explored: 0,
            interrupted: false,
        }
    }

    /// Records a scored candidate. `score` must not exceed `best_score`.
    pub fn record(&mut self, index: u64, candidate: &[usize], dists: &[u64], eval: Evaluation, score: u64, retain: usize) {
        if score < self.best_score {
            self.best_score = score;
            self.ties.clear();
            self.tie_count = 0;
        }
        self.tie_count += 1;
        if self.ties.len() < retain {
            self.ties.push(Tie {
                index,
                candidate: candidate.to_vec(),
                distances: dists.to_vec(),
                sum: eval.sum,
                max: eval.max,
            });
        }
    }

    /// Combines with the outcome of the slice that follows this one in
    /// enumeration order.
    pub fn merge(mut self, later: SelectionOutcome, retain: usize) -> SelectionOutcome {
        let explored = self.explored + later.explored;
        let interrupted = self.interrupted || later.interrupted;
        let mut merged = if later.best_score < self.best_score {
            later
        } else {
            if later.best_score == self.best_score {
                self.tie_count += later.tie_count;
                let room = retain.saturating_sub(self.ties.len());
                self.ties.extend(later.ties.into_iter().take(room));
            }
            self
        };
        merged.explored = explored;
        merged.interrupted = interrupted;
        merged
    }
}

/// Scores one enumeration slice.
fn scan_slice(scorer: &Scorer, slice: &Slice, retain: usize, stop: &StopSignal) -> SelectionOutcome {
    let mut out = SelectionOutcome::empty();
    let mut positions = vec![0usize; scorer.n()];
    let mut dists = Vec::with_capacity(scorer.experts());
    let mut perms = slice.iter();
    let mut offset = 0u64;

    while let Some(candidate) = perms.advance() {
        let index = slice.base + offset;
        // index 0 is always scored so a result exists
        if index > 0 && offset % STOP_CHECK_INTERVAL == 0 && stop.should_stop() {
            out.interrupted = true;
            break;
        }
        if let Some(eval) = scorer.evaluate_bounded(candidate, &mut positions, &mut dists, out.best_score) {
            let score = scorer.score(eval);
            out.record(index, candidate, &dists, eval, score, retain);
        }
        out.explored += 1;
        offset += 1;
    }
    out
}

/// Exhaustive (capped) search over `space`.
pub(crate) fn search_exhaustive(
    scorer: &Scorer,
    space: &CandidateSpace,
    parallel: bool,
    slice_size: u64,
    retain: usize,
    stop: &StopSignal,
) -> SelectionOutcome {
    let chunk = if parallel { slice_size } else { u64::MAX };
    let slices = space.slices(chunk);
    debug!(
        n = space.n(),
        candidates = space.emitted(),
        slices = slices.len(),
        parallel,
        "Scoring candidate rankings"
    );

    if parallel && slices.len() > 1 {
        slices
            .par_iter()
            .map(|slice| scan_slice(scorer, slice, retain, stop))
            .reduce(SelectionOutcome::empty, |a, b| a.merge(b, retain))
    } else {
        slices
            .iter()
            .map(|slice| scan_slice(scorer, slice, retain, stop))
            .fold(SelectionOutcome::empty(), |a, b| a.merge(b, retain))
    }
}
