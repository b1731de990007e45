//! The immutable outcome of a consensus run.

use super::competence::Competence;
use super::config::SearchStrategy;
use super::method::{Criterion, Method};
use crate::distance::Metric;
use crate::error::Warning;
use crate::model::ItemId;
use serde::{Deserialize, Serialize};

/// One position of the consensus ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub item_id: ItemId,
    pub title: String,
    /// 1-based rank.
    pub rank: usize,
}

/// A candidate ranking that reached the optimal score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieRow {
    /// 0-based position in the search order (enumeration index, or
    /// annealing move number).
    pub index: u64,
    pub ranking: Vec<ItemId>,
    /// One distance per expert, in judgment order.
    pub distances: Vec<u64>,
    pub sum: u64,
    pub max: u64,
}

/// Consensus ranking, distances, competence and a report of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResult {
    pub ranking: Vec<RankedItem>,
    /// Sum of expert distances to the winning ranking.
    pub total_distance: u64,
    pub max_distance: u64,
    pub avg_distance: f64,
    pub competence: Vec<Competence>,

    /// Number of candidates reaching the optimal score (exact).
    pub tie_count: u64,
    /// Retained tied candidates in search order; the first is the winner.
    pub ties: Vec<TieRow>,
    /// Whether `ties` holds fewer rows than `tie_count`.
    pub ties_truncated: bool,

    /// `None` when the run used an explicit objective instead of a preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_used: Option<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_method: Option<String>,
    pub metric_used: Metric,
    pub criterion_used: Criterion,
    pub strategy_used: SearchStrategy,

    /// The search did not cover the full permutation space, or the space
    /// exceeded the soft cap; the optimum is best-effort.
    pub limited: bool,
    /// Timeout or cancellation cut the search short.
    pub partial: bool,
    pub candidates_explored: u64,
    /// `n!`, saturating at `u64::MAX`.
    pub total_candidates: u64,

    /// Items that took part in the search, in catalog order.
    pub valid_items: Vec<ItemId>,
    pub warnings: Vec<Warning>,
}

impl ConsensusResult {
    /// Winning ranking as item ids.
    pub fn winner(&self) -> Vec<ItemId> {
        self.ranking.iter().map(|r| r.item_id).collect()
    }

    /// Tie rows ordered for display: by the aggregate the criterion did not
    /// minimize, then by search order.
    pub fn ties_by_secondary(&self) -> Vec<&TieRow> {
        let mut rows: Vec<&TieRow> = self.ties.iter().collect();
        match self.criterion_used.other() {
            Criterion::Max => rows.sort_by_key(|r| (r.max, r.index)),
            Criterion::Sum => rows.sort_by_key(|r| (r.sum, r.index)),
        }
        rows
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
