//! Item × expert rank table and exclusion conflicts.

use super::types::{ExpertId, ExpertJudgment, Item, ItemId};
use serde::{Deserialize, Serialize};

/// What one expert said about one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "rank", rename_all = "camelCase")]
pub enum RankCell {
    /// 1-based rank in the expert's order.
    Ranked(usize),
    Excluded,
    Unranked,
}

/// Column header of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertColumn {
    pub expert_id: ExpertId,
    pub expert_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub item_id: ItemId,
    pub title: String,
    /// One cell per expert, in column order.
    pub cells: Vec<RankCell>,
}

/// An item some experts excluded while others ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub item_id: ItemId,
    pub title: String,
    pub excluded_by: Vec<String>,
    pub ranked_by: Vec<String>,
}

/// Rank table with one row per catalog item and one column per expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsMatrix {
    pub experts: Vec<ExpertColumn>,
    pub rows: Vec<MatrixRow>,
}

impl RankingsMatrix {
    /// Builds the matrix in catalog order.
    ///
    /// Exclusion takes precedence over a rank for the same item.
    pub fn build(items: &[Item], judgments: &[ExpertJudgment]) -> Self {
        let experts = judgments
            .iter()
            .map(|j| ExpertColumn {
                expert_id: j.expert_id,
                expert_name: j.label(),
            })
            .collect();

        let rows = items
            .iter()
            .map(|item| MatrixRow {
                item_id: item.id,
                title: item.title.clone(),
                cells: judgments
                    .iter()
                    .map(|j| {
                        if j.excludes(item.id) {
                            RankCell::Excluded
                        } else {
                            j.rank_of(item.id)
                                .map_or(RankCell::Unranked, RankCell::Ranked)
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { experts, rows }
    }

    /// Items excluded by at least one expert and ranked by at least one other.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.rows
            .iter()
            .filter_map(|row| {
                let mut excluded_by = Vec::new();
                let mut ranked_by = Vec::new();
                for (cell, expert) in row.cells.iter().zip(&self.experts) {
                    match cell {
                        RankCell::Excluded => excluded_by.push(expert.expert_name.clone()),
                        RankCell::Ranked(_) => ranked_by.push(expert.expert_name.clone()),
                        RankCell::Unranked => {}
                    }
                }
                (!excluded_by.is_empty() && !ranked_by.is_empty()).then(|| Conflict {
                    item_id: row.item_id,
                    title: row.title.clone(),
                    excluded_by,
                    ranked_by,
                })
            })
            .collect()
    }
}
