//! Items and expert judgments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Caller-provided item identifier.
pub type ItemId = i64;

/// Caller-provided expert identifier.
pub type ExpertId = i64;

/// A rankable object from the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
}

impl Item {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// One expert's opinion: a rank-ascending order plus the items the expert
/// removed from consideration.
///
/// `order` may be partial. Items that appear in neither `order` nor
/// `excluded` are unranked but still eligible for the consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertJudgment {
    pub expert_id: ExpertId,
    #[serde(default)]
    pub expert_name: String,
    #[serde(default)]
    pub order: Vec<ItemId>,
    #[serde(default)]
    pub excluded: BTreeSet<ItemId>,
}

impl ExpertJudgment {
    /// Creates a judgment with no exclusions.
    pub fn new(expert_id: ExpertId, expert_name: impl Into<String>, order: Vec<ItemId>) -> Self {
        Self {
            expert_id,
            expert_name: expert_name.into(),
            order,
            excluded: BTreeSet::new(),
        }
    }

    /// Adds an excluded item.
    pub fn with_excluded(mut self, item: ItemId) -> Self {
        self.excluded.insert(item);
        self
    }

    /// Builds a judgment from `(item, rank)` pairs as kept by a judgment store.
    ///
    /// Pairs are sorted by rank, equal ranks by item id. Items that are also
    /// excluded are dropped from the order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_consensus::model::ExpertJudgment;
    ///
    /// let j = ExpertJudgment::from_ranks(7, "Olena", &[(30, 2), (10, 1), (20, 3)], [20]);
    /// assert_eq!(j.order, vec![10, 30]);
    /// assert!(j.excluded.contains(&20));
    /// ```
    pub fn from_ranks(
        expert_id: ExpertId,
        expert_name: impl Into<String>,
        ranks: &[(ItemId, u32)],
        excluded: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        let excluded: BTreeSet<ItemId> = excluded.into_iter().collect();
        let mut ranked: Vec<(ItemId, u32)> = ranks
            .iter()
            .copied()
            .filter(|(id, _)| !excluded.contains(id))
            .collect();
        ranked.sort_by_key(|&(id, rank)| (rank, id));

        Self {
            expert_id,
            expert_name: expert_name.into(),
            order: ranked.into_iter().map(|(id, _)| id).collect(),
            excluded,
        }
    }

    /// 1-based rank of `item` in this expert's order, if ranked.
    pub fn rank_of(&self, item: ItemId) -> Option<usize> {
        self.order.iter().position(|&id| id == item).map(|p| p + 1)
    }

    /// Whether this expert excluded `item`.
    pub fn excludes(&self, item: ItemId) -> bool {
        self.excluded.contains(&item)
    }

    /// Display label: the expert name, or `expert #<id>` when unnamed.
    pub fn label(&self) -> String {
        if self.expert_name.is_empty() {
            format!("expert #{}", self.expert_id)
        } else {
            self.expert_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ranks_sorts_and_drops_excluded() {
        let j = ExpertJudgment::from_ranks(1, "a", &[(3, 1), (1, 3), (2, 2), (4, 2)], [4]);
        assert_eq!(j.order, vec![3, 2, 1]);
        assert_eq!(j.excluded.len(), 1);
    }

    #[test]
    fn test_from_ranks_equal_ranks_by_id() {
        let j = ExpertJudgment::from_ranks(1, "a", &[(9, 1), (5, 1)], []);
        assert_eq!(j.order, vec![5, 9]);
    }

    #[test]
    fn test_rank_of() {
        let j = ExpertJudgment::new(1, "a", vec![5, 6, 7]);
        assert_eq!(j.rank_of(6), Some(2));
        assert_eq!(j.rank_of(8), None);
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let j = ExpertJudgment::new(42, "", vec![]);
        assert_eq!(j.label(), "expert #42");
    }

    #[test]
    fn test_deserialize_defaults() {
        let j: ExpertJudgment = serde_json::from_str(r#"{"expertId": 3}"#).unwrap();
        assert_eq!(j.expert_id, 3);
        assert!(j.order.is_empty());
        assert!(j.excluded.is_empty());
    }
}
