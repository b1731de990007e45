//! Reduction of the catalog to items no expert excluded.

use super::types::{ExpertJudgment, Item, ItemId};
use crate::error::ConsensusError;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Items eligible for the consensus, in catalog order.
///
/// Also serves as the universe of a search: each valid item gets a dense
/// index `0..len()` matching its catalog position among valid items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItemSet {
    ids: Vec<ItemId>,
    index: HashMap<ItemId, usize>,
}

impl ValidItemSet {
    /// Filters `catalog` against every expert's exclusions.
    ///
    /// Duplicate catalog ids keep their first occurrence.
    ///
    /// # Errors
    ///
    /// [`ConsensusError::NoValidItems`] if nothing survives.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_consensus::model::{ExpertJudgment, ValidItemSet};
    ///
    /// let judgments = vec![
    ///     ExpertJudgment::new(1, "a", vec![1, 2, 3]),
    ///     ExpertJudgment::new(2, "b", vec![2, 1]).with_excluded(3),
    /// ];
    /// let valid = ValidItemSet::filter(&[1, 2, 3], &judgments).unwrap();
    /// assert_eq!(valid.ids(), &[1, 2]);
    /// ```
    pub fn filter(catalog: &[ItemId], judgments: &[ExpertJudgment]) -> Result<Self, ConsensusError> {
        let excluded: HashSet<ItemId> = judgments
            .iter()
            .flat_map(|j| j.excluded.iter().copied())
            .collect();

        let mut ids = Vec::with_capacity(catalog.len());
        let mut index = HashMap::with_capacity(catalog.len());
        for &id in catalog {
            if excluded.contains(&id) {
                continue;
            }
            if index.contains_key(&id) {
                warn!(item = id, "Duplicate item id in catalog, keeping first occurrence");
                continue;
            }
            index.insert(id, ids.len());
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(ConsensusError::NoValidItems);
        }
        Ok(Self { ids, index })
    }

    /// Same as [`filter`](Self::filter) over full catalog items.
    pub fn from_items(items: &[Item], judgments: &[ExpertJudgment]) -> Result<Self, ConsensusError> {
        let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        Self::filter(&ids, judgments)
    }

    /// Valid item ids in catalog order.
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Dense index of a valid item.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Item id at dense index `idx`.
    pub fn id_at(&self, idx: usize) -> ItemId {
        self.ids[idx]
    }

    /// Restricts an expert order to valid items, as dense indices.
    ///
    /// Relative order is kept; repeated ids keep their first position.
    pub fn restrict(&self, order: &[ItemId]) -> Vec<usize> {
        let mut seen = vec![false; self.ids.len()];
        let mut out = Vec::with_capacity(order.len().min(self.ids.len()));
        for &id in order {
            if let Some(idx) = self.index_of(id) {
                if !seen[idx] {
                    seen[idx] = true;
                    out.push(idx);
                }
            }
        }
        out
    }

    /// Restricts an expert order to valid items, keeping ids.
    pub fn restrict_ids(&self, order: &[ItemId]) -> Vec<ItemId> {
        self.restrict(order).into_iter().map(|idx| self.ids[idx]).collect()
    }

    /// Maps dense indices back to item ids.
    pub fn to_ids(&self, indices: &[usize]) -> Vec<ItemId> {
        indices.iter().map(|&idx| self.ids[idx]).collect()
    }
}
