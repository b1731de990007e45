//! Storage interfaces for items and judgments, with in-memory versions.
//!
//! The engine never reads these; [`ConsensusService`](super::ConsensusService)
//! snapshots them and passes plain data in.

use crate::model::{ExpertId, ExpertJudgment, Item, ItemId};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Source of the current item list.
pub trait ItemCatalog: Send + Sync {
    /// All items in catalog order.
    fn items(&self) -> Vec<Item>;

    /// Adds an item and returns it with its assigned id.
    fn create_item(&self, title: &str) -> Item;

    /// Removes an item. Returns `false` if it did not exist.
    fn delete_item(&self, id: ItemId) -> bool;
}

/// Store of expert judgments.
pub trait JudgmentStore: Send + Sync {
    /// All judgments ordered by expert id.
    fn judgments(&self) -> Vec<ExpertJudgment>;

    fn judgment(&self, expert: ExpertId) -> Option<ExpertJudgment>;

    /// Registers a new expert with an empty judgment.
    fn register_expert(&self, name: &str) -> ExpertJudgment;

    /// Inserts or replaces the judgment of `judgment.expert_id`.
    fn save_judgment(&self, judgment: ExpertJudgment);
}

/// Catalog held in memory; ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    items: Vec<Item>,
    next_id: ItemId,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog with existing items.
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(CatalogState { items, next_id }),
        }
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn items(&self) -> Vec<Item> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).items.clone()
    }

    fn create_item(&self, title: &str) -> Item {
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        state.next_id += 1;
        let item = Item::new(state.next_id, title);
        state.items.push(item.clone());
        item
    }

    fn delete_item(&self, id: ItemId) -> bool {
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        state.items.len() != before
    }
}

/// Judgment store held in memory; expert ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryJudgmentStore {
    inner: RwLock<BTreeMap<ExpertId, ExpertJudgment>>,
}

impl InMemoryJudgmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JudgmentStore for InMemoryJudgmentStore {
    fn judgments(&self) -> Vec<ExpertJudgment> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    fn judgment(&self, expert: ExpertId) -> Option<ExpertJudgment> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&expert)
            .cloned()
    }

    fn register_expert(&self, name: &str) -> ExpertJudgment {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = map.keys().next_back().copied().unwrap_or(0) + 1;
        let judgment = ExpertJudgment::new(id, name, Vec::new());
        map.insert(id, judgment.clone());
        judgment
    }

    fn save_judgment(&self, judgment: ExpertJudgment) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(judgment.expert_id, judgment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_create_and_delete() {
        let catalog = InMemoryCatalog::with_items(vec![Item::new(4, "D")]);
        let item = catalog.create_item("E");
        assert_eq!(item.id, 5);
        assert!(catalog.delete_item(4));
        assert!(!catalog.delete_item(4));
        assert_eq!(catalog.items(), vec![Item::new(5, "E")]);
    }

    #[test]
    fn test_store_register_and_save() {
        let store = InMemoryJudgmentStore::new();
        let a = store.register_expert("a");
        let b = store.register_expert("b");
        assert_eq!((a.expert_id, b.expert_id), (1, 2));

        store.save_judgment(ExpertJudgment::new(2, "b", vec![3, 1]));
        assert_eq!(store.judgment(2).unwrap().order, vec![3, 1]);
        assert_eq!(store.judgments().len(), 2);
        assert!(store.judgment(9).is_none());
    }
}
