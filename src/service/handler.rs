//! Consensus service over injected repositories.

use super::repository::{ItemCatalog, JudgmentStore};
use super::request::{respond, ConsensusRequest, ConsensusResponse};
use crate::consensus::EngineConfig;
use crate::model::{Conflict, RankingsMatrix};
use tracing::info;

/// Snapshots the repositories and hands plain data to the engine.
///
/// # Examples
///
/// ```
/// use u_consensus::consensus::EngineConfig;
/// use u_consensus::model::ExpertJudgment;
/// use u_consensus::service::{
///     ConsensusService, InMemoryCatalog, InMemoryJudgmentStore, ItemCatalog, JudgmentStore,
/// };
///
/// let service = ConsensusService::new(
///     InMemoryCatalog::new(),
///     InMemoryJudgmentStore::new(),
///     EngineConfig::default(),
/// );
/// let a = service.catalog().create_item("A");
/// let b = service.catalog().create_item("B");
/// let expert = service.judgments().register_expert("Olha");
/// service
///     .judgments()
///     .save_judgment(ExpertJudgment::new(expert.expert_id, "Olha", vec![b.id, a.id]));
///
/// let result = service.compute("cook-seiford").into_result().unwrap();
/// assert_eq!(result.winner(), vec![b.id, a.id]);
/// ```
pub struct ConsensusService<C, S> {
    catalog: C,
    judgments: S,
    config: EngineConfig,
}

impl<C: ItemCatalog, S: JudgmentStore> ConsensusService<C, S> {
    pub fn new(catalog: C, judgments: S, config: EngineConfig) -> Self {
        Self {
            catalog,
            judgments,
            config,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn judgments(&self) -> &S {
        &self.judgments
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current repository contents as an engine request.
    pub fn snapshot(&self, method: &str) -> ConsensusRequest {
        ConsensusRequest {
            items: self.catalog.items(),
            judgments: self.judgments.judgments(),
            method: method.to_string(),
        }
    }

    /// Computes the consensus for the current snapshot.
    pub fn compute(&self, method: &str) -> ConsensusResponse {
        let request = self.snapshot(method);
        info!(
            method,
            items = request.items.len(),
            experts = request.judgments.len(),
            "Computing consensus ranking"
        );
        respond(&request, &self.config, None)
    }

    /// Item × expert rank table of the current snapshot.
    pub fn matrix(&self) -> RankingsMatrix {
        RankingsMatrix::build(&self.catalog.items(), &self.judgments.judgments())
    }

    /// Items excluded by some experts but ranked by others.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.matrix().conflicts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpertJudgment, Item, RankCell};
    use crate::service::repository::{InMemoryCatalog, InMemoryJudgmentStore};
    use crate::service::ErrorKind;

    fn service() -> ConsensusService<InMemoryCatalog, InMemoryJudgmentStore> {
        let catalog = InMemoryCatalog::with_items(vec![
            Item::new(1, "A"),
            Item::new(2, "B"),
            Item::new(3, "C"),
        ]);
        let store = InMemoryJudgmentStore::new();
        store.save_judgment(ExpertJudgment::new(1, "x", vec![1, 2, 3]));
        store.save_judgment(ExpertJudgment::new(2, "y", vec![2, 1]).with_excluded(3));
        ConsensusService::new(catalog, store, EngineConfig::default())
    }

    #[test]
    fn test_compute_uses_snapshot() {
        let result = service().compute("kemeny-snell").into_result().unwrap();
        assert_eq!(result.valid_items, vec![1, 2]);
        assert_eq!(result.candidates_explored, 2);
    }

    #[test]
    fn test_compute_without_experts() {
        let svc = ConsensusService::new(
            InMemoryCatalog::with_items(vec![Item::new(1, "A")]),
            InMemoryJudgmentStore::new(),
            EngineConfig::default(),
        );
        let err = svc.compute("minimax").into_result().unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::NoExperts);
    }

    #[test]
    fn test_deleted_item_leaves_universe() {
        let svc = service();
        assert!(svc.catalog().delete_item(2));
        let result = svc.compute("cook-seiford").into_result().unwrap();
        assert_eq!(result.valid_items, vec![1]);
    }

    #[test]
    fn test_matrix_and_conflicts() {
        let svc = service();
        let matrix = svc.matrix();
        assert_eq!(matrix.rows[2].cells, vec![RankCell::Ranked(3), RankCell::Excluded]);
        let conflicts = svc.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].item_id, 3);
    }
}
