//! Merge coordinator: the single exposed operation
//!
//! Sequences validation, strategy execution, metadata reconciliation, and
//! per-run statistics recalculation. Steps fail fast: every error in the
//! taxonomy is detected before any mutation, so a failed request leaves no
//! partial state. Failures during the mutation phase are storage errors and
//! the caller retries the whole merge from scratch.
//!
//! # Concurrency
//!
//! A lock keyed by target item id makes the read-modify-write sequence
//! atomic with respect to other merges on the same target; merges on
//! disjoint targets proceed independently.

use crate::facade::StatisticsFacadeFactory;
use crate::lock::KeyedLock;
use crate::reconcile::reconcile;
use crate::strategy::{strategy_for, MergeStrategyKind};
use crate::validation::Validator;
use runledger_core::{
    Error, ItemId, ItemRepository, ProjectRepository, Result, RunId, RunRepository,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// A request to consolidate source suites into a target suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Ordered list of source item ids; must be non-empty
    pub items: Vec<ItemId>,
    /// Merge strategy wire selector (`BY_ID` or `BY_NAME`)
    pub merge_strategy: String,
}

/// Confirmation of a completed merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// The target item the sources were merged into
    pub item: ItemId,
    /// Human-readable confirmation
    pub message: String,
}

/// Orchestrates suite merges over the repository collaborators
pub struct MergeCoordinator {
    items: Arc<dyn ItemRepository>,
    runs: Arc<dyn RunRepository>,
    projects: Arc<dyn ProjectRepository>,
    facades: StatisticsFacadeFactory,
    merge_locks: KeyedLock<ItemId>,
}

impl MergeCoordinator {
    /// Create a coordinator over the given repositories
    pub fn new(
        items: Arc<dyn ItemRepository>,
        runs: Arc<dyn RunRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            items,
            runs,
            projects,
            facades: StatisticsFacadeFactory::new(),
            merge_locks: KeyedLock::new(),
        }
    }

    /// Merge the sources named by the request into the target suite
    ///
    /// Validates target and sources, applies the requested strategy to
    /// reparent source children under the target, reconciles metadata, and
    /// recalculates statistics for every affected run (each distinct source
    /// run, then the target's run).
    ///
    /// `project_name` and `actor` identify the caller for the operation log;
    /// authorization itself is the calling layer's concern.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` / `RunNotFound` / `ProjectNotFound` for absent
    ///   entities
    /// - `InvalidRequest` for an empty source list, a non-suite item, or a
    ///   source that is the target or one of its ancestors
    /// - `AccessDenied` for a source belonging to another project
    /// - `UnsupportedMergeStrategy` for an unknown strategy selector
    /// - `Storage` for repository failures; the whole merge must be retried
    pub fn merge_test_item(
        &self,
        project_name: &str,
        target_id: &ItemId,
        request: &MergeRequest,
        actor: &str,
    ) -> Result<MergeResult> {
        if request.items.is_empty() {
            return Err(Error::InvalidRequest(
                "merge request names no source items".to_string(),
            ));
        }

        let _guard = self.merge_locks.lock(*target_id);
        let validator = Validator::new(&*self.items, &*self.runs, &*self.projects);

        let mut target = validator.item(target_id)?;
        let target_run = validator.run(&target.run_id)?;
        let project = validator.project(&target_run.project_id)?;
        validator.run_in_project(&target_run, &project)?;
        validator.suite(&target)?;

        info!(
            target = %target_id,
            project = project_name,
            actor,
            strategy = %request.merge_strategy,
            sources = request.items.len(),
            "merging test items"
        );

        let target_ancestors = validator.ancestors(&target)?;
        let mut sources = Vec::with_capacity(request.items.len());
        let mut source_runs: BTreeSet<RunId> = BTreeSet::new();
        for id in &request.items {
            let source = validator.item(id)?;
            source_runs.insert(source.run_id);
            validator.suite(&source)?;
            validator.item_in_project(&source, &project)?;
            validator.source_disjoint_from_target(&source, &target, &target_ancestors)?;
            sources.push(source);
        }

        let kind = MergeStrategyKind::from_selector(&request.merge_strategy)
            .ok_or_else(|| Error::UnsupportedMergeStrategy(request.merge_strategy.clone()))?;

        strategy_for(kind).merge_items(&target, &sources, &*self.items)?;

        reconcile(&mut target, &sources);
        self.items.save_item(&target)?;

        let facade = self.facades.facade(project.configuration.statistics_strategy);
        for run_id in &source_runs {
            facade.recalculate(run_id, &*self.items, &*self.runs)?;
        }
        // The target run is recalculated last, even when it already
        // appeared among the source runs.
        facade.recalculate(&target.run_id, &*self.items, &*self.runs)?;

        debug!(
            target = %target_id,
            affected_runs = source_runs.len() + 1,
            "merge completed"
        );
        Ok(MergeResult {
            item: *target_id,
            message: format!("test item '{target_id}' successfully merged"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runledger_core::{ItemLevel, Project, Run, TestItem};
    use runledger_storage::MemoryStore;

    fn coordinator(store: &Arc<MemoryStore>) -> MergeCoordinator {
        MergeCoordinator::new(store.clone(), store.clone(), store.clone())
    }

    #[test]
    fn test_empty_source_list_is_invalid() {
        let store = Arc::new(MemoryStore::new());
        let project = Project::new("demo");
        let run = Run::new(project.id, "run", 1);
        let target = TestItem::suite(run.id, "suite");
        store.insert_project(project);
        store.insert_run(run);
        store.insert_item(target.clone());

        let request = MergeRequest {
            items: Vec::new(),
            merge_strategy: "BY_NAME".to_string(),
        };
        let err = coordinator(&store)
            .merge_test_item("demo", &target.id, &request, "tester")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_unknown_strategy_rejected_before_child_reads() {
        let store = Arc::new(MemoryStore::new());
        let project = Project::new("demo");
        let run = Run::new(project.id, "run", 1);
        let target = TestItem::suite(run.id, "target");
        let source = TestItem::suite(run.id, "source");
        let mut child = TestItem::new(run.id, "child", ItemLevel::Test);
        child.parent = Some(source.id);
        store.insert_project(project);
        store.insert_run(run);
        store.insert_item(target.clone());
        store.insert_item(source.clone());
        store.insert_item(child.clone());

        let request = MergeRequest {
            items: vec![source.id],
            merge_strategy: "DEEP".to_string(),
        };
        let err = coordinator(&store)
            .merge_test_item("demo", &target.id, &request, "tester")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMergeStrategy(_)));

        // Nothing moved.
        let unchanged = store.find_item(&child.id).unwrap().unwrap();
        assert_eq!(unchanged.parent, Some(source.id));
    }

    #[test]
    fn test_result_message_references_target() {
        let store = Arc::new(MemoryStore::new());
        let project = Project::new("demo");
        let run = Run::new(project.id, "run", 1);
        let target = TestItem::suite(run.id, "target");
        let source = TestItem::suite(run.id, "source");
        store.insert_project(project);
        store.insert_run(run);
        store.insert_item(target.clone());
        store.insert_item(source.clone());

        let request = MergeRequest {
            items: vec![source.id],
            merge_strategy: "BY_NAME".to_string(),
        };
        let result = coordinator(&store)
            .merge_test_item("demo", &target.id, &request, "tester")
            .unwrap();
        assert_eq!(result.item, target.id);
        assert!(result.message.contains(&target.id.to_string()));
    }

    #[test]
    fn test_request_serde_roundtrip() {
        let request = MergeRequest {
            items: vec![ItemId::new(), ItemId::new()],
            merge_strategy: "BY_ID".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: MergeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
