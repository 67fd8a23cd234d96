//! Statistics recalculation facades
//!
//! A facade reads every item currently belonging to a run and rewrites the
//! run's aggregate counters from scratch. Rebuilding rather than applying
//! increments keeps the operation idempotent and immune to counter drift.
//!
//! The project's configured calculation strategy selects which hierarchy
//! level contributes to the counters: step-based projects count every step,
//! test-based projects count test items.
//!
//! # Concurrency
//!
//! Recalculation for a given run is serialized by a per-run keyed lock owned
//! by the factory, so two merges touching the same run cannot interleave
//! their read-rebuild-write cycles and lose an update.

use crate::lock::KeyedLock;
use runledger_core::{
    CalculationStrategy, Error, ItemLevel, ItemRepository, Result, RunId, RunRepository,
    Statistics,
};
use std::sync::Arc;
use tracing::debug;

/// Polymorphic recalculation capability
pub trait StatisticsFacade: Send + Sync {
    /// Rebuild and persist a run's aggregate counters from its current items
    ///
    /// Idempotent: recalculating an unchanged run twice yields the same
    /// counters. Returns the counters that were written.
    ///
    /// # Errors
    ///
    /// Fails with `RunNotFound` if the run doesn't exist, or if a repository
    /// operation fails.
    fn recalculate(
        &self,
        run_id: &RunId,
        items: &dyn ItemRepository,
        runs: &dyn RunRepository,
    ) -> Result<Statistics>;
}

/// Step-based facade: every step-level item counts
#[derive(Debug)]
pub struct StepBasedFacade {
    locks: Arc<KeyedLock<RunId>>,
}

/// Test-based facade: test-level items count, steps do not
#[derive(Debug)]
pub struct TestBasedFacade {
    locks: Arc<KeyedLock<RunId>>,
}

impl StatisticsFacade for StepBasedFacade {
    fn recalculate(
        &self,
        run_id: &RunId,
        items: &dyn ItemRepository,
        runs: &dyn RunRepository,
    ) -> Result<Statistics> {
        rebuild(run_id, ItemLevel::Step, items, runs, &self.locks)
    }
}

impl StatisticsFacade for TestBasedFacade {
    fn recalculate(
        &self,
        run_id: &RunId,
        items: &dyn ItemRepository,
        runs: &dyn RunRepository,
    ) -> Result<Statistics> {
        rebuild(run_id, ItemLevel::Test, items, runs, &self.locks)
    }
}

/// Rebuild a run's counters over items at the counted level
fn rebuild(
    run_id: &RunId,
    counted: ItemLevel,
    items: &dyn ItemRepository,
    runs: &dyn RunRepository,
    locks: &KeyedLock<RunId>,
) -> Result<Statistics> {
    // Per-run serialization: the read-rebuild-write below must not
    // interleave with another recalculation of the same run.
    let _guard = locks.lock(*run_id);

    let mut run = runs.find_run(run_id)?.ok_or(Error::RunNotFound(*run_id))?;
    let mut statistics = Statistics::default();
    for item in items.items_in_run(run_id)? {
        if item.level != counted {
            continue;
        }
        statistics.executions.record(item.status);
        if let Some(defect) = item.defect {
            statistics.defects.record(defect);
        }
    }
    run.statistics = statistics;
    runs.save_run(&run)?;
    debug!(
        run = %run_id,
        total = statistics.executions.total,
        failed = statistics.executions.failed,
        "recalculated run statistics"
    );
    Ok(statistics)
}

/// Resolves calculation strategy selectors to executable facades
///
/// Owns the per-run lock table so that every facade it hands out shares the
/// same serialization domain.
#[derive(Debug, Default)]
pub struct StatisticsFacadeFactory {
    locks: Arc<KeyedLock<RunId>>,
}

impl StatisticsFacadeFactory {
    /// Create a factory with a fresh per-run lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a calculation strategy to its facade
    pub fn facade(&self, strategy: CalculationStrategy) -> Box<dyn StatisticsFacade> {
        match strategy {
            CalculationStrategy::StepBased => Box::new(StepBasedFacade {
                locks: self.locks.clone(),
            }),
            CalculationStrategy::TestBased => Box::new(TestBasedFacade {
                locks: self.locks.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runledger_core::{DefectType, ItemStatus, Project, Run, TestItem};
    use runledger_storage::MemoryStore;

    fn seeded_run() -> (MemoryStore, Run) {
        let store = MemoryStore::new();
        let project = Project::new("demo");
        let run = Run::new(project.id, "run-1", 1);
        store.insert_project(project);
        store.insert_run(run.clone());
        (store, run)
    }

    fn item(run: &Run, level: ItemLevel, status: ItemStatus, defect: Option<DefectType>) -> TestItem {
        let mut item = TestItem::new(run.id, "item", level);
        item.status = status;
        item.defect = defect;
        item
    }

    #[test]
    fn test_step_based_counts_steps_only() {
        let (store, run) = seeded_run();
        store.insert_item(item(&run, ItemLevel::Step, ItemStatus::Passed, None));
        store.insert_item(item(&run, ItemLevel::Step, ItemStatus::Failed, Some(DefectType::ProductBug)));
        store.insert_item(item(&run, ItemLevel::Test, ItemStatus::Failed, None));
        store.insert_item(item(&run, ItemLevel::Suite, ItemStatus::Passed, None));

        let factory = StatisticsFacadeFactory::new();
        let facade = factory.facade(CalculationStrategy::StepBased);
        let stats = facade.recalculate(&run.id, &store, &store).unwrap();

        assert_eq!(stats.executions.total, 2);
        assert_eq!(stats.executions.passed, 1);
        assert_eq!(stats.executions.failed, 1);
        assert_eq!(stats.defects.product_bug, 1);
    }

    #[test]
    fn test_test_based_counts_tests_only() {
        let (store, run) = seeded_run();
        store.insert_item(item(&run, ItemLevel::Step, ItemStatus::Passed, None));
        store.insert_item(item(&run, ItemLevel::Test, ItemStatus::Passed, None));
        store.insert_item(item(&run, ItemLevel::Test, ItemStatus::Skipped, Some(DefectType::ToInvestigate)));

        let factory = StatisticsFacadeFactory::new();
        let facade = factory.facade(CalculationStrategy::TestBased);
        let stats = facade.recalculate(&run.id, &store, &store).unwrap();

        assert_eq!(stats.executions.total, 2);
        assert_eq!(stats.executions.passed, 1);
        assert_eq!(stats.executions.skipped, 1);
        assert_eq!(stats.defects.to_investigate, 1);
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let (store, run) = seeded_run();
        store.insert_item(item(&run, ItemLevel::Step, ItemStatus::Failed, Some(DefectType::SystemIssue)));

        let factory = StatisticsFacadeFactory::new();
        let facade = factory.facade(CalculationStrategy::StepBased);
        let first = facade.recalculate(&run.id, &store, &store).unwrap();
        let second = facade.recalculate(&run.id, &store, &store).unwrap();

        assert_eq!(first, second);
        let persisted = store.find_run(&run.id).unwrap().unwrap();
        assert_eq!(persisted.statistics, second);
    }

    #[test]
    fn test_recalculation_overwrites_stale_counters() {
        let (store, mut run) = seeded_run();
        run.statistics.executions.total = 999;
        store.save_run(&run).unwrap();

        let factory = StatisticsFacadeFactory::new();
        let facade = factory.facade(CalculationStrategy::StepBased);
        let stats = facade.recalculate(&run.id, &store, &store).unwrap();

        assert_eq!(stats.executions.total, 0, "stale counters must be dropped");
    }

    #[test]
    fn test_missing_run_fails_not_found() {
        let (store, _) = seeded_run();
        let factory = StatisticsFacadeFactory::new();
        let facade = factory.facade(CalculationStrategy::StepBased);
        let err = facade.recalculate(&RunId::new(), &store, &store).unwrap_err();
        assert!(matches!(err, Error::RunNotFound(_)));
    }
}
