//! Shared fixtures for integration tests

// Each integration test binary compiles its own copy of this module and
// uses a different subset of the helpers.
#![allow(dead_code)]

use runledger::{
    CalculationStrategy, DefectType, ItemLevel, ItemStatus, MemoryStore, MergeCoordinator,
    MergeRequest, Project, Run, RunId, TestItem, Timestamp,
};
use std::sync::Arc;

/// A seeded store with one project and a coordinator over it
pub struct TestBackend {
    pub store: Arc<MemoryStore>,
    pub coordinator: MergeCoordinator,
    pub project: Project,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_strategy(CalculationStrategy::StepBased)
    }

    pub fn with_strategy(strategy: CalculationStrategy) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mut project = Project::new("demo");
        project.configuration.statistics_strategy = strategy;
        store.insert_project(project.clone());
        let coordinator = MergeCoordinator::new(store.clone(), store.clone(), store.clone());
        TestBackend {
            store,
            coordinator,
            project,
        }
    }

    pub fn run(&self, name: &str, number: u32) -> Run {
        let run = Run::new(self.project.id, name, number);
        self.store.insert_run(run.clone());
        run
    }

    pub fn suite(&self, run: &Run, name: &str) -> TestItem {
        let mut suite = TestItem::suite(run.id, name);
        suite.status = ItemStatus::Passed;
        self.store.insert_item(suite.clone());
        suite
    }

    /// A passed/failed step under a fresh test under the given suite
    pub fn step_under(
        &self,
        suite: &TestItem,
        name: &str,
        status: ItemStatus,
        defect: Option<DefectType>,
    ) -> TestItem {
        let mut test = TestItem::new(suite.run_id, format!("{name} test"), ItemLevel::Test);
        test.parent = Some(suite.id);
        test.status = status;
        self.store.insert_item(test.clone());

        let mut step = TestItem::new(suite.run_id, name, ItemLevel::Step);
        step.parent = Some(test.id);
        step.status = status;
        step.defect = defect;
        self.store.insert_item(step.clone());
        step
    }

    pub fn merge(
        &self,
        target: &TestItem,
        sources: &[&TestItem],
        strategy: &str,
    ) -> runledger::Result<runledger::MergeResult> {
        let request = MergeRequest {
            items: sources.iter().map(|s| s.id).collect(),
            merge_strategy: strategy.to_string(),
        };
        self.coordinator
            .merge_test_item(&self.project.name, &target.id, &request, "integration")
    }

    pub fn reread(&self, item: &TestItem) -> TestItem {
        use runledger::ItemRepository;
        self.store.find_item(&item.id).unwrap().unwrap()
    }

    pub fn run_stats(&self, run: &RunId) -> runledger::Statistics {
        use runledger::RunRepository;
        self.store.find_run(run).unwrap().unwrap().statistics
    }
}

/// Set a suite's descriptive metadata in the store
pub fn describe(
    backend: &TestBackend,
    suite: &TestItem,
    tags: &[&str],
    description: Option<&str>,
    start: u64,
    end: u64,
) -> TestItem {
    use runledger::ItemRepository;
    let mut updated = suite.clone();
    updated.tags = tags.iter().map(|t| t.to_string()).collect();
    updated.description = description.map(|d| d.to_string());
    updated.start_time = Timestamp::from_micros(start);
    updated.end_time = Timestamp::from_micros(end);
    backend.store.save_item(&updated).unwrap();
    updated
}
