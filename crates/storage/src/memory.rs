//! MemoryStore: in-memory repository backend
//!
//! # Design Notes
//!
//! - **One write lock for items + indices**: item saves update the primary
//!   map and both secondary indices under the same lock, so readers never
//!   observe an index pointing at a stale parent or run.
//! - **Entities are cloned out**: repositories hand out owned values. The
//!   engine mutates its copies and writes them back through `save_item` /
//!   `save_run`, matching the read-modify-write shape of the merge flow.

use parking_lot::RwLock;
use runledger_core::{
    ItemId, ItemRepository, Project, ProjectId, ProjectRepository, Result, Run, RunId,
    RunRepository, TestItem,
};
use rustc_hash::FxHashMap;

use crate::index::{ChildIndex, RunItemIndex};

/// Item map plus the indices kept consistent with it
#[derive(Debug, Default)]
struct ItemTable {
    items: FxHashMap<ItemId, TestItem>,
    children: ChildIndex,
    by_run: RunItemIndex,
}

/// In-memory repository backend
///
/// Implements all three repository traits. Thread-safe through
/// `parking_lot::RwLock`; suitable for sharing behind `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<ItemTable>,
    runs: RwLock<FxHashMap<RunId, Run>>,
    projects: RwLock<FxHashMap<ProjectId, Project>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project
    pub fn insert_project(&self, project: Project) {
        self.projects.write().insert(project.id, project);
    }

    /// Seed a run
    pub fn insert_run(&self, run: Run) {
        self.runs.write().insert(run.id, run);
    }

    /// Seed an item, indexing its parent and run membership
    pub fn insert_item(&self, item: TestItem) {
        let mut table = self.items.write();
        if let Some(parent) = item.parent {
            table.children.insert(parent, item.id);
        }
        table.by_run.insert(item.run_id, item.id);
        table.items.insert(item.id, item);
    }

    /// Number of stored items
    pub fn item_count(&self) -> usize {
        self.items.read().items.len()
    }
}

impl ItemRepository for MemoryStore {
    fn find_item(&self, id: &ItemId) -> Result<Option<TestItem>> {
        Ok(self.items.read().items.get(id).cloned())
    }

    fn find_children(&self, parent: &ItemId) -> Result<Vec<TestItem>> {
        let table = self.items.read();
        let Some(ids) = table.children.get(parent) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| table.items.get(id).cloned())
            .collect())
    }

    fn items_in_run(&self, run: &RunId) -> Result<Vec<TestItem>> {
        let table = self.items.read();
        let Some(ids) = table.by_run.get(run) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| table.items.get(id).cloned())
            .collect())
    }

    fn save_item(&self, item: &TestItem) -> Result<()> {
        let mut table = self.items.write();
        // Re-index: the saved item may have moved to a new parent or run.
        if let Some(previous) = table.items.get(&item.id).cloned() {
            if let Some(old_parent) = previous.parent {
                table.children.remove(old_parent, &item.id);
            }
            table.by_run.remove(previous.run_id, &item.id);
        }
        if let Some(parent) = item.parent {
            table.children.insert(parent, item.id);
        }
        table.by_run.insert(item.run_id, item.id);
        table.items.insert(item.id, item.clone());
        Ok(())
    }
}

impl RunRepository for MemoryStore {
    fn find_run(&self, id: &RunId) -> Result<Option<Run>> {
        Ok(self.runs.read().get(id).cloned())
    }

    fn save_run(&self, run: &Run) -> Result<()> {
        self.runs.write().insert(run.id, run.clone());
        Ok(())
    }
}

impl ProjectRepository for MemoryStore {
    fn find_project(&self, id: &ProjectId) -> Result<Option<Project>> {
        Ok(self.projects.read().get(id).cloned())
    }
}
