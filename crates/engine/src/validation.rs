//! Validation chain for merge requests
//!
//! Pure, side-effect-free checks executed before any mutation. A failure
//! aborts the whole merge with no partial state change, so none of these
//! checks needs a compensating action.

use runledger_core::{
    Error, ItemId, ItemRepository, Project, ProjectId, ProjectRepository, Result, Run, RunId,
    RunRepository, TestItem,
};
use std::collections::BTreeSet;

/// Read-only validator over the three repositories
pub struct Validator<'a> {
    items: &'a dyn ItemRepository,
    runs: &'a dyn RunRepository,
    projects: &'a dyn ProjectRepository,
}

impl<'a> Validator<'a> {
    /// Create a validator borrowing the repositories
    pub fn new(
        items: &'a dyn ItemRepository,
        runs: &'a dyn RunRepository,
        projects: &'a dyn ProjectRepository,
    ) -> Self {
        Self {
            items,
            runs,
            projects,
        }
    }

    /// Resolve an item or fail with `ItemNotFound`
    pub fn item(&self, id: &ItemId) -> Result<TestItem> {
        self.items.find_item(id)?.ok_or(Error::ItemNotFound(*id))
    }

    /// Resolve a run or fail with `RunNotFound`
    pub fn run(&self, id: &RunId) -> Result<Run> {
        self.runs.find_run(id)?.ok_or(Error::RunNotFound(*id))
    }

    /// Resolve a project or fail with `ProjectNotFound`
    pub fn project(&self, id: &ProjectId) -> Result<Project> {
        self.projects
            .find_project(id)?
            .ok_or(Error::ProjectNotFound(*id))
    }

    /// Fail with `AccessDenied` unless the run belongs to the project
    pub fn run_in_project(&self, run: &Run, project: &Project) -> Result<()> {
        if run.project_id != project.id {
            return Err(Error::AccessDenied(format!(
                "run '{}' belongs to another project",
                run.id
            )));
        }
        Ok(())
    }

    /// Fail with `AccessDenied` unless the item's run belongs to the project
    pub fn item_in_project(&self, item: &TestItem, project: &Project) -> Result<()> {
        let run = self.run(&item.run_id)?;
        if run.project_id != project.id {
            return Err(Error::AccessDenied(format!(
                "item '{}' belongs to another project",
                item.id
            )));
        }
        Ok(())
    }

    /// Fail with `InvalidRequest` unless the item is at suite level
    pub fn suite(&self, item: &TestItem) -> Result<()> {
        if !item.is_suite() {
            return Err(Error::InvalidRequest(format!(
                "item '{}' is not a suite",
                item.id
            )));
        }
        Ok(())
    }

    /// Collect the ids of an item's ancestors, walking parent links to the
    /// root
    ///
    /// Stops if a parent link points at an already-visited item, so a
    /// malformed hierarchy cannot loop the walk.
    pub fn ancestors(&self, item: &TestItem) -> Result<BTreeSet<ItemId>> {
        let mut ancestors = BTreeSet::new();
        let mut cursor = item.parent;
        while let Some(parent_id) = cursor {
            if !ancestors.insert(parent_id) {
                break;
            }
            cursor = self
                .items
                .find_item(&parent_id)?
                .and_then(|parent| parent.parent);
        }
        Ok(ancestors)
    }

    /// Fail with `InvalidRequest` if the source is the target itself or an
    /// ancestor of the target
    ///
    /// Merging a suite into its own descendant would reparent the target
    /// under itself; such sources are structurally invalid.
    pub fn source_disjoint_from_target(
        &self,
        source: &TestItem,
        target: &TestItem,
        target_ancestors: &BTreeSet<ItemId>,
    ) -> Result<()> {
        if source.id == target.id {
            return Err(Error::InvalidRequest(format!(
                "item '{}' cannot be merged into itself",
                source.id
            )));
        }
        if target_ancestors.contains(&source.id) {
            return Err(Error::InvalidRequest(format!(
                "source '{}' contains the target item",
                source.id
            )));
        }
        Ok(())
    }
}
