//! Repository traits abstracting the storage collaborator
//!
//! These traits are the seam between the merge engine and whatever holds the
//! data. They enable replacing the in-memory reference backend with a
//! database-backed one without touching the engine.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync). Serialization of conflicting
//! writes is the engine's concern, not the repository's.

use crate::error::Result;
use crate::item::TestItem;
use crate::project::Project;
use crate::run::Run;
use crate::types::{ItemId, ProjectId, RunId};

/// Lookup and persistence of test items
pub trait ItemRepository: Send + Sync {
    /// Get an item by id
    ///
    /// Returns None if the item doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_item(&self, id: &ItemId) -> Result<Option<TestItem>>;

    /// Get the direct children of an item
    ///
    /// Order is unspecified. Empty if the item has no children or doesn't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_children(&self, parent: &ItemId) -> Result<Vec<TestItem>>;

    /// Get every item currently belonging to a run
    ///
    /// Used by statistics recalculation; must reflect all completed merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn items_in_run(&self, run: &RunId) -> Result<Vec<TestItem>>;

    /// Upsert an item by id
    ///
    /// The item's `parent` and `run_id` may differ from the stored version;
    /// implementations must keep any secondary indices consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save_item(&self, item: &TestItem) -> Result<()>;
}

/// Lookup and persistence of runs
pub trait RunRepository: Send + Sync {
    /// Get a run by id
    ///
    /// Returns None if the run doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_run(&self, id: &RunId) -> Result<Option<Run>>;

    /// Upsert a run by id
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save_run(&self, run: &Run) -> Result<()>;
}

/// Lookup of projects
pub trait ProjectRepository: Send + Sync {
    /// Get a project by id
    ///
    /// Returns None if the project doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_project(&self, id: &ProjectId) -> Result<Option<Project>>;
}
