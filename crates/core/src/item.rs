//! Test item entity and its classification enums
//!
//! ## Design
//!
//! Items form a tree per run: suites contain tests, tests contain steps.
//! The merge engine only ever targets suite-level items; lower levels move
//! between suites as whole subtrees.
//!
//! ## Matching identity
//!
//! Two fields exist purely so merge strategies can decide which children of
//! different suites correspond to each other:
//! - `unique_id`: a stable external identifier assigned by the reporting
//!   client (BY_ID matching)
//! - `name` + `parameters`: the human-facing identity (BY_NAME matching)

use crate::time::Timestamp;
use crate::types::{ItemId, RunId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hierarchy level of a test item
///
/// Only `Suite` items may participate in a merge, as target or source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemLevel {
    /// Container for tests (and nested suites); the only mergeable level
    Suite,
    /// A single test case
    Test,
    /// An individual step inside a test
    Step,
}

impl ItemLevel {
    /// Check whether this level is suite level
    pub fn is_suite(&self) -> bool {
        matches!(self, ItemLevel::Suite)
    }
}

/// Execution status of a test item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Item finished successfully
    Passed,
    /// Item finished with a failure
    Failed,
    /// Item was skipped
    Skipped,
    /// Item has not finished yet
    InProgress,
}

/// Defect classification attached to a failed or skipped item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectType {
    /// Failure caused by the product under test
    ProductBug,
    /// Failure caused by the test automation itself
    AutomationBug,
    /// Failure caused by the environment or infrastructure
    SystemIssue,
    /// Failure not yet triaged
    ToInvestigate,
    /// Analyzed and explicitly marked as not a defect
    NoDefect,
}

/// A node in a run's test item tree
///
/// ## Invariants
///
/// - `parent == None` means the item is a root of its run's tree.
/// - `start_time <= end_time` for finished items.
/// - Identity (`id`) never changes; merges rewrite `parent` and `run_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    /// Item identifier
    pub id: ItemId,
    /// Run this item currently belongs to
    pub run_id: RunId,
    /// Parent item, if any
    pub parent: Option<ItemId>,
    /// Human-facing item name
    pub name: String,
    /// Stable external identifier assigned by the reporting client
    pub unique_id: Option<String>,
    /// Invocation parameters distinguishing same-named items
    pub parameters: Vec<String>,
    /// Hierarchy level
    pub level: ItemLevel,
    /// Execution status
    pub status: ItemStatus,
    /// Defect classification, if triaged
    pub defect: Option<DefectType>,
    /// Free-form tags (unordered, no duplicates)
    pub tags: BTreeSet<String>,
    /// Optional free-form description
    pub description: Option<String>,
    /// Execution start time
    pub start_time: Timestamp,
    /// Execution end time
    pub end_time: Timestamp,
}

impl TestItem {
    /// Create a suite-level item with the given name
    ///
    /// Starts with empty tags, no description, and an epoch time window;
    /// callers fill in what they know.
    pub fn suite(run_id: RunId, name: impl Into<String>) -> Self {
        Self::new(run_id, name, ItemLevel::Suite)
    }

    /// Create an item at an arbitrary level
    pub fn new(run_id: RunId, name: impl Into<String>, level: ItemLevel) -> Self {
        TestItem {
            id: ItemId::new(),
            run_id,
            parent: None,
            name: name.into(),
            unique_id: None,
            parameters: Vec::new(),
            level,
            status: ItemStatus::InProgress,
            defect: None,
            tags: BTreeSet::new(),
            description: None,
            start_time: Timestamp::EPOCH,
            end_time: Timestamp::EPOCH,
        }
    }

    /// Check whether this item is at suite level
    pub fn is_suite(&self) -> bool {
        self.level.is_suite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_level_is_suite() {
        assert!(ItemLevel::Suite.is_suite());
        assert!(!ItemLevel::Test.is_suite());
        assert!(!ItemLevel::Step.is_suite());
    }

    #[test]
    fn test_suite_constructor_defaults() {
        let run = RunId::new();
        let item = TestItem::suite(run, "smoke suite");
        assert!(item.is_suite());
        assert_eq!(item.run_id, run);
        assert_eq!(item.parent, None);
        assert!(item.tags.is_empty());
        assert_eq!(item.description, None);
        assert_eq!(item.status, ItemStatus::InProgress);
    }

    #[test]
    fn test_item_serde_roundtrip() {
        let mut item = TestItem::new(RunId::new(), "login test", ItemLevel::Test);
        item.tags.insert("smoke".to_string());
        item.description = Some("checks login".to_string());
        item.defect = Some(DefectType::ProductBug);
        let json = serde_json::to_string(&item).unwrap();
        let back: TestItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
