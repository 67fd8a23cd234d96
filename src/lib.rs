//! Runledger - test-reporting backend core
//!
//! Runledger consolidates hierarchical test execution records: given a
//! target suite and a set of source suites (possibly from different runs),
//! it merges them into one logical suite and rebuilds aggregate statistics
//! for every affected run.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use runledger::{
//!     MemoryStore, MergeCoordinator, MergeRequest, Project, Run, TestItem,
//! };
//!
//! let store = Arc::new(MemoryStore::new());
//! let project = Project::new("demo");
//! let run = Run::new(project.id, "nightly", 1);
//! let target = TestItem::suite(run.id, "smoke");
//! let source = TestItem::suite(run.id, "smoke rerun");
//! store.insert_project(project);
//! store.insert_run(run);
//! store.insert_item(target.clone());
//! store.insert_item(source.clone());
//!
//! let coordinator = MergeCoordinator::new(store.clone(), store.clone(), store.clone());
//! let request = MergeRequest {
//!     items: vec![source.id],
//!     merge_strategy: "BY_NAME".to_string(),
//! };
//! let result = coordinator
//!     .merge_test_item("demo", &target.id, &request, "docs")
//!     .unwrap();
//! assert_eq!(result.item, target.id);
//! ```
//!
//! # Architecture
//!
//! The engine operates on repository traits; `MemoryStore` is the reference
//! backend. Swap in any implementation of the same traits for persistence.

// Re-export the public API from the member crates
pub use runledger_core::*;
pub use runledger_engine::*;
pub use runledger_storage::*;
