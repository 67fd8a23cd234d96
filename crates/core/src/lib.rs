//! Core types for the runledger test-reporting backend
//!
//! This crate defines the foundational vocabulary shared by every layer:
//! - Identifiers (`ItemId`, `RunId`, `ProjectId`)
//! - Timestamps (microsecond precision, monotonic-friendly)
//! - Domain entities (`TestItem`, `Run`, `Project`)
//! - Aggregate statistics counters (derived, never authoritative)
//! - The error taxonomy and `Result` alias
//! - Repository traits that abstract the storage collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod item;
pub mod project;
pub mod run;
pub mod statistics;
pub mod time;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use item::{DefectType, ItemLevel, ItemStatus, TestItem};
pub use project::{CalculationStrategy, Project, ProjectConfiguration};
pub use run::Run;
pub use statistics::{DefectCounter, ExecutionCounter, Statistics};
pub use time::Timestamp;
pub use traits::{ItemRepository, ProjectRepository, RunRepository};
pub use types::{ItemId, ProjectId, RunId};
