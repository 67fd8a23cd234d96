//! Error types for the runledger core
//!
//! This module defines the error taxonomy surfaced by the merge engine.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Every variant except `Storage` is detected during validation, before any
//! mutation, so callers may report them directly with no rollback concern.

use crate::types::{ItemId, ProjectId, RunId};
use thiserror::Error;

/// Result type alias for runledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for merge and statistics operations
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced test item does not exist
    #[error("test item not found: {0}")]
    ItemNotFound(ItemId),

    /// Referenced run does not exist
    #[error("run not found: {0}")]
    RunNotFound(RunId),

    /// Referenced project does not exist
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Cross-project reference (run or item outside the target's project)
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Structurally invalid request (e.g. non-suite item, empty source list)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown merge strategy selector in the request
    #[error("unsupported merge strategy: '{0}'")]
    UnsupportedMergeStrategy(String),

    /// Storage layer failure during the mutation or persistence phase
    ///
    /// Not distinguished further by kind; the whole merge must be retried
    /// from scratch by the caller.
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_item_not_found() {
        let id = ItemId::new();
        let msg = Error::ItemNotFound(id).to_string();
        assert!(msg.contains("test item not found"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn test_error_display_run_not_found() {
        let id = RunId::new();
        let msg = Error::RunNotFound(id).to_string();
        assert!(msg.contains("run not found"));
    }

    #[test]
    fn test_error_display_project_not_found() {
        let id = ProjectId::new();
        let msg = Error::ProjectNotFound(id).to_string();
        assert!(msg.contains("project not found"));
    }

    #[test]
    fn test_error_display_access_denied() {
        let msg = Error::AccessDenied("run belongs to another project".into()).to_string();
        assert!(msg.contains("access denied"));
        assert!(msg.contains("another project"));
    }

    #[test]
    fn test_error_display_unsupported_strategy() {
        let msg = Error::UnsupportedMergeStrategy("BY_MAGIC".into()).to_string();
        assert!(msg.contains("unsupported merge strategy"));
        assert!(msg.contains("BY_MAGIC"));
    }

    #[test]
    fn test_error_display_invalid_request() {
        let msg = Error::InvalidRequest("item is not a suite".into()).to_string();
        assert!(msg.contains("invalid request"));
    }
}
