//! Run entity
//!
//! A run is one execution of a test plan. It owns a tree of test items and a
//! set of derived aggregate statistics. The merge engine treats the
//! statistics as a cache: after any merge that moves items into or out of a
//! run, the run's counters are rebuilt from its current item set.

use crate::statistics::Statistics;
use crate::types::{ProjectId, RunId};
use serde::{Deserialize, Serialize};

/// One execution of a test plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier
    pub id: RunId,
    /// Project this run belongs to
    pub project_id: ProjectId,
    /// Human-facing run name
    pub name: String,
    /// Sequence number of this run within its project
    pub number: u32,
    /// Derived aggregate counters; rewritten from scratch on recalculation
    pub statistics: Statistics,
}

impl Run {
    /// Create a run with zeroed statistics
    pub fn new(project_id: ProjectId, name: impl Into<String>, number: u32) -> Self {
        Run {
            id: RunId::new(),
            project_id,
            name: name.into(),
            number,
            statistics: Statistics::default(),
        }
    }
}
