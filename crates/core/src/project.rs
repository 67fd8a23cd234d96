//! Project entity and per-project configuration
//!
//! The only configuration this core reads is the statistics calculation
//! strategy: it decides which hierarchy level contributes to a run's
//! aggregate counters when statistics are rebuilt.

use crate::types::ProjectId;
use serde::{Deserialize, Serialize};

/// Statistics calculation strategy selector
///
/// Resolved per project, once per merge, to an executable recalculation
/// routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationStrategy {
    /// Count every step-level item
    StepBased,
    /// Count test-level items only
    TestBased,
}

/// Per-project configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfiguration {
    /// How run statistics are calculated for this project
    pub statistics_strategy: CalculationStrategy,
}

impl Default for ProjectConfiguration {
    fn default() -> Self {
        ProjectConfiguration {
            statistics_strategy: CalculationStrategy::StepBased,
        }
    }
}

/// A project owning runs and configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier
    pub id: ProjectId,
    /// Project name (unique among projects, assigned by the caller)
    pub name: String,
    /// Per-project configuration
    pub configuration: ProjectConfiguration,
}

impl Project {
    /// Create a project with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            id: ProjectId::new(),
            name: name.into(),
            configuration: ProjectConfiguration::default(),
        }
    }
}
