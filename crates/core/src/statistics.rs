//! Aggregate statistics counters for runs
//!
//! ## Design
//!
//! Statistics are a derived view: they are always recomputable from the
//! run's current item set and are rewritten from scratch on recalculation.
//! Rebuilding from scratch (rather than applying increments) trades O(items)
//! work per recalculation for immunity to counter drift, and keeps
//! recalculation idempotent: recalculating an unchanged run twice yields the
//! same counters.

use crate::item::{DefectType, ItemStatus};
use serde::{Deserialize, Serialize};

/// Pass/fail/skip execution counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCounter {
    /// All counted items, regardless of status
    pub total: u64,
    /// Items that passed
    pub passed: u64,
    /// Items that failed
    pub failed: u64,
    /// Items that were skipped
    pub skipped: u64,
}

impl ExecutionCounter {
    /// Count one item with the given status
    ///
    /// In-progress items contribute to `total` only.
    pub fn record(&mut self, status: ItemStatus) {
        self.total += 1;
        match status {
            ItemStatus::Passed => self.passed += 1,
            ItemStatus::Failed => self.failed += 1,
            ItemStatus::Skipped => self.skipped += 1,
            ItemStatus::InProgress => {}
        }
    }
}

/// Per-defect-type breakdown counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectCounter {
    /// Failures caused by the product under test
    pub product_bug: u64,
    /// Failures caused by the test automation
    pub automation_bug: u64,
    /// Failures caused by the environment
    pub system_issue: u64,
    /// Failures not yet triaged
    pub to_investigate: u64,
    /// Analyzed non-defects
    pub no_defect: u64,
}

impl DefectCounter {
    /// Count one item with the given defect classification
    pub fn record(&mut self, defect: DefectType) {
        match defect {
            DefectType::ProductBug => self.product_bug += 1,
            DefectType::AutomationBug => self.automation_bug += 1,
            DefectType::SystemIssue => self.system_issue += 1,
            DefectType::ToInvestigate => self.to_investigate += 1,
            DefectType::NoDefect => self.no_defect += 1,
        }
    }
}

/// Aggregate statistics for one run
///
/// ## Invariants
///
/// - Derived, never authoritative: always recomputable from the run's items.
/// - `executions.total >= passed + failed + skipped` (in-progress items
///   contribute to total only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Execution status counters
    pub executions: ExecutionCounter,
    /// Defect-type breakdown counters
    pub defects: DefectCounter,
}
