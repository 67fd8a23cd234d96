//! Secondary indices for efficient item queries
//!
//! This module provides secondary indices that enable efficient queries
//! without scanning the entire item map:
//! - ChildIndex: Maps parent ItemId → Set<ItemId> for child lookups
//! - RunItemIndex: Maps RunId → Set<ItemId> for run-scoped scans
//!   (critical for statistics recalculation)

use runledger_core::{ItemId, RunId};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Secondary index: parent ItemId → child ItemIds
///
/// Changes child lookup from O(total items) to O(children). Merges move
/// items between parents, so entries are removed and re-added on save.
#[derive(Debug, Default)]
pub struct ChildIndex {
    index: FxHashMap<ItemId, BTreeSet<ItemId>>,
}

impl ChildIndex {
    /// Create a new empty ChildIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to its parent's child set
    pub fn insert(&mut self, parent: ItemId, child: ItemId) {
        self.index.entry(parent).or_default().insert(child);
    }

    /// Remove an item from its parent's child set
    ///
    /// Drops the parent entry entirely when the set becomes empty to avoid
    /// accumulating empty sets.
    pub fn remove(&mut self, parent: ItemId, child: &ItemId) {
        if let Some(children) = self.index.get_mut(&parent) {
            children.remove(child);
            if children.is_empty() {
                self.index.remove(&parent);
            }
        }
    }

    /// Get the child ids of a parent, in stable (id) order
    pub fn get(&self, parent: &ItemId) -> Option<&BTreeSet<ItemId>> {
        self.index.get(parent)
    }
}

/// Secondary index: RunId → ItemIds
///
/// Enables O(run size) run scans for statistics recalculation instead of
/// O(total items). Merges move subtrees between runs, so entries are
/// removed and re-added on save.
#[derive(Debug, Default)]
pub struct RunItemIndex {
    index: FxHashMap<RunId, BTreeSet<ItemId>>,
}

impl RunItemIndex {
    /// Create a new empty RunItemIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to a run's set
    pub fn insert(&mut self, run: RunId, item: ItemId) {
        self.index.entry(run).or_default().insert(item);
    }

    /// Remove an item from a run's set
    pub fn remove(&mut self, run: RunId, item: &ItemId) {
        if let Some(items) = self.index.get_mut(&run) {
            items.remove(item);
            if items.is_empty() {
                self.index.remove(&run);
            }
        }
    }

    /// Get the item ids of a run, in stable (id) order
    pub fn get(&self, run: &RunId) -> Option<&BTreeSet<ItemId>> {
        self.index.get(run)
    }
}
