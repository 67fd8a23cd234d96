//! Merge strategies: how source suites' children attach to the target
//!
//! ## Algorithm
//!
//! Both strategies walk the direct children of every source suite and decide,
//! per child, whether it corresponds to a suite already under the target:
//!
//! - a corresponding suite exists → fold: the child's own children are merged
//!   into that suite, recursively, under the same matching rule;
//! - no correspondence → the whole subtree is reparented under the target,
//!   rewriting `parent` on the child and `run_id` across the subtree.
//!
//! The strategies differ only in the matching rule:
//! - `MergeById` matches by the stable external `unique_id`;
//! - `MergeByName` matches by name plus invocation parameters.
//!
//! Children carrying no match key (e.g. no `unique_id` under BY_ID) are
//! reparented directly. Source suites themselves are never deleted; a folded
//! duplicate stays behind, emptied, under its source.

use runledger_core::{ItemRepository, Result, RunId, TestItem};
use std::collections::HashMap;
use tracing::debug;

/// Merge strategy selector
///
/// A closed set; unknown wire selectors are rejected before any child reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStrategyKind {
    /// Match children by stable external identifier
    ById,
    /// Match children by name and invocation parameters
    ByName,
}

impl MergeStrategyKind {
    /// Parse a wire selector, case-insensitively
    ///
    /// Returns None for unknown selectors; callers surface that as
    /// `UnsupportedMergeStrategy`.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_uppercase().as_str() {
            "BY_ID" => Some(MergeStrategyKind::ById),
            "BY_NAME" => Some(MergeStrategyKind::ByName),
            _ => None,
        }
    }

    /// The canonical wire selector for this strategy
    pub fn as_selector(&self) -> &'static str {
        match self {
            MergeStrategyKind::ById => "BY_ID",
            MergeStrategyKind::ByName => "BY_NAME",
        }
    }
}

/// Polymorphic merge capability over the in-memory hierarchy
pub trait MergeStrategy: Send + Sync {
    /// Attach the sources' children under the target
    ///
    /// Reads and rewrites child items through the repository; the target and
    /// source suite records themselves are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository operation fails.
    fn merge_items(
        &self,
        target: &TestItem,
        sources: &[TestItem],
        items: &dyn ItemRepository,
    ) -> Result<()>;
}

/// BY_ID strategy: children correspond when their `unique_id`s are equal
#[derive(Debug, Default)]
pub struct MergeById;

/// BY_NAME strategy: children correspond when name and parameters are equal
#[derive(Debug, Default)]
pub struct MergeByName;

impl MergeStrategy for MergeById {
    fn merge_items(
        &self,
        target: &TestItem,
        sources: &[TestItem],
        items: &dyn ItemRepository,
    ) -> Result<()> {
        fold_sources(MergeStrategyKind::ById, target, sources, items)
    }
}

impl MergeStrategy for MergeByName {
    fn merge_items(
        &self,
        target: &TestItem,
        sources: &[TestItem],
        items: &dyn ItemRepository,
    ) -> Result<()> {
        fold_sources(MergeStrategyKind::ByName, target, sources, items)
    }
}

/// Resolve a strategy selector to its implementation
///
/// The set is closed, so a `match` over static instances stands in for an
/// open registry.
pub fn strategy_for(kind: MergeStrategyKind) -> &'static dyn MergeStrategy {
    match kind {
        MergeStrategyKind::ById => &MergeById,
        MergeStrategyKind::ByName => &MergeByName,
    }
}

/// Identity under which children of different suites correspond
type MatchKey = (String, Vec<String>);

fn match_key(kind: MergeStrategyKind, item: &TestItem) -> Option<MatchKey> {
    match kind {
        MergeStrategyKind::ById => item.unique_id.clone().map(|id| (id, Vec::new())),
        MergeStrategyKind::ByName => Some((item.name.clone(), item.parameters.clone())),
    }
}

fn fold_sources(
    kind: MergeStrategyKind,
    target: &TestItem,
    sources: &[TestItem],
    items: &dyn ItemRepository,
) -> Result<()> {
    for source in sources {
        let children = items.find_children(&source.id)?;
        debug!(
            source = %source.id,
            target = %target.id,
            children = children.len(),
            strategy = kind.as_selector(),
            "folding source suite into target"
        );
        merge_children(kind, target, children, items)?;
    }
    Ok(())
}

/// Merge a batch of children into `into`, matching against its current suite
/// children.
fn merge_children(
    kind: MergeStrategyKind,
    into: &TestItem,
    children: Vec<TestItem>,
    items: &dyn ItemRepository,
) -> Result<()> {
    // Index the suites already under `into` by match key. Non-suites never
    // fold, so they are not indexed.
    let mut suites_by_key: HashMap<MatchKey, TestItem> = items
        .find_children(&into.id)?
        .into_iter()
        .filter(|c| c.is_suite())
        .filter_map(|c| match_key(kind, &c).map(|k| (k, c)))
        .collect();

    for child in children {
        let key = match_key(kind, &child);
        let counterpart = key
            .as_ref()
            .and_then(|k| suites_by_key.get(k))
            .filter(|_| child.is_suite())
            .cloned();
        match counterpart {
            Some(counterpart) => {
                let grandchildren = items.find_children(&child.id)?;
                merge_children(kind, &counterpart, grandchildren, items)?;
            }
            None => {
                let moved = move_subtree(&child, into, items)?;
                // A moved suite becomes a fold candidate for later sources.
                if moved.is_suite() {
                    if let Some(k) = key {
                        suites_by_key.insert(k, moved);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Reparent `item` under `new_parent`, rewriting run membership across the
/// whole subtree.
fn move_subtree(
    item: &TestItem,
    new_parent: &TestItem,
    items: &dyn ItemRepository,
) -> Result<TestItem> {
    let mut moved = item.clone();
    moved.parent = Some(new_parent.id);
    rehome(&mut moved, new_parent.run_id, items)?;
    Ok(moved)
}

/// Rewrite `run_id` on an item and all of its descendants
fn rehome(item: &mut TestItem, run: RunId, items: &dyn ItemRepository) -> Result<()> {
    item.run_id = run;
    items.save_item(item)?;
    for mut child in items.find_children(&item.id)? {
        rehome(&mut child, run, items)?;
    }
    Ok(())
}
