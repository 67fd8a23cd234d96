//! Merge and statistics engine for runledger
//!
//! This crate implements the consolidation of test suites and the
//! recalculation of derived run statistics:
//! - Validation chain: existence, suite-level, and project-membership
//!   checks, all before any mutation
//! - Merge strategies: BY_ID / BY_NAME child matching and reparenting
//! - Metadata reconciler: tag union, description folding, time window
//! - Statistics facades: per-strategy from-scratch counter rebuilds
//! - Merge coordinator: the single exposed operation sequencing it all
//!
//! # Concurrency
//!
//! The engine is synchronous. Concurrent merges on the same target item are
//! serialized by a lock keyed by target item id; statistics recalculation is
//! serialized per run inside the facade. Merges on disjoint targets proceed
//! independently.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod facade;
pub mod lock;
pub mod merge;
pub mod reconcile;
pub mod strategy;
pub mod validation;

pub use facade::{StatisticsFacade, StatisticsFacadeFactory};
pub use lock::{KeyedGuard, KeyedLock};
pub use merge::{MergeCoordinator, MergeRequest, MergeResult};
pub use reconcile::reconcile;
pub use strategy::{strategy_for, MergeStrategy, MergeStrategyKind};
pub use validation::Validator;
