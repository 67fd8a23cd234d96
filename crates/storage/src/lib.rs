//! In-memory storage backend for runledger
//!
//! This crate implements the repository traits with:
//! - MemoryStore: FxHashMap-based entity maps behind `parking_lot::RwLock`
//! - Secondary indices (parent → children, run → items)
//!
//! It is the reference collaborator: the engine's tests run against it, and
//! embedders may use it directly or swap in a database-backed implementation
//! of the same traits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod memory;

pub use index::{ChildIndex, RunItemIndex};
pub use memory::MemoryStore;
