//! Identifier types for runledger entities
//!
//! This module defines the foundational identifiers:
//! - ItemId: Unique identifier for a test item
//! - RunId: Unique identifier for a run (one execution of a test plan)
//! - ProjectId: Unique identifier for a project

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier using UUID v4
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from raw bytes
            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }

            /// Parse an identifier from a string representation
            ///
            /// Accepts standard UUID format (with or without hyphens).
            /// Returns None if the string is not a valid UUID.
            pub fn from_string(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }

            /// Get the raw bytes of this identifier
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a test item
    ///
    /// Items form a tree per run: suites contain tests, tests contain steps.
    /// ItemIds are stable across merges; merging rewrites parent and run
    /// references, never identity.
    ItemId
}

uuid_id! {
    /// Unique identifier for a run
    ///
    /// A run is one execution of a test plan. It owns a tree of test items
    /// and a set of derived aggregate statistics.
    RunId
}

uuid_id! {
    /// Unique identifier for a project
    ///
    /// Projects own runs and carry per-project configuration, including the
    /// statistics calculation strategy.
    ProjectId
}
