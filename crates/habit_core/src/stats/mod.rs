//! Derived views computed from persisted collections.
//!
//! # Invariants
//! - Aggregations are pure: same inputs always give the same output.

pub mod completion;
