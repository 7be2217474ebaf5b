//! Habit tracker domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep lifecycle transitions pure; persistence happens in `repo`.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitKey`.
//! - Transitions report what changed instead of writing storage themselves.

pub mod category;
pub mod collections;
pub mod habit;
pub mod theme;
