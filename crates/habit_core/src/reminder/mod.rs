//! Habit reminders: instant computation, scheduling and delivery contract.
//!
//! # Responsibility
//! - Decide whether a habit's `HH:MM` reminder is still ahead today.
//! - Arm one-shot timers that hand a rendered message to a sender.
//!
//! # Invariants
//! - Reminders never touch tracker state after being armed.

pub mod notifier;
pub mod scheduler;
