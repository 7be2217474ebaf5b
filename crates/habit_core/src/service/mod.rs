//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure model transitions and repository write-through.
//! - Keep presentation callers decoupled from storage details.

pub mod tracker;
