//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record shared by every collection.
//! - Provide the goal-countdown helpers used by completion.
//!
//! # Invariants
//! - `key` is stable and identifies a habit across collections.
//! - `initial_goal_days` is captured at creation and never mutated.
//! - `goal_days` never drops below zero; decrement is guarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for every habit: creation wall-clock time in epoch
/// milliseconds.
pub type HabitKey = i64;

/// Repeat cadence picked on the creation form.
///
/// Informational only; completion is driven by the goal countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Caller-supplied fields for a new habit.
///
/// The presentation layer is expected to have validated these already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitInput {
    pub name: String,
    pub category: String,
    pub goal_days: u32,
    /// `HH:MM` local time for a same-day reminder.
    pub reminder_time: Option<String>,
    pub frequency: Frequency,
}

impl HabitInput {
    pub fn new(name: impl Into<String>, category: impl Into<String>, goal_days: u32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            goal_days,
            reminder_time: None,
            frequency: Frequency::None,
        }
    }

    pub fn with_reminder(mut self, reminder_time: impl Into<String>) -> Self {
        self.reminder_time = Some(reminder_time.into());
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }
}

/// One tracked behavior with a remaining-days goal counter.
///
/// Serialized with camelCase field names to match the persisted entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub key: HabitKey,
    pub name: String,
    pub category: String,
    /// Remaining completions before the habit counts as complete.
    pub goal_days: u32,
    pub initial_goal_days: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
}

impl Habit {
    /// Builds a habit from form input.
    ///
    /// `initial_goal_days` mirrors `input.goal_days`.
    pub fn from_input(key: HabitKey, input: HabitInput, date: NaiveDate) -> Self {
        Self {
            key,
            name: input.name,
            category: input.category,
            goal_days: input.goal_days,
            initial_goal_days: input.goal_days,
            date,
            reminder_time: input.reminder_time,
            frequency: input.frequency,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.goal_days == 0
    }

    /// Fraction of the initial goal already done, in `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        if self.initial_goal_days == 0 {
            return 1.0;
        }
        let done = self.initial_goal_days.saturating_sub(self.goal_days);
        f64::from(done) / f64::from(self.initial_goal_days)
    }

    /// Returns a copy with one fewer remaining day, or `None` when the goal is
    /// already reached.
    pub fn decremented(&self) -> Option<Self> {
        if self.goal_days == 0 {
            return None;
        }
        Some(Self {
            goal_days: self.goal_days - 1,
            ..self.clone()
        })
    }
}
