//! Core domain logic for the habit tracker.
//! This crate is the single source of truth for habit lifecycle invariants.

pub mod chart;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod stats;

pub use chart::{ChartHandle, ChartRenderer, ChartSpec, ChartView};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{CategoryFilter, CategoryRegistry, ALL_CATEGORIES};
pub use model::collections::{ChangeSet, CompletionOutcome, HabitCollections, IndexOutOfRange};
pub use model::habit::{Frequency, Habit, HabitInput, HabitKey};
pub use model::theme::Theme;
pub use reminder::notifier::{
    LogNotificationSender, NotificationError, NotificationSender, ReminderMessage,
    ReminderTemplate,
};
pub use reminder::scheduler::{reminder_instant, ReminderHandle, ReminderScheduler};
pub use repo::collection_repo::{CollectionRepository, PersistedState};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::tracker::{
    CreatedHabit, HabitTracker, HabitTrackerBuilder, TrackerError, TrackerResult,
};
pub use stats::completion::{aggregate_completions, CompletionCounts};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
