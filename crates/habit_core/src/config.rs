//! Runtime configuration for embedding the tracker.
//!
//! Values come from `HABIT_*` environment variables; empty values are treated
//! as unset.

use crate::logging::{default_log_level, validate_level};
use crate::reminder::notifier::ReminderTemplate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "HABIT_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "HABIT_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "HABIT_LOG_DIR";
pub const REMINDER_RECIPIENT_VAR: &str = "HABIT_REMINDER_RECIPIENT";
pub const REMINDER_SUBJECT_VAR: &str = "HABIT_REMINDER_SUBJECT";
pub const REMINDER_MESSAGE_VAR: &str = "HABIT_REMINDER_MESSAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// SQLite store location; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
    pub reminder: ReminderTemplate,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            reminder: ReminderTemplate::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            let normalized = validate_level(&level).map_err(|_| ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                value: level.clone(),
            })?;
            config.log_level = normalized.to_string();
        }
        if let Some(dir) = read(LOG_DIR_VAR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(recipient) = read(REMINDER_RECIPIENT_VAR) {
            config.reminder.recipient = recipient;
        }
        if let Some(subject) = read(REMINDER_SUBJECT_VAR) {
            config.reminder.subject = subject;
        }
        if let Some(message) = read(REMINDER_MESSAGE_VAR) {
            config.reminder.message = message;
        }
        Ok(config)
    }
}
