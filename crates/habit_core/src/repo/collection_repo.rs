//! Typed persisted collections on top of a key/value repository.
//!
//! # Responsibility
//! - Load the persisted habit collections, categories and theme at startup.
//! - Write back exactly the entries a transition reported as changed.
//!
//! # Invariants
//! - Each entry is rewritten in full on every change; no partial updates.
//! - Loading never fails: unreadable or malformed entries fall back to their
//!   empty/default value and are logged.

use crate::model::category::CategoryRegistry;
use crate::model::collections::{ChangeSet, HabitCollections};
use crate::model::habit::Habit;
use crate::model::theme::Theme;
use crate::repo::kv_repo::{KvRepository, RepoError, RepoResult};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CATEGORIES_KEY: &str = "categories";
pub const FAVORITE_HABITS_KEY: &str = "favoriteHabits";
pub const COMPLETED_HABITS_KEY: &str = "completedHabits";
pub const DELETED_HABITS_KEY: &str = "deletedHabits";
pub const THEME_KEY: &str = "theme";

/// Everything restored from storage at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub categories: Vec<String>,
    pub favorites: Vec<Habit>,
    pub completed: Vec<Habit>,
    pub deleted: Vec<Habit>,
    pub theme: Theme,
}

pub struct CollectionRepository<R: KvRepository> {
    kv: R,
}

impl<R: KvRepository> CollectionRepository<R> {
    pub fn new(kv: R) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &R {
        &self.kv
    }

    /// Reads every persisted entry, substituting defaults for missing or
    /// malformed values.
    pub fn load(&self) -> PersistedState {
        PersistedState {
            categories: self.load_list(CATEGORIES_KEY),
            favorites: self.load_list(FAVORITE_HABITS_KEY),
            completed: self.load_list(COMPLETED_HABITS_KEY),
            deleted: self.load_list(DELETED_HABITS_KEY),
            theme: self.load_theme(),
        }
    }

    /// Decodes a JSON array entry; anything unreadable yields an empty list.
    pub fn load_list<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=collection_load module=repo status=error key={key} error_code=read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!(
                    "event=collection_load module=repo status=ok key={key} count={}",
                    items.len()
                );
                items
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=error key={key} error_code=malformed_json error={err}"
                );
                Vec::new()
            }
        }
    }

    pub fn load_theme(&self) -> Theme {
        match self.kv.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(
                    "event=collection_load module=repo status=error key={THEME_KEY} error_code=unknown_theme"
                );
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                error!(
                    "event=collection_load module=repo status=error key={THEME_KEY} error_code=read_failed error={err}"
                );
                Theme::default()
            }
        }
    }

    /// Encodes `items` as a JSON array and replaces the entry.
    pub fn save_list<T: Serialize>(&self, key: &'static str, items: &[T]) -> RepoResult<()> {
        let encoded =
            serde_json::to_string(items).map_err(|source| RepoError::Encode { key, source })?;
        self.kv.set(key, &encoded)?;
        debug!(
            "event=collection_save module=repo status=ok key={key} count={}",
            items.len()
        );
        Ok(())
    }

    pub fn save_theme(&self, theme: Theme) -> RepoResult<()> {
        self.kv.set(THEME_KEY, theme.as_str())
    }

    /// Writes back every entry flagged in `changes`.
    ///
    /// Stops at the first failing write; entries written before it stay
    /// written.
    pub fn save_changes(
        &self,
        changes: &ChangeSet,
        collections: &HabitCollections,
        categories: &CategoryRegistry,
        theme: Theme,
    ) -> RepoResult<()> {
        if changes.categories {
            self.save_list(CATEGORIES_KEY, categories.known())?;
        }
        if changes.favorites {
            self.save_list(FAVORITE_HABITS_KEY, collections.favorites())?;
        }
        if changes.completed {
            self.save_list(COMPLETED_HABITS_KEY, collections.completed())?;
        }
        if changes.deleted {
            self.save_list(DELETED_HABITS_KEY, collections.deleted())?;
        }
        if changes.theme {
            self.save_theme(theme)?;
        }
        Ok(())
    }
}
