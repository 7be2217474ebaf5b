//! Habit collections and their pure lifecycle transitions.
//!
//! # Responsibility
//! - Hold the active, favorite, completed and deleted habit lists.
//! - Apply lifecycle transitions in memory and report which persisted
//!   entries changed through a [`ChangeSet`].
//!
//! # Invariants
//! - Favorite and deletion membership is decided by `HabitKey`, never by
//!   field equality.
//! - Completed and deleted lists are append-only.
//! - A completed habit stays in the active list until it is deleted.
//! - Index-based transitions leave state untouched on an out-of-range index.

use crate::model::habit::{Habit, HabitKey};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Flags naming which pieces of state a transition modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub categories: bool,
    pub favorites: bool,
    pub completed: bool,
    pub deleted: bool,
    pub theme: bool,
    /// Selected category filter. Never persisted.
    pub filter: bool,
}

impl ChangeSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            categories: self.categories || other.categories,
            favorites: self.favorites || other.favorites,
            completed: self.completed || other.completed,
            deleted: self.deleted || other.deleted,
            theme: self.theme || other.theme,
            filter: self.filter || other.filter,
        }
    }

    /// Whether the completion chart has to be recomputed and redrawn.
    pub fn affects_chart(&self) -> bool {
        self.completed || self.filter || self.theme
    }
}

/// Result of one transition: the caller-facing outcome plus the change flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    pub outcome: T,
    pub changes: ChangeSet,
}

/// Outcome of a single completion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Countdown moved but the goal is not reached yet.
    Progressed { remaining: u32 },
    /// Countdown reached zero; the habit was appended to completed.
    Completed,
    /// Countdown was already zero; nothing changed.
    AlreadyComplete,
}

/// Index did not reference an existing active habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "habit index {} is out of range for {} active habits",
            self.index, self.len
        )
    }
}

impl Error for IndexOutOfRange {}

pub type TransitionResult<T> = Result<Applied<T>, IndexOutOfRange>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitCollections {
    active: Vec<Habit>,
    favorites: Vec<Habit>,
    completed: Vec<Habit>,
    deleted: Vec<Habit>,
}

impl HabitCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores persisted lists. The active list always starts empty.
    pub fn restore(favorites: Vec<Habit>, completed: Vec<Habit>, deleted: Vec<Habit>) -> Self {
        Self {
            active: Vec::new(),
            favorites,
            completed,
            deleted,
        }
    }

    pub fn active(&self) -> &[Habit] {
        &self.active
    }

    pub fn favorites(&self) -> &[Habit] {
        &self.favorites
    }

    pub fn completed(&self) -> &[Habit] {
        &self.completed
    }

    pub fn deleted(&self) -> &[Habit] {
        &self.deleted
    }

    pub fn is_favorite(&self, key: HabitKey) -> bool {
        self.favorites.iter().any(|habit| habit.key == key)
    }

    /// Largest key seen in any list, used to keep new keys unique.
    pub fn max_key(&self) -> Option<HabitKey> {
        self.active
            .iter()
            .chain(&self.favorites)
            .chain(&self.completed)
            .chain(&self.deleted)
            .map(|habit| habit.key)
            .max()
    }

    /// Appends a new habit to the active list. Active habits are not
    /// persisted, so no flags are raised.
    pub fn add(&mut self, habit: Habit) -> Applied<()> {
        self.active.push(habit);
        Applied {
            outcome: (),
            changes: ChangeSet::none(),
        }
    }

    /// Replaces the active entry at `index` wholesale.
    pub fn update(&mut self, index: usize, habit: Habit) -> TransitionResult<()> {
        let len = self.active.len();
        let slot = self
            .active
            .get_mut(index)
            .ok_or(IndexOutOfRange { index, len })?;
        *slot = habit;
        Ok(Applied {
            outcome: (),
            changes: ChangeSet::none(),
        })
    }

    /// Moves the active entry at `index` into the deleted list and drops any
    /// favorite sharing its key.
    pub fn delete(&mut self, index: usize) -> TransitionResult<Habit> {
        self.check_index(index)?;
        let removed = self.active.remove(index);
        self.deleted.push(removed.clone());

        let mut changes = ChangeSet {
            deleted: true,
            ..ChangeSet::none()
        };
        if self.is_favorite(removed.key) {
            self.favorites.retain(|habit| habit.key != removed.key);
            changes.favorites = true;
        }

        Ok(Applied {
            outcome: removed,
            changes,
        })
    }

    /// Applies one completion action to the active entry at `index`.
    pub fn complete(&mut self, index: usize) -> TransitionResult<CompletionOutcome> {
        self.check_index(index)?;
        let Some(updated) = self.active[index].decremented() else {
            return Ok(Applied {
                outcome: CompletionOutcome::AlreadyComplete,
                changes: ChangeSet::none(),
            });
        };

        let remaining = updated.goal_days;
        self.update(index, updated.clone())?;
        if remaining > 0 {
            return Ok(Applied {
                outcome: CompletionOutcome::Progressed { remaining },
                changes: ChangeSet::none(),
            });
        }

        self.completed.push(updated);
        Ok(Applied {
            outcome: CompletionOutcome::Completed,
            changes: ChangeSet {
                completed: true,
                ..ChangeSet::none()
            },
        })
    }

    /// Adds or removes the active entry at `index` from favorites.
    ///
    /// Returns whether the habit is a favorite afterwards.
    pub fn toggle_favorite(&mut self, index: usize) -> TransitionResult<bool> {
        self.check_index(index)?;
        let habit = &self.active[index];
        let key = habit.key;
        let now_favorite = if self.is_favorite(key) {
            self.favorites.retain(|favorite| favorite.key != key);
            false
        } else {
            self.favorites.push(habit.clone());
            true
        };

        Ok(Applied {
            outcome: now_favorite,
            changes: ChangeSet {
                favorites: true,
                ..ChangeSet::none()
            },
        })
    }

    fn check_index(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.active.len() {
            Ok(())
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.active.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeSet, CompletionOutcome, HabitCollections, IndexOutOfRange};
    use crate::model::habit::{Habit, HabitInput};
    use chrono::NaiveDate;

    fn habit(key: i64, category: &str, goal_days: u32) -> Habit {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        Habit::from_input(key, HabitInput::new("habit", category, goal_days), date)
    }

    #[test]
    fn complete_counts_down_then_appends_once() {
        let mut collections = HabitCollections::new();
        collections.add(habit(1, "Learning", 2));

        let first = collections.complete(0).unwrap();
        assert_eq!(first.outcome, CompletionOutcome::Progressed { remaining: 1 });
        assert!(first.changes.is_empty());
        assert!(collections.completed().is_empty());

        let second = collections.complete(0).unwrap();
        assert_eq!(second.outcome, CompletionOutcome::Completed);
        assert!(second.changes.completed);
        assert_eq!(collections.completed().len(), 1);
        assert_eq!(collections.completed()[0].goal_days, 0);
        assert_eq!(collections.active()[0].goal_days, 0);

        let third = collections.complete(0).unwrap();
        assert_eq!(third.outcome, CompletionOutcome::AlreadyComplete);
        assert_eq!(collections.completed().len(), 1);
    }

    #[test]
    fn delete_drops_matching_favorite_by_key() {
        let mut collections = HabitCollections::new();
        collections.add(habit(1, "Health", 3));
        collections.add(habit(2, "Health", 3));
        collections.toggle_favorite(0).unwrap();
        collections.toggle_favorite(1).unwrap();

        let applied = collections.delete(0).unwrap();
        assert_eq!(applied.outcome.key, 1);
        assert!(applied.changes.deleted);
        assert!(applied.changes.favorites);
        assert_eq!(collections.favorites().len(), 1);
        assert_eq!(collections.favorites()[0].key, 2);
    }

    #[test]
    fn favorite_membership_ignores_field_equality() {
        let mut collections = HabitCollections::new();
        collections.add(habit(1, "Health", 3));
        collections.add(habit(2, "Health", 3));

        assert!(collections.toggle_favorite(0).unwrap().outcome);
        assert!(collections.is_favorite(1));
        assert!(!collections.is_favorite(2));
    }

    #[test]
    fn out_of_range_index_leaves_state_untouched() {
        let mut collections = HabitCollections::new();
        collections.add(habit(1, "Health", 1));
        let before = collections.clone();

        assert_eq!(
            collections.delete(3).unwrap_err(),
            IndexOutOfRange { index: 3, len: 1 }
        );
        assert!(collections.complete(1).is_err());
        assert!(collections.toggle_favorite(1).is_err());
        assert!(collections.update(1, habit(9, "x", 1)).is_err());
        assert_eq!(collections, before);
    }

    #[test]
    fn change_set_merge_and_chart_flags() {
        let merged = ChangeSet {
            deleted: true,
            ..ChangeSet::none()
        }
        .merge(ChangeSet {
            filter: true,
            ..ChangeSet::none()
        });
        assert!(merged.deleted && merged.filter);
        assert!(merged.affects_chart());
        assert!(!ChangeSet {
            favorites: true,
            ..ChangeSet::none()
        }
        .affects_chart());
    }
}
