//! Habit tracker use-case service.
//!
//! # Responsibility
//! - Apply user intents (create, update, delete, complete, favorite,
//!   category and theme changes) to in-memory state.
//! - Write changed collections through to the key/value store.
//! - Keep the completion aggregation and chart in sync with state.
//!
//! # Invariants
//! - Every intent runs a pure transition first, then persistence.
//! - On a write failure the in-memory transition stays applied and the
//!   error is returned to the caller.
//! - The chart is redrawn after every change to completions, filter or theme.
//! - Habit keys are unique within one tracker.

use crate::chart::{ChartRenderer, ChartSpec, ChartView};
use crate::clock::{Clock, SystemClock};
use crate::model::category::{CategoryFilter, CategoryRegistry};
use crate::model::collections::{ChangeSet, CompletionOutcome, HabitCollections, IndexOutOfRange};
use crate::model::habit::{Frequency, Habit, HabitInput, HabitKey};
use crate::model::theme::Theme;
use crate::reminder::notifier::{LogNotificationSender, NotificationSender, ReminderTemplate};
use crate::reminder::scheduler::{reminder_instant, ReminderHandle, ReminderScheduler};
use crate::repo::collection_repo::CollectionRepository;
use crate::repo::kv_repo::{KvRepository, RepoError};
use crate::stats::completion::{aggregate_completions, CompletionCounts};
use chrono::{DateTime, Local, NaiveDate};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug)]
pub enum TrackerError {
    /// Index did not reference an existing active habit. State is untouched.
    IndexOutOfRange { index: usize, len: usize },
    /// Write-through failed after the in-memory change was applied.
    Repo(RepoError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "habit index {index} is out of range for {len} active habits"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<IndexOutOfRange> for TrackerError {
    fn from(value: IndexOutOfRange) -> Self {
        Self::IndexOutOfRange {
            index: value.index,
            len: value.len,
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a create intent.
#[derive(Debug)]
pub struct CreatedHabit {
    pub habit: Habit,
    /// Present when a same-day reminder was armed.
    pub reminder: Option<ReminderHandle>,
}

pub struct HabitTrackerBuilder<R: KvRepository> {
    kv: R,
    clock: Arc<dyn Clock>,
    renderer: Option<Box<dyn ChartRenderer>>,
    sender: Arc<dyn NotificationSender>,
    template: ReminderTemplate,
}

impl<R: KvRepository> HabitTrackerBuilder<R> {
    pub fn new(kv: R) -> Self {
        Self {
            kv,
            clock: Arc::new(SystemClock),
            renderer: None,
            sender: Arc::new(LogNotificationSender),
            template: ReminderTemplate::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_chart_renderer(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_notification_sender(mut self, sender: Arc<dyn NotificationSender>) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_reminder_template(mut self, template: ReminderTemplate) -> Self {
        self.template = template;
        self
    }

    /// Loads persisted state and draws the initial chart.
    ///
    /// Never fails: unreadable entries start empty.
    pub fn build(self) -> HabitTracker<R> {
        let repo = CollectionRepository::new(self.kv);
        let persisted = repo.load();
        let collections =
            HabitCollections::restore(persisted.favorites, persisted.completed, persisted.deleted);
        let today = self.clock.now().date_naive();

        info!(
            "event=tracker_load module=service status=ok categories={} favorites={} completed={} deleted={} theme={}",
            persisted.categories.len(),
            collections.favorites().len(),
            collections.completed().len(),
            collections.deleted().len(),
            persisted.theme.as_str()
        );

        let mut tracker = HabitTracker {
            repo,
            last_key: collections.max_key().unwrap_or(0),
            collections,
            categories: CategoryRegistry::from_known(persisted.categories),
            theme: persisted.theme,
            counts: CompletionCounts::default(),
            chart: ChartView::new(),
            renderer: self.renderer,
            reminders: ReminderScheduler::new(self.sender, self.template),
            clock: self.clock,
            selected_date: today,
            selected_frequency: Frequency::None,
        };
        tracker.refresh_chart();
        tracker
    }
}

pub struct HabitTracker<R: KvRepository> {
    repo: CollectionRepository<R>,
    collections: HabitCollections,
    categories: CategoryRegistry,
    theme: Theme,
    counts: CompletionCounts,
    chart: ChartView,
    renderer: Option<Box<dyn ChartRenderer>>,
    reminders: ReminderScheduler,
    clock: Arc<dyn Clock>,
    last_key: HabitKey,
    selected_date: NaiveDate,
    selected_frequency: Frequency,
}

impl<R: KvRepository> HabitTracker<R> {
    pub fn builder(kv: R) -> HabitTrackerBuilder<R> {
        HabitTrackerBuilder::new(kv)
    }

    /// Tracker with system clock, log-only reminders and no chart.
    pub fn open(kv: R) -> Self {
        Self::builder(kv).build()
    }

    pub fn active(&self) -> &[Habit] {
        self.collections.active()
    }

    pub fn favorites(&self) -> &[Habit] {
        self.collections.favorites()
    }

    pub fn completed(&self) -> &[Habit] {
        self.collections.completed()
    }

    pub fn deleted(&self) -> &[Habit] {
        self.collections.deleted()
    }

    pub fn is_favorite(&self, key: HabitKey) -> bool {
        self.collections.is_favorite(key)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn selected_filter(&self) -> &CategoryFilter {
        self.categories.selected()
    }

    /// Active habits under the current filter, with their active-list index.
    pub fn visible_active(&self) -> Vec<(usize, &Habit)> {
        let filter = self.categories.selected();
        self.collections
            .active()
            .iter()
            .enumerate()
            .filter(|(_, habit)| filter.matches(&habit.category))
            .collect()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn completion_counts(&self) -> &CompletionCounts {
        &self.counts
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_frequency(&self) -> Frequency {
        self.selected_frequency
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn set_selected_frequency(&mut self, frequency: Frequency) {
        self.selected_frequency = frequency;
    }

    pub fn store(&self) -> &R {
        self.repo.kv()
    }

    /// Creates a habit dated `selected_date` and appends it to the active list.
    ///
    /// Registers its category, switches the filter to it and resets the form
    /// defaults. Once the write-through succeeds, arms a reminder if the
    /// reminder time is still ahead today. A failed write returns the error
    /// with the habit kept in memory and no reminder armed.
    pub fn create(
        &mut self,
        input: HabitInput,
        selected_date: NaiveDate,
    ) -> TrackerResult<CreatedHabit> {
        let now = self.clock.now();
        let key = self.next_key(now.timestamp_millis());
        let habit = Habit::from_input(key, input, selected_date);

        let mut changes = self.collections.add(habit.clone()).changes;
        if self.categories.register(&habit.category) {
            changes.categories = true;
        }
        self.categories
            .select(CategoryFilter::from_label(habit.category.clone()));
        changes.filter = true;
        self.selected_date = now.date_naive();
        self.selected_frequency = Frequency::None;

        self.commit(changes)?;
        let reminder = self.arm_reminder(&habit, now);
        info!(
            "event=habit_create module=service status=ok key={} goal_days={} reminder={}",
            habit.key,
            habit.goal_days,
            reminder.is_some()
        );
        Ok(CreatedHabit { habit, reminder })
    }

    /// Replaces the active habit at `index` wholesale.
    pub fn update(&mut self, index: usize, habit: Habit) -> TrackerResult<()> {
        let applied = self.collections.update(index, habit)?;
        self.commit(applied.changes)
    }

    /// Moves the active habit at `index` to the deleted list.
    pub fn delete(&mut self, index: usize) -> TrackerResult<Habit> {
        let applied = self.collections.delete(index)?;
        info!(
            "event=habit_delete module=service status=ok key={} was_favorite={}",
            applied.outcome.key, applied.changes.favorites
        );
        self.commit(applied.changes)?;
        Ok(applied.outcome)
    }

    /// Counts one completion for the active habit at `index`.
    pub fn complete(&mut self, index: usize) -> TrackerResult<CompletionOutcome> {
        let applied = self.collections.complete(index)?;
        debug!(
            "event=habit_complete module=service status=ok index={index} outcome={:?}",
            applied.outcome
        );
        self.commit(applied.changes)?;
        Ok(applied.outcome)
    }

    /// Flips favorite membership of the active habit at `index`.
    ///
    /// Returns whether the habit is a favorite afterwards.
    pub fn toggle_favorite(&mut self, index: usize) -> TrackerResult<bool> {
        let applied = self.collections.toggle_favorite(index)?;
        debug!(
            "event=favorite_toggle module=service status=ok index={index} favorite={}",
            applied.outcome
        );
        self.commit(applied.changes)?;
        Ok(applied.outcome)
    }

    /// Registers a category by exact name. Returns `true` if it was new.
    pub fn create_category(&mut self, name: &str) -> TrackerResult<bool> {
        let created = self.categories.create(name);
        debug!("event=category_create module=service status=ok created={created}");
        self.commit(ChangeSet {
            categories: created,
            ..ChangeSet::none()
        })?;
        Ok(created)
    }

    /// Selects a filter by UI label; `"All"` selects every category.
    pub fn select_category(&mut self, label: &str) {
        self.categories.select(CategoryFilter::from_label(label));
        debug!("event=filter_select module=service status=ok");
        self.refresh_chart();
    }

    /// Switches between light and dark and persists the preference.
    pub fn toggle_theme(&mut self) -> TrackerResult<Theme> {
        self.theme = self.theme.toggled();
        debug!(
            "event=theme_toggle module=service status=ok theme={}",
            self.theme.as_str()
        );
        self.commit(ChangeSet {
            theme: true,
            ..ChangeSet::none()
        })?;
        Ok(self.theme)
    }

    fn commit(&mut self, changes: ChangeSet) -> TrackerResult<()> {
        let saved =
            self.repo
                .save_changes(&changes, &self.collections, &self.categories, self.theme);
        if changes.affects_chart() {
            self.refresh_chart();
        }
        saved.map_err(|err| {
            error!(
                "event=collection_save module=service status=error error_code=write_through_failed error={err}"
            );
            TrackerError::Repo(err)
        })
    }

    fn refresh_chart(&mut self) {
        self.counts = aggregate_completions(self.collections.completed(), self.categories.selected());
        if let Some(renderer) = self.renderer.as_deref_mut() {
            let spec = ChartSpec::from_counts(&self.counts, self.theme);
            self.chart.redraw(renderer, &spec);
        }
    }

    fn arm_reminder(&self, habit: &Habit, now: DateTime<Local>) -> Option<ReminderHandle> {
        let reminder_time = habit.reminder_time.as_deref()?;
        let Some(fire_at) = reminder_instant(reminder_time, now) else {
            debug!(
                "event=reminder_arm module=service status=skipped key={} reason=not_ahead_or_malformed",
                habit.key
            );
            return None;
        };
        match self.reminders.arm(&habit.name, fire_at, now) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(
                    "event=reminder_arm module=service status=error key={} error_code=spawn_failed error={err}",
                    habit.key
                );
                None
            }
        }
    }

    fn next_key(&mut self, now_ms: i64) -> HabitKey {
        let key = if now_ms > self.last_key {
            now_ms
        } else {
            self.last_key + 1
        };
        self.last_key = key;
        key
    }
}
