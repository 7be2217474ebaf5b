use chrono::{Local, NaiveDate, TimeZone};
use habit_core::{
    CategoryFilter, CompletionOutcome, FixedClock, Frequency, HabitInput, HabitTracker,
    KvRepository, MemoryKvRepository, TrackerError,
};
use std::sync::Arc;

fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
    ))
}

fn tracker(store: &MemoryKvRepository) -> HabitTracker<&MemoryKvRepository> {
    HabitTracker::builder(store).with_clock(fixed_clock()).build()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

#[test]
fn read_habit_completes_after_two_actions() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);

    tracker
        .create(HabitInput::new("Read", "Learning", 2), day(14))
        .unwrap();

    assert_eq!(
        tracker.complete(0).unwrap(),
        CompletionOutcome::Progressed { remaining: 1 }
    );
    assert_eq!(tracker.active()[0].goal_days, 1);
    assert!(tracker.completed().is_empty());

    assert_eq!(tracker.complete(0).unwrap(), CompletionOutcome::Completed);
    assert_eq!(tracker.active()[0].goal_days, 0);
    assert_eq!(tracker.completed().len(), 1);
    let done = &tracker.completed()[0];
    assert_eq!(done.name, "Read");
    assert_eq!(done.category, "Learning");
    assert_eq!(done.goal_days, 0);
    assert_eq!(done.initial_goal_days, 2);

    tracker.select_category("All");
    assert_eq!(tracker.completion_counts().get("Learning"), Some(1));
    assert_eq!(tracker.completion_counts().len(), 1);
}

#[test]
fn completing_past_zero_is_a_no_op() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    let goal = 4;
    tracker
        .create(HabitInput::new("Stretch", "Health", goal), day(14))
        .unwrap();

    for _ in 0..goal {
        tracker.complete(0).unwrap();
    }
    assert_eq!(tracker.active()[0].goal_days, 0);
    assert_eq!(tracker.completed().len(), 1);

    assert_eq!(
        tracker.complete(0).unwrap(),
        CompletionOutcome::AlreadyComplete
    );
    assert_eq!(tracker.active()[0].goal_days, 0);
    assert_eq!(tracker.completed().len(), 1);
}

#[test]
fn deleting_a_favorite_clears_it_from_favorites() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    let created = tracker
        .create(HabitInput::new("Walk", "Health", 5), day(14))
        .unwrap();

    assert!(tracker.toggle_favorite(0).unwrap());
    assert_eq!(tracker.favorites().len(), 1);
    assert_eq!(tracker.favorites()[0].key, created.habit.key);

    let removed = tracker.delete(0).unwrap();
    assert_eq!(removed.key, created.habit.key);
    assert!(tracker.active().is_empty());
    assert_eq!(tracker.deleted().len(), 1);
    assert_eq!(tracker.deleted()[0].key, created.habit.key);
    assert!(tracker.favorites().is_empty());
}

#[test]
fn deleting_a_non_favorite_leaves_favorites_alone() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    tracker
        .create(HabitInput::new("Walk", "Health", 5), day(14))
        .unwrap();
    tracker
        .create(HabitInput::new("Journal", "Mind", 5), day(14))
        .unwrap();
    tracker.toggle_favorite(0).unwrap();

    tracker.delete(1).unwrap();
    assert_eq!(tracker.favorites().len(), 1);
    assert_eq!(tracker.favorites()[0].name, "Walk");
}

#[test]
fn toggle_favorite_twice_restores_membership() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    let created = tracker
        .create(HabitInput::new("Walk", "Health", 5), day(14))
        .unwrap();

    assert!(tracker.toggle_favorite(0).unwrap());
    assert!(!tracker.toggle_favorite(0).unwrap());
    assert!(tracker.favorites().is_empty());
    assert!(!tracker.is_favorite(created.habit.key));
}

#[test]
fn identical_habits_are_distinct_by_key() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    let first = tracker
        .create(HabitInput::new("Walk", "Health", 5), day(14))
        .unwrap();
    let second = tracker
        .create(HabitInput::new("Walk", "Health", 5), day(14))
        .unwrap();

    assert_ne!(first.habit.key, second.habit.key);
    tracker.toggle_favorite(1).unwrap();
    assert!(!tracker.is_favorite(first.habit.key));
    assert!(tracker.is_favorite(second.habit.key));
}

#[test]
fn create_registers_only_unseen_categories() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);

    tracker
        .create(HabitInput::new("Run", "Health", 3), day(14))
        .unwrap();
    assert_eq!(tracker.categories().known(), ["Health"]);

    tracker
        .create(HabitInput::new("Swim", "Health", 3), day(14))
        .unwrap();
    assert_eq!(tracker.categories().known(), ["Health"]);

    tracker
        .create(HabitInput::new("Code", "Work", 3), day(14))
        .unwrap();
    assert_eq!(tracker.categories().known(), ["Health", "Work"]);
}

#[test]
fn create_selects_category_and_resets_form_defaults() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    tracker.set_selected_date(day(20));
    tracker.set_selected_frequency(Frequency::Weekly);

    let input = HabitInput::new("Plan", "Work", 7).with_frequency(tracker.selected_frequency());
    let selected_date = tracker.selected_date();
    let created = tracker.create(input, selected_date).unwrap();

    assert_eq!(created.habit.date, day(20));
    assert_eq!(created.habit.frequency, Frequency::Weekly);
    assert_eq!(
        tracker.selected_filter(),
        &CategoryFilter::Named("Work".to_string())
    );
    assert_eq!(tracker.selected_date(), day(14));
    assert_eq!(tracker.selected_frequency(), Frequency::None);
    assert!(created.reminder.is_none());
}

#[test]
fn visible_active_follows_the_filter() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    tracker
        .create(HabitInput::new("Run", "Health", 3), day(14))
        .unwrap();
    tracker
        .create(HabitInput::new("Code", "Work", 3), day(14))
        .unwrap();

    let visible: Vec<usize> = tracker.visible_active().iter().map(|(i, _)| *i).collect();
    assert_eq!(visible, [1]);

    tracker.select_category("All");
    assert_eq!(tracker.visible_active().len(), 2);

    tracker.select_category("Unknown");
    assert!(tracker.visible_active().is_empty());
}

#[test]
fn update_replaces_entry_wholesale() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    let created = tracker
        .create(HabitInput::new("Run", "Health", 3), day(14))
        .unwrap();

    let mut edited = created.habit.clone();
    edited.name = "Run 5k".to_string();
    edited.goal_days = 10;
    tracker.update(0, edited.clone()).unwrap();

    assert_eq!(tracker.active(), [edited]);
}

#[test]
fn invalid_index_fails_without_touching_state() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    tracker
        .create(HabitInput::new("Run", "Health", 3), day(14))
        .unwrap();

    let err = tracker.delete(4).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::IndexOutOfRange { index: 4, len: 1 }
    ));
    assert!(tracker.complete(1).is_err());
    assert!(tracker.toggle_favorite(1).is_err());
    let existing = tracker.active()[0].clone();
    assert!(tracker.update(1, existing).is_err());

    assert_eq!(tracker.active().len(), 1);
    assert_eq!(tracker.active()[0].goal_days, 3);
    assert!(tracker.deleted().is_empty());
    assert!(tracker.favorites().is_empty());
}

#[test]
fn create_category_is_exact_match_and_ignores_blank() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);

    assert!(tracker.create_category("Focus").unwrap());
    assert!(!tracker.create_category("Focus").unwrap());
    assert!(!tracker.create_category("  ").unwrap());
    assert_eq!(tracker.categories().filter_options(), ["All", "Focus"]);
}

#[test]
fn habit_in_all_category_keeps_the_wildcard_filter() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);
    tracker
        .create(HabitInput::new("Ship", "Work", 1), day(14))
        .unwrap();
    tracker.complete(0).unwrap();

    tracker
        .create(HabitInput::new("Anything", "All", 1), day(14))
        .unwrap();

    assert_eq!(tracker.selected_filter(), &CategoryFilter::All);
    assert_eq!(tracker.categories().known(), ["Work"]);
    assert_eq!(tracker.completion_counts().get("Work"), Some(1));
    assert_eq!(tracker.visible_active().len(), 2);
}

#[test]
fn habit_with_blank_category_registers_it_once() {
    let store = MemoryKvRepository::new();
    let mut tracker = tracker(&store);

    tracker.create(HabitInput::new("Tidy", "", 1), day(14)).unwrap();
    tracker.create(HabitInput::new("Sweep", "", 1), day(14)).unwrap();
    assert_eq!(tracker.categories().known(), [""]);
    assert_eq!(store.get("categories").unwrap().as_deref(), Some(r#"[""]"#));

    tracker.complete(0).unwrap();
    tracker.select_category("All");
    assert!(tracker.completion_counts().is_empty());
}
