//! Completions-per-category aggregation.
//!
//! # Invariants
//! - Keys appear in first-seen order among the filtered habits.
//! - Categories without a matching completion are absent, never zero.
//! - Habits with an empty category are not counted.

use crate::model::category::CategoryFilter;
use crate::model::habit::Habit;

/// Ordered mapping from category name to completion count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    entries: Vec<(String, u32)>,
}

impl CompletionCounts {
    pub fn get(&self, category: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn values(&self) -> Vec<u32> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn increment(&mut self, category: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((category.to_string(), 1)),
        }
    }
}

/// Counts completed habits per category under `filter`.
pub fn aggregate_completions(completed: &[Habit], filter: &CategoryFilter) -> CompletionCounts {
    let mut counts = CompletionCounts::default();
    completed
        .iter()
        .filter(|habit| filter.matches(&habit.category))
        .filter(|habit| !habit.category.is_empty())
        .for_each(|habit| counts.increment(&habit.category));
    counts
}
