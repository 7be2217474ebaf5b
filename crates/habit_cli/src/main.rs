//! CLI status probe.
//!
//! # Responsibility
//! - Verify `habit_core` linkage and configuration outside any UI shell.
//! - Print a deterministic summary of the persisted tracker state.

use habit_core::db::{open_db, open_db_in_memory};
use habit_core::{
    init_logging, ChartHandle, ChartRenderer, ChartSpec, HabitTracker, LogNotificationSender,
    SqliteKvRepository, TrackerConfig,
};
use std::error::Error;
use std::sync::Arc;

/// Prints each drawn chart as text bars on stdout.
#[derive(Default)]
struct TextChartRenderer {
    next: u64,
}

impl ChartRenderer for TextChartRenderer {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle {
        self.next += 1;
        println!("chart title={:?}", spec.title);
        for (label, value) in spec.labels.iter().zip(&spec.values) {
            println!("  {label:<16} {}", "#".repeat(*value as usize));
        }
        ChartHandle(self.next)
    }

    fn dispose(&mut self, _handle: ChartHandle) {}
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let tracker = HabitTracker::builder(SqliteKvRepository::new(&conn))
        .with_chart_renderer(Box::<TextChartRenderer>::default())
        .with_notification_sender(Arc::new(LogNotificationSender))
        .with_reminder_template(config.reminder.clone())
        .build();

    println!("habit_core ping={}", habit_core::ping());
    println!("habit_core version={}", habit_core::core_version());
    println!(
        "categories={}",
        tracker.categories().filter_options().join(",")
    );
    println!(
        "favorites={} completed={} deleted={}",
        tracker.favorites().len(),
        tracker.completed().len(),
        tracker.deleted().len()
    );
    for (category, count) in tracker.completion_counts().entries() {
        println!("completed[{category}]={count}");
    }
    println!("theme={}", tracker.theme().as_str());
    Ok(())
}
