//! Completion chart boundary.
//!
//! # Responsibility
//! - Turn completion counts and the active theme into a renderer-agnostic
//!   bar chart description.
//! - Own the live chart instance so at most one exists at a time.
//!
//! # Invariants
//! - `ChartView::redraw` disposes the previous handle before drawing again.
//! - The renderer owns no domain state.

use crate::model::theme::Theme;
use crate::stats::completion::CompletionCounts;
use log::debug;

pub const CHART_TITLE: &str = "Completed Habits by Category";

const BACKGROUND_COLORS: [&str; 6] = [
    "rgba(255, 99, 132, 0.2)",
    "rgba(54, 162, 235, 0.2)",
    "rgba(255, 206, 86, 0.2)",
    "rgba(75, 192, 192, 0.2)",
    "rgba(153, 102, 255, 0.2)",
    "rgba(255, 159, 64, 0.2)",
];

const BORDER_COLORS: [&str; 6] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
    "rgba(255, 159, 64, 1)",
];

/// Everything a renderer needs to draw the completion bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    /// Tick and legend label colour, derived from the theme.
    pub tick_color: &'static str,
    pub background_colors: &'static [&'static str],
    pub border_colors: &'static [&'static str],
}

impl ChartSpec {
    pub fn from_counts(counts: &CompletionCounts, theme: Theme) -> Self {
        Self {
            title: CHART_TITLE,
            labels: counts.labels(),
            values: counts.values(),
            tick_color: theme.tick_color(),
            background_colors: &BACKGROUND_COLORS,
            border_colors: &BORDER_COLORS,
        }
    }
}

/// Opaque token for one drawn chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Drawing backend supplied by the presentation layer.
pub trait ChartRenderer {
    fn draw(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn dispose(&mut self, handle: ChartHandle);
}

/// Owner of the currently live chart instance.
#[derive(Debug, Default)]
pub struct ChartView {
    current: Option<ChartHandle>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ChartHandle> {
        self.current
    }

    /// Disposes the live instance, if any, then draws `spec`.
    pub fn redraw(&mut self, renderer: &mut dyn ChartRenderer, spec: &ChartSpec) -> ChartHandle {
        if let Some(previous) = self.current.take() {
            renderer.dispose(previous);
        }
        let handle = renderer.draw(spec);
        debug!(
            "event=chart_redraw module=chart status=ok bars={} tick_color={}",
            spec.labels.len(),
            spec.tick_color
        );
        self.current = Some(handle);
        handle
    }

    pub fn clear(&mut self, renderer: &mut dyn ChartRenderer) {
        if let Some(previous) = self.current.take() {
            renderer.dispose(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartHandle, ChartRenderer, ChartSpec, ChartView, CHART_TITLE};
    use crate::model::category::CategoryFilter;
    use crate::model::habit::{Habit, HabitInput};
    use crate::model::theme::Theme;
    use crate::stats::completion::aggregate_completions;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct CountingRenderer {
        next: u64,
        live: Vec<ChartHandle>,
        draws: usize,
    }

    impl ChartRenderer for CountingRenderer {
        fn draw(&mut self, _spec: &ChartSpec) -> ChartHandle {
            self.next += 1;
            self.draws += 1;
            let handle = ChartHandle(self.next);
            self.live.push(handle);
            handle
        }

        fn dispose(&mut self, handle: ChartHandle) {
            self.live.retain(|live| *live != handle);
        }
    }

    #[test]
    fn redraw_keeps_a_single_live_instance() {
        let mut renderer = CountingRenderer::default();
        let mut view = ChartView::new();
        let spec = ChartSpec::from_counts(&Default::default(), Theme::Light);

        view.redraw(&mut renderer, &spec);
        let second = view.redraw(&mut renderer, &spec);
        assert_eq!(renderer.draws, 2);
        assert_eq!(renderer.live, [second]);

        view.clear(&mut renderer);
        assert!(renderer.live.is_empty());
        assert_eq!(view.current(), None);
    }

    #[test]
    fn spec_follows_counts_and_theme() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 4).unwrap();
        let habit = Habit::from_input(1, HabitInput::new("Run", "Health", 0), date);
        let counts = aggregate_completions(&[habit], &CategoryFilter::All);

        let spec = ChartSpec::from_counts(&counts, Theme::Dark);
        assert_eq!(spec.title, CHART_TITLE);
        assert_eq!(spec.labels, ["Health"]);
        assert_eq!(spec.values, [1]);
        assert_eq!(spec.tick_color, "white");
        assert_eq!(spec.background_colors.len(), spec.border_colors.len());
    }
}
