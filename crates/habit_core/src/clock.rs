//! Wall-clock source used for habit keys, default dates and reminders.

use chrono::{DateTime, Duration, Local};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock for deterministic callers and tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.lock();
        *guard += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Local>> {
        // A poisoned guard still holds a valid timestamp.
        self.now
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{Duration, Local, TimeZone};

    #[test]
    fn fixed_clock_only_moves_when_told() {
        let start = Local.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));
    }
}
