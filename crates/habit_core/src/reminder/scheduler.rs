//! One-shot deferred reminders.
//!
//! # Invariants
//! - Each armed reminder delivers at most one notification.
//! - Arming never blocks the caller; delivery runs on its own timer thread.
//! - Armed reminders cannot be cancelled; dropping the handle detaches it.
//! - Delivery failures are logged and swallowed, never retried.

use crate::reminder::notifier::{NotificationSender, ReminderTemplate};
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

static REMINDER_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{1,2})\s*$").expect("valid reminder time regex"));

/// Parses an `HH:MM` reminder time. Out-of-range fields yield `None`.
pub fn parse_reminder_time(value: &str) -> Option<NaiveTime> {
    let captures = REMINDER_TIME_RE.captures(value)?;
    let hours = captures[1].parse::<u32>().ok()?;
    let minutes = captures[2].parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Today's instant for `reminder_time`, if it is strictly after `now`.
///
/// Malformed times and local times skipped by a DST transition give `None`.
pub fn reminder_instant(reminder_time: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let time = parse_reminder_time(reminder_time)?;
    let naive = now.date_naive().and_time(time);
    let fire_at = Local.from_local_datetime(&naive).earliest()?;
    (fire_at > now).then_some(fire_at)
}

/// Join handle for one armed reminder.
#[derive(Debug)]
pub struct ReminderHandle {
    habit_name: String,
    fire_at: DateTime<Local>,
    thread: JoinHandle<()>,
}

impl ReminderHandle {
    pub fn habit_name(&self) -> &str {
        &self.habit_name
    }

    pub fn fire_at(&self) -> DateTime<Local> {
        self.fire_at
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the reminder fired. Returns `false` if the timer thread
    /// panicked.
    pub fn join(self) -> bool {
        self.thread.join().is_ok()
    }
}

pub struct ReminderScheduler {
    sender: Arc<dyn NotificationSender>,
    template: ReminderTemplate,
}

impl ReminderScheduler {
    pub fn new(sender: Arc<dyn NotificationSender>, template: ReminderTemplate) -> Self {
        Self { sender, template }
    }

    pub fn template(&self) -> &ReminderTemplate {
        &self.template
    }

    /// Schedules one notification for `habit_name` at `fire_at`.
    ///
    /// `now` is the caller's notion of the current instant; a `fire_at` in
    /// the past fires immediately.
    pub fn arm(
        &self,
        habit_name: &str,
        fire_at: DateTime<Local>,
        now: DateTime<Local>,
    ) -> io::Result<ReminderHandle> {
        let delay = (fire_at - now).to_std().unwrap_or_default();
        let message = self.template.render(habit_name);
        let sender = Arc::clone(&self.sender);

        let thread = thread::Builder::new()
            .name("habit-reminder".to_string())
            .spawn(move || {
                thread::sleep(delay);
                match sender.send(&message) {
                    Ok(()) => info!("event=reminder_fire module=reminder status=ok"),
                    Err(err) => error!(
                        "event=reminder_fire module=reminder status=error error_code=delivery_failed error={err}"
                    ),
                }
            })?;

        debug!(
            "event=reminder_arm module=reminder status=ok delay_ms={}",
            delay.as_millis()
        );
        Ok(ReminderHandle {
            habit_name: habit_name.to_string(),
            fire_at,
            thread,
        })
    }
}
