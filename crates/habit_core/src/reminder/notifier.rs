//! Notification delivery contract for habit reminders.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_REMINDER_SUBJECT: &str = "Reminder: Complete Your Habit";
pub const DEFAULT_REMINDER_MESSAGE: &str = "Don't forget to complete your habit: {habit}";
const HABIT_PLACEHOLDER: &str = "{habit}";

/// Fixed recipient, subject and message template for reminders.
///
/// `message` may reference the habit name with a `{habit}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderTemplate {
    pub recipient: String,
    pub subject: String,
    pub message: String,
}

impl Default for ReminderTemplate {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            subject: DEFAULT_REMINDER_SUBJECT.to_string(),
            message: DEFAULT_REMINDER_MESSAGE.to_string(),
        }
    }
}

impl ReminderTemplate {
    pub fn render(&self, habit_name: &str) -> ReminderMessage {
        ReminderMessage {
            recipient: self.recipient.clone(),
            subject: self.subject.clone(),
            message: self.message.replace(HABIT_PLACEHOLDER, habit_name),
        }
    }
}

/// One rendered reminder ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub recipient: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    Delivery(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery(reason) => write!(f, "reminder delivery failed: {reason}"),
        }
    }
}

impl Error for NotificationError {}

/// Best-effort delivery backend (email, push, ...). Called from the reminder
/// timer thread, never from the tracker.
pub trait NotificationSender: Send + Sync {
    fn send(&self, message: &ReminderMessage) -> Result<(), NotificationError>;
}

/// Sender that only records the delivery in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSender;

impl NotificationSender for LogNotificationSender {
    fn send(&self, message: &ReminderMessage) -> Result<(), NotificationError> {
        info!(
            "event=reminder_deliver module=reminder status=ok sender=log subject_len={} message_len={}",
            message.subject.len(),
            message.message.len()
        );
        Ok(())
    }
}
