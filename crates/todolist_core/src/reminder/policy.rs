//! Reminder policy and notifier contract.
//!
//! # Responsibility
//! - Map an item's reminder-related fields onto a `ReminderIntent`.
//! - Hand intents to an external notifier without awaiting the outcome.
//!
//! # Invariants
//! - `Schedule` requires reminders on, item open, due date strictly after
//!   `now`, and a recorded reminder id.
//! - `Cancel` is only emitted for a recorded reminder id.
//! - Fire time is the due date truncated to the minute.

use crate::model::todo::{TodoId, TodoItem};
use chrono::{DateTime, Timelike, Utc};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notification title used for every reminder.
pub const REMINDER_TITLE: &str = "To-Do Reminder";

/// Error reported by a notifier implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierError {
    pub message: String,
}

impl NotifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for NotifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notifier failure: {}", self.message)
    }
}

impl Error for NotifierError {}

/// OS-level notification collaborator.
///
/// Implemented outside the core; the store only issues requests.
pub trait ReminderNotifier {
    /// Asks the user for notification permission. Returns whether it was granted.
    fn request_permission(&self) -> bool;
    fn schedule(&self, request: &ReminderRequest) -> Result<(), NotifierError>;
    fn cancel(&self, reminder_id: &str) -> Result<(), NotifierError>;
}

/// Notifier for headless callers: denies permission and ignores requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ReminderNotifier for NoopNotifier {
    fn request_permission(&self) -> bool {
        false
    }

    fn schedule(&self, _request: &ReminderRequest) -> Result<(), NotifierError> {
        Ok(())
    }

    fn cancel(&self, _reminder_id: &str) -> Result<(), NotifierError> {
        Ok(())
    }
}

/// Payload for a one-shot reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Identifier the notifier registers the reminder under.
    pub reminder_id: String,
    pub item_id: TodoId,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

/// Outcome of reconciling one item's reminder state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderIntent {
    Schedule(ReminderRequest),
    /// Carries the reminder id to remove.
    Cancel(String),
    None,
}

impl ReminderIntent {
    fn label(&self) -> &'static str {
        match self {
            Self::Schedule(_) => "schedule",
            Self::Cancel(_) => "cancel",
            Self::None => "none",
        }
    }
}

/// Decides what the notifier should do for `item` at time `now`.
pub fn reconcile(item: &TodoItem, now: DateTime<Utc>) -> ReminderIntent {
    let Some(reminder_id) = item.reminder_id.as_ref() else {
        return ReminderIntent::None;
    };

    if is_reminder_active(item, now) {
        ReminderIntent::Schedule(ReminderRequest {
            reminder_id: reminder_id.clone(),
            item_id: item.id,
            title: REMINDER_TITLE.to_string(),
            body: item.title.clone(),
            fire_at: truncate_to_minute(item.due_date),
        })
    } else {
        ReminderIntent::Cancel(reminder_id.clone())
    }
}

/// Cancel intent for an item leaving the collection.
pub fn cancel_for_removal(item: &TodoItem) -> ReminderIntent {
    match item.reminder_id.as_ref() {
        Some(reminder_id) => ReminderIntent::Cancel(reminder_id.clone()),
        None => ReminderIntent::None,
    }
}

/// Forwards an intent to the notifier.
///
/// Fire-and-forget: failures are logged at warn level and dropped.
pub fn dispatch<N: ReminderNotifier + ?Sized>(notifier: &N, intent: &ReminderIntent) {
    let result = match intent {
        ReminderIntent::Schedule(request) => notifier.schedule(request),
        ReminderIntent::Cancel(reminder_id) => notifier.cancel(reminder_id),
        ReminderIntent::None => return,
    };

    match result {
        Ok(()) => debug!(
            "event=reminder_dispatch module=reminder status=ok intent={}",
            intent.label()
        ),
        Err(err) => warn!(
            "event=reminder_dispatch module=reminder status=error intent={} error={}",
            intent.label(),
            err
        ),
    }
}

fn is_reminder_active(item: &TodoItem, now: DateTime<Utc>) -> bool {
    item.should_remind && !item.is_complete && item.due_date > now
}

fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(at)
}
