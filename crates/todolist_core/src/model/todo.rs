//! To-do item model and edit draft.
//!
//! # Responsibility
//! - Define `TodoItem`, its category enum and the derived display category.
//! - Provide the edit-session draft that turns UI input into an item.
//!
//! # Invariants
//! - `id` is minted once and never reused for another item.
//! - Two items are equal iff their ids are equal.
//! - `tag_category()` is `Completed` whenever `is_complete` is set.
//! - Decoding tolerates missing optional fields and unknown categories.

use crate::reminder::policy::ReminderNotifier;
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable identifier for a to-do item.
pub type TodoId = Uuid;

/// Window before the due date in which an open item counts as due soon.
const DUE_SOON_WINDOW_HOURS: i64 = 24;

/// Item category used for storage, filtering and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    /// Display-only; derived from `is_complete`, never persisted as a stored value.
    Completed,
}

impl Category {
    /// Section order used when no category filter is active.
    pub const DISPLAY_ORDER: [Category; 3] =
        [Category::Work, Category::Personal, Category::Completed];

    /// Human-readable label used for section headers and tags.
    pub fn title(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Completed => "Completed",
        }
    }

    /// Maps a category onto the values allowed as stored category.
    ///
    /// `Completed` collapses to `Personal`, matching how the editor presents it.
    pub fn to_stored(self) -> Self {
        match self {
            Self::Work => Self::Work,
            Self::Personal | Self::Completed => Self::Personal,
        }
    }

    /// Parses a persisted category name; unknown names fall back to `Personal`.
    pub fn from_stored_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "work" => Self::Work,
            _ => Self::Personal,
        }
    }
}

/// How close an open item is to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueUrgency {
    /// Completed, or due more than a day from now.
    None,
    /// Due within the next 24 hours.
    DueSoon,
    /// Due date already passed.
    Overdue,
}

/// Canonical to-do record.
///
/// Serialized field names follow the persisted file schema (camelCase,
/// `notificationId` for the reminder identifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Minted on decode when absent from older payloads.
    #[serde(default = "Uuid::new_v4")]
    pub id: TodoId,
    pub title: String,
    pub is_complete: bool,
    #[serde(default, deserialize_with = "deserialize_stored_category")]
    pub category: Category,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub should_remind: bool,
    /// Present iff a reminder is believed to be registered with the notifier.
    #[serde(
        rename = "notificationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reminder_id: Option<String>,
}

impl TodoItem {
    /// Creates an open item with a freshly minted id.
    pub fn new(title: impl Into<String>, category: Category, due_date: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, category, due_date)
    }

    /// Creates an open item with a caller-provided id.
    pub fn with_id(
        id: TodoId,
        title: impl Into<String>,
        category: Category,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            is_complete: false,
            category: category.to_stored(),
            due_date,
            notes: None,
            should_remind: false,
            reminder_id: None,
        }
    }

    /// Builder-style helper for attaching notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Category used for display and grouping.
    pub fn tag_category(&self) -> Category {
        if self.is_complete {
            Category::Completed
        } else {
            self.category
        }
    }

    /// Classifies the due date relative to `now` for highlighting.
    pub fn due_urgency(&self, now: DateTime<Utc>) -> DueUrgency {
        if self.is_complete {
            return DueUrgency::None;
        }
        if self.due_date < now {
            DueUrgency::Overdue
        } else if self.due_date < now + TimeDelta::hours(DUE_SOON_WINDOW_HOURS) {
            DueUrgency::DueSoon
        } else {
            DueUrgency::None
        }
    }
}

impl PartialEq for TodoItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TodoItem {}

impl Hash for TodoItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn deserialize_stored_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCategory {
        Name(String),
        Other(IgnoredAny),
    }

    Ok(match RawCategory::deserialize(deserializer)? {
        RawCategory::Name(name) => Category::from_stored_name(&name),
        RawCategory::Other(_) => Category::Personal,
    })
}

/// Edit-session value built by the UI before an item is saved.
///
/// A draft without `id` describes a new item; one built from an existing
/// item keeps its id so the store can replace it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub id: Option<TodoId>,
    pub title: String,
    pub is_complete: bool,
    pub category: Category,
    pub due_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub should_remind: bool,
    pub reminder_id: Option<String>,
}

impl TodoDraft {
    /// Blank draft for a new entry, due one day after `now`.
    pub fn new_entry(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: String::new(),
            is_complete: false,
            category: Category::Personal,
            due_date: now + TimeDelta::hours(24),
            notes: None,
            should_remind: false,
            reminder_id: None,
        }
    }

    /// Draft prefilled from an existing item.
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            id: Some(item.id),
            title: item.title.clone(),
            is_complete: item.is_complete,
            category: item.category.to_stored(),
            due_date: item.due_date,
            notes: item.notes.clone(),
            should_remind: item.should_remind,
            reminder_id: item.reminder_id.clone(),
        }
    }

    /// Whether the draft may be saved; a title is required.
    pub fn can_save(&self) -> bool {
        !self.title.is_empty()
    }

    /// Turns reminders on if the notifier grants permission.
    ///
    /// Returns the resulting `should_remind` value.
    pub fn enable_reminder<N: ReminderNotifier + ?Sized>(&mut self, notifier: &N) -> bool {
        self.should_remind = notifier.request_permission();
        self.should_remind
    }

    pub fn disable_reminder(&mut self) {
        self.should_remind = false;
    }

    /// Converts the draft into an item.
    ///
    /// Mints an item id when absent, and a reminder id when reminders are on
    /// and none was recorded. An existing reminder id is kept even when
    /// reminders are off so a pending reminder can still be cancelled.
    pub fn into_item(self) -> TodoItem {
        let reminder_id = match self.reminder_id {
            Some(existing) => Some(existing),
            None if self.should_remind => Some(Uuid::new_v4().to_string()),
            None => None,
        };

        TodoItem {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            title: self.title,
            is_complete: self.is_complete,
            category: self.category.to_stored(),
            due_date: self.due_date,
            notes: self.notes,
            should_remind: self.should_remind,
            reminder_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, TodoDraft, TodoItem};
    use chrono::{TimeZone, Utc};

    #[test]
    fn stored_category_names_are_case_insensitive() {
        assert_eq!(Category::from_stored_name("Work"), Category::Work);
        assert_eq!(Category::from_stored_name(" work "), Category::Work);
        assert_eq!(Category::from_stored_name("completed"), Category::Personal);
        assert_eq!(Category::from_stored_name("errands"), Category::Personal);
    }

    #[test]
    fn constructor_never_stores_completed_category() {
        let due = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        let item = TodoItem::new("done already", Category::Completed, due);
        assert_eq!(item.category, Category::Personal);
    }

    #[test]
    fn draft_from_item_keeps_identity() {
        let due = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        let item = TodoItem::new("file taxes", Category::Work, due);
        let rebuilt = TodoDraft::from_item(&item).into_item();
        assert_eq!(rebuilt.id, item.id);
        assert_eq!(rebuilt.category, Category::Work);
    }
}
