//! In-memory to-do collection with write-through persistence.
//!
//! # Responsibility
//! - Provide add/update/upsert/toggle/delete over an ordered item list.
//! - Load persisted state, falling back to seed data when unavailable.
//! - Hand reminder intents to the notifier after each mutation.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - `update` replaces in place; item positions never shift except on delete.
//! - Unknown ids yield `StoreError::NotFound` and leave the collection untouched.
//! - Write paths store only `Work` or `Personal` as the item category.

use crate::model::todo::{Category, TodoDraft, TodoId, TodoItem};
use crate::reminder::policy::{
    cancel_for_removal, dispatch, reconcile, ReminderIntent, ReminderNotifier,
};
use crate::storage::{load_items, save_items, StorageError, StoreConfig};
use chrono::{DateTime, TimeDelta, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for id-addressed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(TodoId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Result envelope for mutating operations.
#[derive(Debug)]
pub struct StoreOutcome<T> {
    pub value: T,
    /// Intent handed to the notifier for the affected item.
    pub reminder: ReminderIntent,
    /// Set when the write-through flush failed; in-memory state is kept.
    pub flush_warning: Option<StorageError>,
}

impl<T> StoreOutcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.flush_warning.is_none()
    }
}

/// Why [`TodoStore::load`] fell back to seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// No file has been written yet.
    Missing,
    /// File exists but could not be read or decoded.
    Unreadable,
}

/// Where the loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted { count: usize },
    Seeded(SeedReason),
}

/// Sample collection shown before anything has been saved.
pub fn seed_items(now: DateTime<Utc>) -> Vec<TodoItem> {
    vec![
        TodoItem::new("ToDo One", Category::Work, now + TimeDelta::hours(1))
            .with_notes("Notes 1"),
        TodoItem::new("ToDo Two", Category::Personal, now + TimeDelta::hours(2))
            .with_notes("Notes 2"),
        TodoItem::new("ToDo Three", Category::Work, now + TimeDelta::hours(3))
            .with_notes("Notes 3"),
    ]
}

/// Completion lives in `is_complete`; a `Completed` category never reaches storage.
fn normalize_for_storage(mut item: TodoItem) -> TodoItem {
    item.category = item.category.to_stored();
    item
}

/// Single-owner to-do collection.
pub struct TodoStore<N: ReminderNotifier> {
    config: StoreConfig,
    items: Vec<TodoItem>,
    notifier: N,
}

impl<N: ReminderNotifier> TodoStore<N> {
    /// Creates an empty store; call [`TodoStore::load`] to read persisted state.
    pub fn new(config: StoreConfig, notifier: N) -> Self {
        Self {
            config,
            items: Vec::new(),
            notifier,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Replaces the in-memory list with persisted state or seed data.
    ///
    /// Never fails: missing or unreadable storage yields the seed dataset,
    /// which is not written back until the next mutation.
    pub fn load(&mut self) -> LoadSource {
        match load_items(&self.config.storage_path) {
            Ok(Some(items)) => {
                let count = items.len();
                self.items = items;
                LoadSource::Persisted { count }
            }
            Ok(None) => {
                info!("event=store_load module=store status=seeded reason=missing");
                self.items = seed_items(Utc::now());
                LoadSource::Seeded(SeedReason::Missing)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=seeded reason=unreadable error_code={}",
                    err.code()
                );
                self.items = seed_items(Utc::now());
                LoadSource::Seeded(SeedReason::Unreadable)
            }
        }
    }

    /// Read-only snapshot in insertion order.
    pub fn all(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new item built from `draft` under a freshly minted id.
    pub fn add(&mut self, draft: TodoDraft) -> StoreOutcome<TodoItem> {
        let mut item = normalize_for_storage(draft.into_item());
        item.id = Uuid::new_v4();
        self.items.push(item.clone());
        self.commit("todo_add", item)
    }

    /// Replaces an existing item in place.
    ///
    /// # Errors
    /// - `NotFound` when no item has `item.id`.
    pub fn update(&mut self, item: TodoItem) -> StoreResult<StoreOutcome<TodoItem>> {
        let index = self.position(item.id)?;
        let item = normalize_for_storage(item);
        self.items[index] = item.clone();
        Ok(self.commit("todo_update", item))
    }

    /// Replaces the item with the same id, or appends it when absent.
    ///
    /// This is the save path after an edit session.
    pub fn upsert(&mut self, item: TodoItem) -> StoreOutcome<TodoItem> {
        let item = normalize_for_storage(item);
        match self.position(item.id) {
            Ok(index) => {
                self.items[index] = item.clone();
                self.commit("todo_update", item)
            }
            Err(_) => {
                self.items.push(item.clone());
                self.commit("todo_add", item)
            }
        }
    }

    /// Saves an edit-session draft through [`TodoStore::upsert`].
    pub fn save_draft(&mut self, draft: TodoDraft) -> StoreOutcome<TodoItem> {
        self.upsert(draft.into_item())
    }

    /// Flips completion state of one item.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    pub fn toggle_complete(&mut self, id: TodoId) -> StoreResult<StoreOutcome<TodoItem>> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        item.is_complete = !item.is_complete;
        let item = item.clone();
        Ok(self.commit("todo_toggle", item))
    }

    /// Removes one item and cancels its reminder.
    ///
    /// Returns the removed item.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown; nothing is flushed in that case.
    pub fn delete(&mut self, id: TodoId) -> StoreResult<StoreOutcome<TodoItem>> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);

        let reminder = cancel_for_removal(&removed);
        dispatch(&self.notifier, &reminder);
        let flush_warning = self.flush("todo_delete", removed.id);

        Ok(StoreOutcome {
            value: removed,
            reminder,
            flush_warning,
        })
    }

    fn position(&self, id: TodoId) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn commit(&self, event: &str, item: TodoItem) -> StoreOutcome<TodoItem> {
        let flush_warning = self.flush(event, item.id);
        let reminder = reconcile(&item, Utc::now());
        dispatch(&self.notifier, &reminder);

        StoreOutcome {
            value: item,
            reminder,
            flush_warning,
        }
    }

    fn flush(&self, event: &str, id: TodoId) -> Option<StorageError> {
        match save_items(&self.config.storage_path, &self.items) {
            Ok(()) => {
                info!(
                    "event={} module=store status=ok id={} count={}",
                    event,
                    id,
                    self.items.len()
                );
                None
            }
            Err(err) => {
                warn!(
                    "event={} module=store status=flush_failed id={} error_code={}",
                    event,
                    id,
                    err.code()
                );
                Some(err)
            }
        }
    }
}
