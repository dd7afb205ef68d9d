//! Core list engine for the to-do app.
//! UI layers call into this crate for every read and write of the item list.

pub mod logging;
pub mod model;
pub mod query;
pub mod reminder;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::todo::{Category, DueUrgency, TodoDraft, TodoId, TodoItem};
pub use query::view::{build_view, matches_terms, search_terms, Section, TodoQuery, TodoView};
pub use reminder::policy::{
    dispatch, reconcile, NoopNotifier, NotifierError, ReminderIntent, ReminderNotifier,
    ReminderRequest, REMINDER_TITLE,
};
pub use storage::codec::{decode, encode, SCHEMA_VERSION};
pub use storage::{load_items, save_items, StorageError, StorageResult, StoreConfig};
pub use store::todo_store::{
    seed_items, LoadSource, SeedReason, StoreError, StoreOutcome, StoreResult, TodoStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
