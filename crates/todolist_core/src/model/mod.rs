//! To-do domain model.
//!
//! # Responsibility
//! - Define the canonical item record shared by store, codec and query code.
//! - Keep derived display state (tag category, due urgency) computed, never stored.
//!
//! # Invariants
//! - Every item is identified by a stable `TodoId`.
//! - Completion is tracked only by `is_complete`; the stored category is
//!   always `Work` or `Personal`.

pub mod todo;
