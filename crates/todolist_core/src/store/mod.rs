//! Collection store and its use-case APIs.
//!
//! # Responsibility
//! - Own the in-memory item list for a single caller.
//! - Flush through storage and reconcile reminders after every mutation.
//!
//! # Invariants
//! - Every mutating call persists before returning (write-through).
//! - Persistence failures never roll back or lose in-memory state.

pub mod todo_store;
