//! Reminder scheduling decisions.
//!
//! # Responsibility
//! - Decide whether an item's reminder should be scheduled or cancelled.
//! - Define the notifier collaborator contract used to act on decisions.
//!
//! # Invariants
//! - Decision functions perform no I/O.
//! - Notifier calls are best-effort; failures are logged, never retried.

pub mod policy;
