//! Read-side query entry points.
//!
//! # Responsibility
//! - Turn the store's item list plus filter/search state into display sections.
//! - Keep search matching and sectioning inside core.

pub mod view;
