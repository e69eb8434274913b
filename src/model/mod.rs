//! Domain model for the time-tracking core.
//!
//! # Responsibility
//! - Define the canonical project entity used by repository and service code.
//! - Keep name-validation rules next to the data they constrain.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Deletion is represented by the durable store's active flag, not by
//!   removing rows.

pub mod project;
