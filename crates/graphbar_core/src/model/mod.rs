//! Domain model for percentage bar entries.
//!
//! # Responsibility
//! - Define the record shape shared by storage, validation and rendering.
//!
//! # Invariants
//! - List order is insertion order; nothing in core re-sorts it.
//! - The persisted field name for `GraphRecord::name` is `column`.

pub mod graph;
