//! Repository layer over key-value persistence.
//!
//! # Responsibility
//! - Translate between the in-memory graph list and its stored text form.
//! - Keep serialization details out of the model/service layer.

pub mod graph_repo;
