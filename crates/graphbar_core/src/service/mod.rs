//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, validation and view calls into widget operations.
//! - Keep host bindings (browser, CLI) decoupled from storage details.

pub mod graph_service;
