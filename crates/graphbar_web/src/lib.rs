#![forbid(unsafe_code)]

//! Browser bindings for the GraphBar widget.
//!
//! # Responsibility
//! - Bind `graphbar_core` to the page: DOM surface, `localStorage`, timers and
//!   the three click listeners.
//! - Export a small `wasm-bindgen` API (`GraphWidget`) to JS.
//!
//! # Invariants
//! - Exported functions never panic across the JS boundary; failures surface
//!   as rejected `Result`s with a string message.
//! - Everything outside `events` is wasm32-only; native builds compile the
//!   pure helpers so `cargo test --workspace` covers them.

pub mod events;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::GraphWidget;
