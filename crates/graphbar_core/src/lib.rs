//! Core logic for the GraphBar percentage-bar widget.
//! This crate is the single source of truth for entry rules and list state;
//! host crates only bind it to a DOM or a terminal.

pub mod config;
pub mod controller;
pub mod diagnostics;
#[cfg(feature = "native")]
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use config::{ConfigError, ElementIds, ErrorMessages, FieldLabels, WidgetConfig};
pub use controller::{GraphController, ListClickTarget};
#[cfg(feature = "native")]
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::graph::{GraphInput, GraphRecord, InputField};
pub use notify::{
    Clock, ManualClock, Notification, NotificationCenter, NotificationId, NotificationPhase,
    NotificationTiming, SystemClock,
};
pub use repo::graph_repo::{
    GraphListRepository, MalformedPolicy, RepoError, RepoResult, StoredGraphListRepository,
};
pub use service::graph_service::{AddOutcome, GraphService};
#[cfg(feature = "native")]
pub use store::SqliteKeyValueStore;
pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult};
pub use validation::{validate_input, ValidationError, ValidationReport, Violation};
pub use view::{Control, GraphRow, GraphView, MemorySurface, Surface};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
