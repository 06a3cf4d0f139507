//! Graph list storage adapter.
//!
//! # Responsibility
//! - Load and save the whole graph list as one JSON blob under a fixed key.
//!
//! # Invariants
//! - An absent or empty blob loads as an empty list.
//! - `save` always writes the full list; last writer wins.
//! - Malformed blobs are rejected unless `MalformedPolicy::TreatAsEmpty` is set.

use crate::config::WidgetConfig;
use crate::model::graph::GraphRecord;
use crate::store::{KeyValueStore, StoreError};
use log::{info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used by previously deployed widgets.
pub const DEFAULT_GRAPH_LIST_KEY: &str = "graphList";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Stored blob is not a JSON array of `{column, value}` objects.
    Malformed(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Malformed(err) => write!(f, "malformed stored graph list: {err}"),
            Self::Encode(err) => write!(f, "failed to encode graph list: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Malformed(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What `load` does with a blob that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Surface `RepoError::Malformed`.
    #[default]
    Fail,
    /// Log a warning and start from an empty list.
    TreatAsEmpty,
}

/// Persistence contract for the graph list.
pub trait GraphListRepository {
    fn load(&self) -> RepoResult<Vec<GraphRecord>>;
    fn save(&mut self, graphs: &[GraphRecord]) -> RepoResult<()>;
}

/// Graph list stored as JSON text in a key-value store.
pub struct StoredGraphListRepository<S: KeyValueStore> {
    store: S,
    key: String,
    malformed: MalformedPolicy,
}

impl<S: KeyValueStore> StoredGraphListRepository<S> {
    /// Uses `DEFAULT_GRAPH_LIST_KEY` and fails on malformed data.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_GRAPH_LIST_KEY, MalformedPolicy::Fail)
    }

    pub fn with_key(store: S, key: impl Into<String>, malformed: MalformedPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            malformed,
        }
    }

    /// Uses the storage key and malformed-data policy from `config`.
    pub fn from_config(store: S, config: &WidgetConfig) -> Self {
        Self::with_key(store, config.storage_key.clone(), config.malformed_storage)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> GraphListRepository for StoredGraphListRepository<S> {
    fn load(&self) -> RepoResult<Vec<GraphRecord>> {
        let raw = match self.store.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                info!(
                    "event=graph_load module=repo status=ok source=default key={}",
                    self.key
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<GraphRecord>>(&raw) {
            Ok(graphs) => {
                info!(
                    "event=graph_load module=repo status=ok source=store key={} count={}",
                    self.key,
                    graphs.len()
                );
                Ok(graphs)
            }
            Err(err) if self.malformed == MalformedPolicy::TreatAsEmpty => {
                warn!(
                    "event=graph_load module=repo status=recovered key={} error={}",
                    self.key, err
                );
                Ok(Vec::new())
            }
            Err(err) => Err(RepoError::Malformed(err)),
        }
    }

    fn save(&mut self, graphs: &[GraphRecord]) -> RepoResult<()> {
        let raw = serde_json::to_string(graphs).map_err(RepoError::Encode)?;
        self.store.set_item(&self.key, &raw)?;
        Ok(())
    }
}
