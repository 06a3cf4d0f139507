//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the minimal string key-value contract the storage adapter needs.
//! - Provide an in-memory implementation for headless use and tests.
//!
//! # Invariants
//! - A store is scoped to one origin; keys never leak across origins.
//! - `set_item` overwrites the whole value; there are no partial writes.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[cfg(feature = "native")]
mod sqlite_store;

#[cfg(feature = "native")]
pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a key-value backend.
#[derive(Debug)]
pub enum StoreError {
    /// The backing store cannot be reached (e.g. storage disabled by the host).
    Unavailable(String),
    /// Backend-specific failure carried as text (browser exceptions).
    Backend(String),
    #[cfg(feature = "native")]
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
            #[cfg(feature = "native")]
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            #[cfg(feature = "native")]
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "native")]
impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value store scoped to one origin.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

/// Process-local store. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one item.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut items = BTreeMap::new();
        items.insert(key.into(), value.into());
        Self { items }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
