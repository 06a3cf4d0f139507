//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Own one SQLite connection and persist origin-scoped string items in it.
//!
//! # Invariants
//! - The `kv_items` table exists before any read or write.
//! - `(origin, key)` is unique; writes are upserts.
//! - Stored values are opaque text; the store never inspects them.

use super::{KeyValueStore, StoreError, StoreResult};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_items (
    origin TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000),
    PRIMARY KEY (origin, key)
);";

/// Key-value store over one SQLite connection, scoped to `origin`.
pub struct SqliteKeyValueStore {
    conn: Connection,
    origin: String,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>, origin: impl Into<String>) -> StoreResult<Self> {
        let path = path.as_ref();
        Self::open_with("file", origin.into(), || Connection::open(path))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory(origin: impl Into<String>) -> StoreResult<Self> {
        Self::open_with("memory", origin.into(), Connection::open_in_memory)
    }

    /// Wraps an existing connection, creating the item table if needed.
    pub fn from_connection(conn: Connection, origin: impl Into<String>) -> StoreResult<Self> {
        ensure_table(&conn)?;
        Ok(Self {
            conn,
            origin: origin.into(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of items stored under this origin.
    pub fn item_count(&self) -> StoreResult<usize> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM kv_items WHERE origin = ?1;",
            params![self.origin],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn open_with(
        mode: &'static str,
        origin: String,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StoreResult<Self> {
        let started_at = Instant::now();
        let result = connect()
            .map_err(StoreError::from)
            .and_then(|conn| Self::from_connection(conn, origin));
        match &result {
            Ok(store) => info!(
                "event=kv_open module=store status=ok mode={mode} origin={} duration_ms={}",
                store.origin,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=kv_open module=store status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(CREATE_TABLE_SQL)
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE origin = ?1 AND key = ?2;",
                params![self.origin, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (origin, key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (origin, key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.origin, key, value],
        )?;
        debug!(
            "event=kv_set module=store status=ok origin={} key={} bytes={}",
            self.origin,
            key,
            value.len()
        );
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM kv_items WHERE origin = ?1 AND key = ?2;",
            params![self.origin, key],
        )?;
        Ok(())
    }
}
