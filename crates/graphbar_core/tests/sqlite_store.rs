#![cfg(feature = "native")]

use graphbar_core::{
    GraphListRepository, GraphRecord, KeyValueStore, SqliteKeyValueStore,
    StoredGraphListRepository,
};
use rusqlite::Connection;

fn sample() -> Vec<GraphRecord> {
    vec![GraphRecord::new("cpu", "50"), GraphRecord::new("mem", "0")]
}

#[test]
fn in_memory_store_starts_empty_and_upserts() {
    let mut store = SqliteKeyValueStore::open_in_memory("local").unwrap();
    assert_eq!(store.get_item("graphList").unwrap(), None);

    store.set_item("graphList", "[]").unwrap();
    store.set_item("graphList", "[1]").unwrap();
    assert_eq!(store.get_item("graphList").unwrap().as_deref(), Some("[1]"));
    assert_eq!(store.item_count().unwrap(), 1);

    store.remove_item("graphList").unwrap();
    assert_eq!(store.get_item("graphList").unwrap(), None);
    assert_eq!(store.item_count().unwrap(), 0);
}

#[test]
fn removing_missing_item_is_not_an_error() {
    let mut store = SqliteKeyValueStore::open_in_memory("local").unwrap();
    store.remove_item("graphList").unwrap();
    assert_eq!(store.origin(), "local");
}

#[test]
fn origins_sharing_one_file_do_not_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphbar.sqlite3");

    let mut first =
        StoredGraphListRepository::new(SqliteKeyValueStore::open(&path, "https://a.example").unwrap());
    first.save(&sample()).unwrap();
    first.save(&sample()[..1]).unwrap();

    let second =
        StoredGraphListRepository::new(SqliteKeyValueStore::open(&path, "https://b.example").unwrap());
    assert!(second.load().unwrap().is_empty());
    assert_eq!(first.load().unwrap(), vec![GraphRecord::new("cpu", "50")]);
}

#[test]
fn reopening_file_keeps_stored_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphbar.sqlite3");

    {
        let mut repo =
            StoredGraphListRepository::new(SqliteKeyValueStore::open(&path, "local").unwrap());
        repo.save(&sample()).unwrap();
    }

    let repo = StoredGraphListRepository::new(SqliteKeyValueStore::open(&path, "local").unwrap());
    assert_eq!(repo.load().unwrap(), sample());
}

#[test]
fn from_connection_creates_table_on_blank_database() {
    let conn = Connection::open_in_memory().unwrap();
    let mut store = SqliteKeyValueStore::from_connection(conn, "local").unwrap();
    store.set_item("graphList", "[]").unwrap();
    assert_eq!(store.get_item("graphList").unwrap().as_deref(), Some("[]"));
}

#[test]
fn from_connection_keeps_rows_in_existing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphbar.sqlite3");
    {
        let mut store = SqliteKeyValueStore::open(&path, "local").unwrap();
        store.set_item("graphList", r#"[{"column":"cpu","value":"50"}]"#).unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    let store = SqliteKeyValueStore::from_connection(conn, "local").unwrap();
    assert_eq!(store.item_count().unwrap(), 1);
}

#[test]
fn open_fails_when_path_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteKeyValueStore::open(dir.path(), "local").err().unwrap();
    assert!(err.to_string().starts_with("sqlite error:"));
}
