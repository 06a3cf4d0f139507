//! `localStorage`-backed key-value store.

use graphbar_core::{KeyValueStore, StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// Origin-scoped browser storage.
pub(crate) struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Fails when storage is disabled (privacy modes, sandboxed frames).
    pub(crate) fn from_window(window: &Window) -> StoreResult<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable(
                "window.localStorage is not available".to_string(),
            )),
            Err(err) => Err(StoreError::Unavailable(js_error_text(&err))),
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(backend_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        // Quota errors land here.
        self.storage.set_item(key, value).map_err(backend_error)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(js_error_text(&err))
}

pub(crate) fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
