//! # Browser `localStorage`-backed slot storage
//!
//! [`LocalStorage`] is the [`Storage`] implementation used on the **web
//! platform**. Slots map one-to-one onto `window.localStorage` keys, so the
//! on-device layout is exactly the slot layout (`trickle_<table>`,
//! `currentUser`, `theme`).
//!
//! ## Error handling
//!
//! `localStorage` can be absent (storage-restricted contexts) and
//! `setItem` rejects when the origin's quota is exhausted. Both surface as
//! [`StoreError::StorageUnavailable`]; the value under the key is left
//! untouched.

use wasm_bindgen::JsValue;

use crate::error::StoreError;
use crate::tables::Storage;

/// `window.localStorage`-backed Storage for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backing(slot: &str) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StoreError::unavailable(slot, "localStorage is not available"))
    }
}

fn js_reason(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl Storage for LocalStorage {
    async fn read(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Self::backing(slot)?
            .get_item(slot)
            .map_err(|err| StoreError::unavailable(slot, js_reason(err)))
    }

    async fn write(&self, slot: &str, contents: &str) -> Result<(), StoreError> {
        // A rejected setItem is how the browser reports quota exhaustion.
        Self::backing(slot)?
            .set_item(slot, contents)
            .map_err(|err| StoreError::unavailable(slot, js_reason(err)))
    }

    async fn remove(&self, slot: &str) -> Result<(), StoreError> {
        Self::backing(slot)?
            .remove_item(slot)
            .map_err(|err| StoreError::unavailable(slot, js_reason(err)))
    }
}
