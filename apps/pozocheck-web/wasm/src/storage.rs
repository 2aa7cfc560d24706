//! Browser localStorage wrapper for persisting the dossier and limits

use review_engine::{KeyValueStore, ReviewError};
use wasm_bindgen::prelude::*;

/// `localStorage` of the current window
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let storage = window.local_storage()?.ok_or("No localStorage")?;
        Ok(Self { storage })
    }
}

fn storage_error(err: JsValue) -> ReviewError {
    let message = err
        .as_string()
        .unwrap_or_else(|| format!("{:?}", err));
    ReviewError::Storage(message)
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> review_engine::Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> review_engine::Result<()> {
        // Fails when the origin's quota is exhausted
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> review_engine::Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}

/// Drop both persisted records (for testing/reset)
#[wasm_bindgen]
pub fn clear_saved_state() -> Result<(), JsValue> {
    let mut storage = LocalStorage::open()?;
    storage
        .remove(review_engine::store::DOSSIER_KEY)
        .and_then(|_| storage.remove(review_engine::store::LIMITS_KEY))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    web_sys::console::log_1(&"Cleared saved review state".into());
    Ok(())
}
