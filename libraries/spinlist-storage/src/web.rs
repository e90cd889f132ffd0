//! Browser `localStorage` backend (feature `web`)

use crate::error::{Result, StorageError};
use crate::kv::KeyValueStore;
use web_sys::Storage;

/// Store backed by the page's `localStorage`
///
/// Survives full page reloads within the same browser profile.
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Open the window's `localStorage`
    pub fn local() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::write(key, format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::write(key, format!("{e:?}")))
    }
}
