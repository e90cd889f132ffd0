//! Key/value store abstraction
//!
//! The playback session needs two string slots that survive a reload. Any
//! backend offering string get/set/remove can hold them: an in-memory map for
//! tests, a JSON file for the command line, `localStorage` in a browser.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Durable string-keyed store
///
/// Writes are last-write-wins; there is no batching. Implementations are used
/// from a single thread.
pub trait KeyValueStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (no-op if absent)
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store
///
/// Clones share the same map, the way every script on a page shares one
/// `localStorage`. Dropping a controller and building a new one over a clone
/// behaves like a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let mut store = MemoryStore::new();
        let reader = store.clone();

        store.set("currentAudioIndex", "3").unwrap();
        assert_eq!(reader.get("currentAudioIndex").unwrap().as_deref(), Some("3"));
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn boxed_store_delegates() {
        let shared = MemoryStore::new();
        let mut boxed: Box<dyn KeyValueStore> = Box::new(shared.clone());

        boxed.set("a", "b").unwrap();
        assert_eq!(shared.get("a").unwrap().as_deref(), Some("b"));
    }
}
