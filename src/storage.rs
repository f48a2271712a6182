//! The storage port. Review data lives in browser `localStorage`, but
//! the store only ever talks to the [`KeyValueStorage`] trait so tests
//! (and the server-side render) can run without a browser.

use leptos::logging::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String-keyed, string-valued storage. Writes are best-effort: a
/// failed write is logged and otherwise ignored, matching the
/// fail-open policy for all storage trouble.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. When no window or storage is available (SSR,
/// disabled storage) every read comes back `None` and writes are
/// dropped.
#[derive(Default, Clone)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage(&self) -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match self.local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    warn!("[STORAGE] failed to write key {key}");
                }
            }
            None => warn!("[STORAGE] localStorage unavailable, dropping write to {key}"),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory stand-in for `localStorage`. Clones share the same map so
/// a test can keep a handle and inspect what the store persisted.
#[derive(Default, Clone)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("reviews"), None);
        storage.set("reviews", "[]");
        assert_eq!(storage.get("reviews").as_deref(), Some("[]"));
        storage.remove("reviews");
        assert_eq!(storage.get("reviews"), None);
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("reviewUser", "{}");
        assert_eq!(handle.get("reviewUser").as_deref(), Some("{}"));
    }
}
