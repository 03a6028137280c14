// src/auth/store.rs
//! Key-value storage for accounts and sessions.

use parking_lot::RwLock;
use std::collections::BTreeMap;

/// A string key-value store. Values are JSON documents owned by the caller.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    /// All entries whose key starts with `prefix`, in key order.
    fn list(&self, prefix: &str) -> Vec<(String, String)>;

    /// Returns the removed value, if there was one.
    fn remove(&self, key: &str) -> Option<String>;
}

/// Process-local store. Locks are held for one map operation only.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn list(&self, prefix: &str) -> Vec<(String, String)> {
        self.entries
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }
}
