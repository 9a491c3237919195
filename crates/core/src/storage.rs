//! Key-value storage abstraction for persisted client state.
//!
//! The cart and the session live in a browser-style persisted store. The
//! store is injected at construction so tests substitute an in-memory fake.
//! All operations are best-effort: a missing or unusable store degrades to
//! "nothing persisted" rather than failing the caller.

use std::collections::HashMap;
use std::sync::Mutex;

/// Persisted string-keyed storage (localStorage-shaped).
///
/// - No error channel: implementations swallow their own failures and log.
/// - Interior mutability: callers hold `&self` only.
/// - Cross-process/tab writes are last-write-wins; no locking is provided.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser execution contexts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => {
                tracing::warn!(key, "storage lock poisoned; reading as empty");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
