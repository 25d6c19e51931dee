//! Last-known field values, keyed per semantic field
//!
//! The engine reads a key once when a field mounts and overwrites it on every
//! non-empty change. Implementations must make `set` cheap: it is called on
//! every keystroke and must not hold up the completion pipelines.

use std::collections::HashMap;
use std::sync::Mutex;

mod file_cache;

pub use file_cache::TomlFileCache;

/// Injected key-value persistence
pub trait PathCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Fire-and-forget write. Failures are the implementation's to log.
    fn set(&self, key: &str, value: &str);
}

/// Process-local cache, used by tests and hosts that don't persist
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::new();
        cache.set(key, value);
        cache
    }
}

impl PathCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
