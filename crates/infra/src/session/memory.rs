use std::collections::HashMap;

use async_trait::async_trait;
use kinvey_core::TokenStore;
use kinvey_domain::Result;
use parking_lot::RwLock;

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. with a session saved elsewhere.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.write().insert(key.into(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
