//! Mock port implementations for testing
//!
//! Provides an in-memory `TokenStore` that records every call, enabling
//! deterministic tests of session persistence without a keychain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kinvey_core::TokenStore;
use kinvey_domain::{KinveyError, Result as DomainResult};

/// Calls observed by [`MockTokenStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Load(String),
    Store(String, String),
    Remove(String),
}

/// In-memory mock for `TokenStore`.
#[derive(Default, Clone)]
pub struct MockTokenStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    fail_writes: bool,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `store`/`remove` always fail.
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn load(&self, key: &str) -> DomainResult<Option<String>> {
        self.calls.lock().unwrap().push(StoreCall::Load(key.to_string()));
        Ok(self.get(key))
    }

    async fn store(&self, key: &str, value: &str) -> DomainResult<()> {
        self.calls.lock().unwrap().push(StoreCall::Store(key.to_string(), value.to_string()));
        if self.fail_writes {
            return Err(KinveyError::Storage("store unavailable".to_string()));
        }
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.calls.lock().unwrap().push(StoreCall::Remove(key.to_string()));
        if self.fail_writes {
            return Err(KinveyError::Storage("store unavailable".to_string()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
