//! Port interfaces for session persistence
//!
//! The client never decides where a session token lives; it hands
//! `<appKey>:authToken` entries to whatever implements this trait.

use async_trait::async_trait;
use kinvey_domain::Result;

/// Key-value persistence for session credentials
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the value stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn store(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (idempotent)
    async fn remove(&self, key: &str) -> Result<()>;
}
