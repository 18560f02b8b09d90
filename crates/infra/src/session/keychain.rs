//! Keychain-backed session persistence
//!
//! Each `<appKey>:authToken` key becomes one keychain entry under a
//! configurable service name.

use async_trait::async_trait;
use keyring::Entry;
use kinvey_core::TokenStore;
use kinvey_domain::{KinveyError, Result};
use tracing::debug;

use crate::errors::InfraError;

pub const DEFAULT_SERVICE_NAME: &str = "Kinvey.session";

/// Token store backed by the platform keychain
pub struct KeychainTokenStore {
    service_name: String,
}

impl KeychainTokenStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| KinveyError::from(InfraError::from(e)))
    }
}

impl Default for KeychainTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

#[async_trait]
impl TokenStore for KeychainTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        debug!(service = %self.service_name, key = %key, "Loading session from keychain");

        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "Storing session in keychain");

        self.entry(key)?.set_password(value).map_err(|e| InfraError::from(e).into())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "Deleting session from keychain");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_name() {
        assert_eq!(KeychainTokenStore::default().service_name(), "Kinvey.session");
    }

    // Requires a real platform keychain.
    #[tokio::test]
    #[ignore]
    async fn keychain_round_trip() {
        let store = KeychainTokenStore::new("Kinvey.session.test");
        store.store("kid_test:authToken", "Kinvey t").await.unwrap();
        assert_eq!(store.load("kid_test:authToken").await.unwrap().as_deref(), Some("Kinvey t"));
        store.remove("kid_test:authToken").await.unwrap();
        assert!(store.load("kid_test:authToken").await.unwrap().is_none());
    }
}
