//! Client configuration

use serde::{Deserialize, Serialize};

use crate::constants::{API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::{KinveyError, Result};

/// Settings needed to talk to one Kinvey application.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub app_key: String,
    pub app_secret: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request (1 = no retries).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_api_version() -> u32 {
    API_VERSION
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_max_attempts() -> usize {
    1
}

impl ClientConfig {
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            base_url: default_base_url(),
            api_version: API_VERSION,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: 1,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL guaranteed to end with a slash.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    /// Rejects configurations that cannot produce a basic credential.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` for a blank key, secret or base URL.
    pub fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() || self.app_secret.trim().is_empty() {
            return Err(KinveyError::Config(
                "init requires an app key and an app secret".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(KinveyError::Config("base URL must not be empty".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(KinveyError::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
