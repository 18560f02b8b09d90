//! User-facing payload types

use serde::{Deserialize, Serialize};

/// Username/password pair posted to `user/{appKey}/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The `_kmd` block the backend attaches to entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinveyMetadata {
    /// Session token, only present on login/signup responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authtoken: Option<String>,
    /// Last modified time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmt: Option<String>,
    /// Entity creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ect: Option<String>,
}

/// Response body of `rpc/{appKey}/check-username-exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameAvailability {
    pub username_exists: bool,
}
