//! Basic and session `Authorization` bookkeeping
//!
//! The basic value is computed once from the app key/secret pair. The
//! session value starts equal to it, becomes `Kinvey <token>` after a
//! successful login or signup, and reverts to the basic value on logout.
//! Every mutation goes through this type; callers only ever read snapshots.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use kinvey_domain::constants::{auth_token_key, BASIC_SCHEME, SESSION_SCHEME};
use kinvey_domain::{AuthMode, ClientConfig, KinveyError, KinveyMetadata, Result, SessionEvent};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::query::shape::is_truthy;

/// Owner of the basic and session `Authorization` values.
#[derive(Debug)]
pub struct CredentialManager {
    app_key: String,
    basic: String,
    session: RwLock<String>,
}

impl CredentialManager {
    /// Derive the basic credential and start the session on it.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` if the key or secret is blank.
    pub fn new(app_key: &str, app_secret: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(app_key, app_secret))
    }

    /// Same as [`CredentialManager::new`], validating the whole configuration.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` if the configuration is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let encoded = STANDARD.encode(format!("{}:{}", config.app_key, config.app_secret));
        let basic = format!("{BASIC_SCHEME} {encoded}");

        debug!(app_key = %config.app_key, "basic credential derived");

        Ok(Self { app_key: config.app_key.clone(), session: RwLock::new(basic.clone()), basic })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Key under which the session header is persisted.
    pub fn storage_key(&self) -> String {
        auth_token_key(&self.app_key)
    }

    pub fn basic_authorization(&self) -> &str {
        &self.basic
    }

    pub fn session_authorization(&self) -> String {
        self.session.read().clone()
    }

    /// Snapshot of the `Authorization` value for `mode`.
    pub fn authorization(&self, mode: AuthMode) -> String {
        match mode {
            AuthMode::Basic => self.basic.clone(),
            AuthMode::Session => self.session_authorization(),
        }
    }

    /// `true` once a session token has replaced the basic credential.
    pub fn is_authenticated(&self) -> bool {
        *self.session.read() != self.basic
    }

    /// Install `token` as the session credential.
    pub fn on_login_success(&self, token: &str) -> SessionEvent {
        let value = format!("{SESSION_SCHEME} {token}");
        *self.session.write() = value.clone();

        info!(app_key = %self.app_key, "session credential installed");

        SessionEvent::Issued { key: self.storage_key(), value }
    }

    /// Apply a login/signup response body.
    ///
    /// The `error` field is checked before anything is touched; a response
    /// carrying one leaves the session header exactly as it was.
    ///
    /// # Errors
    /// Returns `KinveyError::Auth` if the body carries an error or lacks
    /// `_kmd.authtoken`.
    pub fn on_auth_response(&self, body: &Value) -> Result<SessionEvent> {
        if let Some(error) = body.get("error").filter(|e| is_truthy(e)) {
            return Err(KinveyError::Auth(describe_error(error, body.get("description"))));
        }

        let token = body
            .get("_kmd")
            .and_then(|kmd| KinveyMetadata::deserialize(kmd).ok())
            .and_then(|kmd| kmd.authtoken)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| KinveyError::Auth("response carried no _kmd.authtoken".to_string()))?;

        Ok(self.on_login_success(&token))
    }

    /// Revert the session credential to the basic one.
    pub fn on_logout(&self) -> SessionEvent {
        self.session.write().clone_from(&self.basic);

        info!(app_key = %self.app_key, "session credential cleared");

        SessionEvent::Revoked { key: self.storage_key() }
    }

    /// Reinstall a previously persisted `Authorization` value.
    pub fn restore(&self, authorization: &str) {
        if authorization.trim().is_empty() {
            return;
        }
        *self.session.write() = authorization.to_string();
        debug!(app_key = %self.app_key, "session credential restored");
    }
}

fn describe_error(error: &Value, description: Option<&Value>) -> String {
    let error = error.as_str().map_or_else(|| error.to_string(), str::to_string);
    match description.and_then(Value::as_str) {
        Some(description) => format!("{error}: {description}"),
        None => error,
    }
}
