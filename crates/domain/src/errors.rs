//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Kinvey client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum KinveyError {
    /// Missing or malformed setup (app key/secret, base URL, config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend rejected a login/signup or answered 401/403.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// An alias tried to shadow one of the client's reserved names.
    #[error("Name collision: {0}")]
    NameCollision(String),

    #[error("Network error: {0}")]
    Network(String),

    /// 4xx other than auth and not-found.
    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Session token persistence failed.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KinveyError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth(_) => "auth",
            Self::NameCollision(_) => "name_collision",
            Self::Network(_) => "network",
            Self::Client(_) => "client",
            Self::Server(_) => "server",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
            Self::Storage(_) => "storage",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Errors raised synchronously before any network activity.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::NameCollision(_))
    }
}

impl From<serde_json::Error> for KinveyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Kinvey client operations
pub type Result<T> = std::result::Result<T, KinveyError>;
