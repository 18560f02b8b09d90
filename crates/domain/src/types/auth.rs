//! Credential mode and session persistence types

use serde::{Deserialize, Serialize};

/// Which `Authorization` value an outgoing call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// `Basic base64(appKey:appSecret)`, fixed for the life of the client.
    Basic,
    /// Starts equal to basic, becomes `Kinvey <token>` after login.
    Session,
}

crate::impl_wire_name_conversions!(AuthMode {
    Basic => "basic",
    Session => "session",
});

/// Persistence signal emitted when the session credential changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Store `value` (a full `Kinvey <token>` header) under `key`.
    Issued { key: String, value: String },
    /// Forget whatever is stored under `key`.
    Revoked { key: String },
}

impl SessionEvent {
    pub fn key(&self) -> &str {
        match self {
            Self::Issued { key, .. } | Self::Revoked { key } => key,
        }
    }
}
