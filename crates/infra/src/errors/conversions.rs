//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use kinvey_domain::KinveyError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub KinveyError);

impl From<InfraError> for KinveyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<KinveyError> for InfraError {
    fn from(value: KinveyError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoKinveyError {
    fn into_kinvey(self) -> KinveyError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → KinveyError */
/* -------------------------------------------------------------------------- */

impl IntoKinveyError for KeyringError {
    fn into_kinvey(self) -> KinveyError {
        let description = self.to_string();

        match self {
            KeyringError::NoEntry => KinveyError::NotFound("keychain entry not found".into()),
            KeyringError::BadEncoding(_) => {
                KinveyError::Storage("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => KinveyError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            KeyringError::PlatformFailure(err) => {
                KinveyError::Storage(format!("keychain platform error: {err}"))
            }
            KeyringError::NoStorageAccess(err) => {
                KinveyError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => KinveyError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_kinvey())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → KinveyError */
/* -------------------------------------------------------------------------- */

impl IntoKinveyError for HttpError {
    fn into_kinvey(self) -> KinveyError {
        if self.is_timeout() {
            return KinveyError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return KinveyError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return KinveyError::Serialization(format!("failed to decode response: {self}"));
        }

        KinveyError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_kinvey())
    }
}

/// Classify a non-success HTTP status.
///
/// The body text is kept in the message so the backend's own error payload
/// reaches the caller unmodified.
pub fn status_error(status: StatusCode, url: &str, body: &str) -> KinveyError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    match status.as_u16() {
        401 | 403 => KinveyError::Auth(message),
        404 => KinveyError::NotFound(message),
        400..=499 => KinveyError::Client(message),
        500..=599 => KinveyError::Server(message),
        _ => KinveyError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
