//! Session persistence

pub mod ports;

use kinvey_domain::{Result, SessionEvent};
use tracing::debug;

use self::ports::TokenStore;

/// Forward a credential change to the token store.
///
/// # Errors
/// Propagates the store's `KinveyError::Storage`.
pub async fn persist(store: &dyn TokenStore, event: &SessionEvent) -> Result<()> {
    match event {
        SessionEvent::Issued { key, value } => {
            debug!(key = %key, "persisting session credential");
            store.store(key, value).await
        }
        SessionEvent::Revoked { key } => {
            debug!(key = %key, "removing persisted session credential");
            store.remove(key).await
        }
    }
}
