//! Path template resolution
//!
//! Paths are returned as segments so the HTTP layer can percent-encode each
//! one when it joins them onto the base URL.

use kinvey_domain::constants::RPC_PREFIX;
use kinvey_domain::{EntityKind, KinveyError, Result};

use super::endpoints::{EndpointSpec, IdSource};

/// Segments of `{prefix}{appKey}[/{collection}][/{id}]` for `spec`.
///
/// `entity_id` fills [`IdSource::Entity`]; a missing or empty id drops the
/// trailing segment, as does an empty fixed id.
///
/// # Errors
/// Returns `KinveyError::InvalidInput` when an `Object` endpoint is resolved
/// without a collection name.
pub fn resource_segments(
    spec: &EndpointSpec,
    app_key: &str,
    collection: Option<&str>,
    entity_id: Option<&str>,
) -> Result<Vec<String>> {
    let mut segments = vec![prefix_segment(spec.kind.prefix()), app_key.to_string()];

    if spec.kind == EntityKind::Object {
        let collection = collection.filter(|c| !c.is_empty()).ok_or_else(|| {
            KinveyError::InvalidInput(format!("{} requires a collection name", spec.verb))
        })?;
        segments.push(collection.to_string());
    }

    let id = match spec.id {
        IdSource::Fixed(id) => Some(id),
        IdSource::Entity => entity_id,
    };
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        segments.push(id.to_string());
    }

    Ok(segments)
}

fn prefix_segment(prefix: &str) -> String {
    prefix.trim_end_matches('/').to_string()
}

/// User RPC calls, all sent with the basic credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcAction {
    VerifyEmail,
    ResetPassword,
    CheckUsernameExists,
}

kinvey_domain::impl_wire_name_conversions!(RpcAction {
    VerifyEmail => "user-email-verification-initiate",
    ResetPassword => "user-password-reset-initiate",
    CheckUsernameExists => "check-username-exists",
});

/// Segments of `rpc/{appKey}[/{username}]/{action}`.
///
/// # Errors
/// Returns `KinveyError::InvalidInput` if a per-user action gets no username.
pub fn rpc_segments(action: RpcAction, app_key: &str, username: Option<&str>) -> Result<Vec<String>> {
    let mut segments = vec![prefix_segment(RPC_PREFIX), app_key.to_string()];

    match action {
        RpcAction::VerifyEmail | RpcAction::ResetPassword => {
            let username = username.filter(|u| !u.is_empty()).ok_or_else(|| {
                KinveyError::InvalidInput(format!("{action} requires a username"))
            })?;
            segments.push(username.to_string());
        }
        RpcAction::CheckUsernameExists => {}
    }

    segments.push(action.as_str().to_string());
    Ok(segments)
}
