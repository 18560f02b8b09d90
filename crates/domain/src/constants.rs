//! Wire constants
//!
//! Centralized location for the fixed values the backend expects.

/// Value sent in [`API_VERSION_HEADER`] on every request.
pub const API_VERSION: u32 = 3;
pub const API_VERSION_HEADER: &str = "X-Kinvey-API-Version";

pub const DEFAULT_BASE_URL: &str = "https://baas.kinvey.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Path prefixes, each followed by the app key
pub const APPDATA_PREFIX: &str = "appdata/";
pub const USER_PREFIX: &str = "user/";
pub const GROUP_PREFIX: &str = "group/";
pub const RPC_PREFIX: &str = "rpc/";

// Authorization schemes
pub const BASIC_SCHEME: &str = "Basic";
pub const SESSION_SCHEME: &str = "Kinvey";

/// Suffix appended to the app key to form the persisted session key.
pub const AUTH_TOKEN_KEY_SUFFIX: &str = ":authToken";

/// First character of keys the backend treats as operators.
pub const OPERATOR_SIGIL: char = '$';

/// Operator keys that survive query serialization.
pub const RESERVED_OPERATORS: &[&str] = &[
    "$gt", "$gte", "$in", "$lt", "$lte", "$ne", "$nin", // comparison
    "$or", "$and", "$not", "$nor", // logical
    "$exists", "$type", // element
    "$mod", "$regex", "$where", // evaluation
    "$geoWithin", "$geoIntersects", "$near", "$nearSphere", // geospatial
    "$all", "$elemMatch", "$size", // array
    "$", "$slice", // projection ($elemMatch listed above)
];

// Sentinels substituted for UI host objects
pub const WINDOW_SENTINEL: &str = "$WINDOW";
pub const DOCUMENT_SENTINEL: &str = "$DOCUMENT";
pub const SCOPE_SENTINEL: &str = "$SCOPE";

/// Names an alias may not take.
pub const RESERVED_ALIASES: &[&str] = &["handshake", "User", "Group", "Object", "alias"];

/// Returns `true` if `key` is one of [`RESERVED_OPERATORS`].
pub fn is_reserved_operator(key: &str) -> bool {
    RESERVED_OPERATORS.contains(&key)
}

/// Storage key for the persisted session header of `app_key`.
pub fn auth_token_key(app_key: &str) -> String {
    format!("{app_key}{AUTH_TOKEN_KEY_SUFFIX}")
}
