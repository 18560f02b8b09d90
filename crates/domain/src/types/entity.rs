//! Entity kinds, verbs and HTTP methods of the endpoint table

use serde::{Deserialize, Serialize};

use crate::constants::{APPDATA_PREFIX, GROUP_PREFIX, USER_PREFIX};

/// The three resource families the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Group,
    /// A named collection under `appdata/`.
    Object,
}

crate::impl_wire_name_conversions!(EntityKind {
    User => "User",
    Group => "Group",
    Object => "Object",
});

impl EntityKind {
    /// Path prefix placed before the app key.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => USER_PREFIX,
            Self::Group => GROUP_PREFIX,
            Self::Object => APPDATA_PREFIX,
        }
    }
}

/// Operations declared in the endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verb {
    Login,
    Current,
    Logout,
    Signup,
    Get,
    Lookup,
    Save,
    Query,
    Remove,
    Delete,
    Suspend,
    Create,
    Count,
    Group,
}

crate::impl_wire_name_conversions!(Verb {
    Login => "login",
    Current => "current",
    Logout => "logout",
    Signup => "signup",
    Get => "get",
    Lookup => "lookup",
    Save => "save",
    Query => "query",
    Remove => "remove",
    Delete => "delete",
    Suspend => "suspend",
    Create => "create",
    Count => "count",
    Group => "group",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

crate::impl_wire_name_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Delete => "DELETE",
});
