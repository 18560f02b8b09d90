//! Static endpoint table

use kinvey_domain::{AuthMode, EntityKind, HttpMethod, Verb};

/// Where the `:_id` path segment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Fixed segment; an empty string drops the segment.
    Fixed(&'static str),
    /// Taken from the caller (the `_id` of the entity or an explicit id).
    Entity,
}

/// Transformation applied to the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestHook {
    None,
    /// `query`/`sort` params go through the query serializer.
    SerializeQuery,
    /// Body is a `GroupRequest`: canonical reduce, serializer-encoded body.
    GroupAggregation,
}

/// Credential bookkeeping applied to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHook {
    None,
    /// Login/signup: install the session token unless the body has `error`.
    StoreSession,
    /// Logout: revert to the basic credential.
    ClearSession,
}

/// One row of the endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub kind: EntityKind,
    pub verb: Verb,
    pub method: HttpMethod,
    pub auth: AuthMode,
    pub id: IdSource,
    /// Default query-string parameters.
    pub params: &'static [(&'static str, &'static str)],
    pub request_hook: RequestHook,
    pub response_hook: ResponseHook,
    pub returns_array: bool,
}

impl EndpointSpec {
    const fn session(kind: EntityKind, verb: Verb, method: HttpMethod, id: IdSource) -> Self {
        Self {
            kind,
            verb,
            method,
            auth: AuthMode::Session,
            id,
            params: &[],
            request_hook: RequestHook::None,
            response_hook: ResponseHook::None,
            returns_array: false,
        }
    }

    const fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    const fn params(mut self, params: &'static [(&'static str, &'static str)]) -> Self {
        self.params = params;
        self
    }

    const fn request(mut self, hook: RequestHook) -> Self {
        self.request_hook = hook;
        self
    }

    const fn response(mut self, hook: ResponseHook) -> Self {
        self.response_hook = hook;
        self
    }

    const fn array(mut self) -> Self {
        self.returns_array = true;
        self
    }
}

const HARD_DELETE: &[(&str, &str)] = &[("hard", "true")];

use EntityKind::{Group, Object, User};
use HttpMethod::{Delete, Get, Post, Put};
use IdSource::{Entity, Fixed};

/// Every endpoint the client can call.
pub static ENDPOINTS: &[EndpointSpec] = &[
    // User
    EndpointSpec::session(User, Verb::Login, Post, Fixed("login"))
        .response(ResponseHook::StoreSession),
    EndpointSpec::session(User, Verb::Current, Get, Fixed("_me")),
    EndpointSpec::session(User, Verb::Logout, Post, Fixed("_logout"))
        .response(ResponseHook::ClearSession),
    EndpointSpec::session(User, Verb::Signup, Post, Entity)
        .auth(AuthMode::Basic)
        .response(ResponseHook::StoreSession),
    EndpointSpec::session(User, Verb::Get, Get, Entity),
    EndpointSpec::session(User, Verb::Lookup, Post, Fixed("_lookup")).array(),
    EndpointSpec::session(User, Verb::Save, Put, Entity),
    EndpointSpec::session(User, Verb::Query, Get, Fixed(""))
        .request(RequestHook::SerializeQuery)
        .array(),
    EndpointSpec::session(User, Verb::Remove, Delete, Entity)
        .params(HARD_DELETE)
        .request(RequestHook::SerializeQuery),
    EndpointSpec::session(User, Verb::Delete, Delete, Entity)
        .params(HARD_DELETE)
        .request(RequestHook::SerializeQuery),
    EndpointSpec::session(User, Verb::Suspend, Delete, Entity),
    // Group
    EndpointSpec::session(Group, Verb::Get, Get, Entity),
    EndpointSpec::session(Group, Verb::Save, Put, Entity),
    EndpointSpec::session(Group, Verb::Delete, Delete, Entity),
    // Object (named collections)
    EndpointSpec::session(Object, Verb::Create, Post, Fixed("")),
    EndpointSpec::session(Object, Verb::Get, Get, Entity),
    EndpointSpec::session(Object, Verb::Count, Get, Fixed("_count"))
        .request(RequestHook::SerializeQuery),
    EndpointSpec::session(Object, Verb::Save, Put, Entity),
    EndpointSpec::session(Object, Verb::Delete, Delete, Entity)
        .request(RequestHook::SerializeQuery),
    EndpointSpec::session(Object, Verb::Query, Get, Fixed(""))
        .request(RequestHook::SerializeQuery)
        .array(),
    EndpointSpec::session(Object, Verb::Group, Post, Fixed("_group"))
        .request(RequestHook::GroupAggregation)
        .array(),
];

/// Look up the row for `kind`/`verb`.
pub fn endpoint(kind: EntityKind, verb: Verb) -> Option<&'static EndpointSpec> {
    ENDPOINTS.iter().find(|spec| spec.kind == kind && spec.verb == verb)
}
