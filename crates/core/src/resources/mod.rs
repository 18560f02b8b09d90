//! Declarative resource routing
//!
//! The endpoint table maps `{entity kind x verb}` to an HTTP method, a path
//! template, the header set to send, and the hooks that run around the call.

pub mod alias;
pub mod endpoints;
pub mod path;

pub use alias::AliasRegistry;
pub use endpoints::{endpoint, EndpointSpec, IdSource, RequestHook, ResponseHook, ENDPOINTS};
pub use path::{resource_segments, rpc_segments, RpcAction};
