//! # Kinvey Core
//!
//! Pure client logic - no HTTP, no platform code.
//!
//! This crate contains:
//! - The credential manager (basic vs. session header sets)
//! - The query serializer and reduce canonicalizer
//! - The declarative endpoint table and alias registry
//! - Port interfaces for session persistence
//!
//! ## Architecture Principles
//! - Only depends on `kinvey-domain`
//! - All external dependencies via traits
//! - Pure, testable logic

pub mod credentials;
pub mod query;
pub mod resources;
pub mod session;

pub use credentials::CredentialManager;
pub use query::{
    canonicalize_reduce, serialize_query, to_query_value, GroupRequest, QueryOptions,
    ReduceFunction,
};
pub use resources::{endpoint, AliasRegistry, EndpointSpec, RpcAction, ENDPOINTS};
pub use session::ports::TokenStore;
