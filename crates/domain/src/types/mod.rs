//! Domain types and models

pub mod auth;
pub mod config;
pub mod entity;
pub mod user;

pub use auth::{AuthMode, SessionEvent};
pub use config::ClientConfig;
pub use entity::{EntityKind, HttpMethod, Verb};
pub use user::{Credentials, KinveyMetadata, UsernameAvailability};
