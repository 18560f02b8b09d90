//! # Kinvey Infrastructure
//!
//! Infrastructure implementations of core ports and the HTTP client.
//!
//! This crate contains:
//! - The [`KinveyClient`] and its user/group/collection handles
//! - The reqwest-based transport with an optional attempts budget
//! - `TokenStore` implementations (memory, platform keychain)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `kinvey-core`
//! - Contains all "impure" code (I/O, network, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod session;

pub use api::{Collection, Groups, KinveyClient, Users};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use session::{KeychainTokenStore, MemoryTokenStore};
