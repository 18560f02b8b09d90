//! # Kinvey Domain
//!
//! Domain types shared by every crate in the Kinvey client workspace.
//!
//! This crate contains:
//! - The workspace error type and `Result` alias
//! - Wire constants (API version, path prefixes, reserved operators)
//! - Configuration and credential types
//! - Entity and verb enums used by the endpoint table
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O, only data and pure helpers

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
