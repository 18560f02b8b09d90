//! Credential state shared by every request a client issues.

pub mod manager;

pub use manager::CredentialManager;
