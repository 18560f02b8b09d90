//! `TokenStore` implementations
//!
//! - [`MemoryTokenStore`]: process-local, gone at exit
//! - [`KeychainTokenStore`]: platform keychain (macOS Keychain, Windows
//!   Credential Manager, Secret Service on Linux)

pub mod keychain;
pub mod memory;

pub use keychain::KeychainTokenStore;
pub use memory::MemoryTokenStore;
