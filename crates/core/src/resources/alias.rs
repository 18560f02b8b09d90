//! Named aliases for collections

use std::collections::HashMap;

use kinvey_domain::constants::RESERVED_ALIASES;
use kinvey_domain::{KinveyError, Result};
use parking_lot::RwLock;
use tracing::debug;

/// Alias name -> collection name.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    aliases: RwLock<HashMap<String, String>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject names the client itself exposes.
    ///
    /// # Errors
    /// Returns `KinveyError::NameCollision` for any of the reserved names.
    pub fn verify(alias: &str) -> Result<()> {
        if RESERVED_ALIASES.contains(&alias) {
            return Err(KinveyError::NameCollision(format!(
                "aliases must not attempt to overwrite {alias}"
            )));
        }
        Ok(())
    }

    /// Map `alias` to `collection`, replacing any earlier mapping.
    ///
    /// # Errors
    /// Returns `KinveyError::NameCollision` for a reserved alias and
    /// `KinveyError::InvalidInput` for empty names. Nothing is registered
    /// on error.
    pub fn register(&self, collection: &str, alias: &str) -> Result<()> {
        Self::verify(alias)?;
        if alias.is_empty() || collection.is_empty() {
            return Err(KinveyError::InvalidInput(
                "alias and collection names must not be empty".to_string(),
            ));
        }

        let previous = self.aliases.write().insert(alias.to_string(), collection.to_string());
        debug!(alias, collection, replaced = previous.is_some(), "alias registered");
        Ok(())
    }

    pub fn resolve(&self, alias: &str) -> Option<String> {
        self.aliases.read().get(alias).cloned()
    }

    pub fn len(&self) -> usize {
        self.aliases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.read().is_empty()
    }
}
