//! Alias module for mapping short names to canonical sites
//!
//! Users can type `ggl` instead of `google.com`. The resolver looks the
//! identifier up in an injected [`AliasStore`] and passes it through unchanged
//! when no alias matches.
//!
//! # Example
//!
//! ```
//! use tagcounter::alias::{AliasResolver, MemoryAliasStore};
//!
//! let resolver = AliasResolver::new(MemoryAliasStore::with_entries([("ggl", "google.com")]));
//! assert_eq!(resolver.resolve("ggl").unwrap(), "google.com");
//! assert_eq!(resolver.resolve("example.com").unwrap(), "example.com");
//! ```

mod file;
mod store;

pub use file::{FileAliasStore, SEED_ALIAS};
pub use store::{AliasStore, MemoryAliasStore};

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while reading or changing the alias table
#[derive(Debug, Error)]
pub enum AliasError {
    #[error("Failed to access alias file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse alias file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write alias file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Alias not found: {0}")]
    NotFound(String),

    #[error("Alias and site must both be non-empty")]
    Empty,

    #[error("Alias table lock poisoned")]
    Poisoned,
}

impl AliasError {
    /// Returns true for failures of the table itself rather than of the request
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::Empty)
    }
}

/// Result type for alias operations
pub type AliasResult<T> = Result<T, AliasError>;

/// Resolves identifiers and manages the alias table
#[derive(Debug)]
pub struct AliasResolver<S> {
    store: S,
}

impl<S: AliasStore> AliasResolver<S> {
    /// Creates a resolver over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Maps an identifier to its canonical site
    ///
    /// Unknown identifiers come back unchanged (trimmed). Only a failure to
    /// read the table is an error.
    pub fn resolve(&self, identifier: &str) -> AliasResult<String> {
        let identifier = identifier.trim();
        match self.store.get(identifier)? {
            Some(site) => {
                tracing::debug!("Alias {} resolved to {}", identifier, site);
                Ok(site)
            }
            None => Ok(identifier.to_string()),
        }
    }

    /// Inserts or overwrites an alias
    pub fn add(&self, alias: &str, site: &str) -> AliasResult<()> {
        let (alias, site) = non_empty_pair(alias, site)?;
        self.store.put(alias, site)?;
        tracing::info!("Alias {} -> {} saved", alias, site);
        Ok(())
    }

    /// Replaces `old_alias` with `(new_alias, new_site)` in one step
    pub fn rename(&self, old_alias: &str, new_alias: &str, new_site: &str) -> AliasResult<()> {
        let (new_alias, new_site) = non_empty_pair(new_alias, new_site)?;
        self.store.rename(old_alias.trim(), new_alias, new_site)?;
        tracing::info!("Alias {} renamed to {} -> {}", old_alias, new_alias, new_site);
        Ok(())
    }

    /// Removes an alias
    pub fn delete(&self, alias: &str) -> AliasResult<()> {
        let alias = alias.trim();
        if !self.store.delete(alias)? {
            return Err(AliasError::NotFound(alias.to_string()));
        }
        tracing::info!("Alias {} deleted", alias);
        Ok(())
    }

    /// Lists all aliases in key order
    pub fn list(&self) -> AliasResult<BTreeMap<String, String>> {
        self.store.list()
    }
}

fn non_empty_pair<'a>(alias: &'a str, site: &'a str) -> AliasResult<(&'a str, &'a str)> {
    let alias = alias.trim();
    let site = site.trim();
    if alias.is_empty() || site.is_empty() {
        return Err(AliasError::Empty);
    }
    Ok((alias, site))
}
