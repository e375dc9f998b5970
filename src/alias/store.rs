//! Alias store trait and the in-memory backend

use crate::alias::{AliasError, AliasResult};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Trait for alias table backends
///
/// The table is a flat mapping of alias to canonical site. Keys are unique and
/// the last write wins.
pub trait AliasStore {
    /// Looks up the site for an alias
    fn get(&self, alias: &str) -> AliasResult<Option<String>>;

    /// Inserts or overwrites an alias
    fn put(&self, alias: &str, site: &str) -> AliasResult<()>;

    /// Removes an alias, returning whether it was present
    fn delete(&self, alias: &str) -> AliasResult<bool>;

    /// Returns every entry, ordered by alias
    fn list(&self) -> AliasResult<BTreeMap<String, String>>;

    /// Replaces `old_alias` with `(new_alias, new_site)`
    ///
    /// Backends that can do this in a single write should override it.
    fn rename(&self, old_alias: &str, new_alias: &str, new_site: &str) -> AliasResult<()> {
        if !self.delete(old_alias)? {
            return Err(AliasError::NotFound(old_alias.to_string()));
        }
        self.put(new_alias, new_site)
    }
}

/// In-memory alias table
#[derive(Debug, Default)]
pub struct MemoryAliasStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryAliasStore {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table pre-filled with the given pairs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl AliasStore for MemoryAliasStore {
    fn get(&self, alias: &str) -> AliasResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| AliasError::Poisoned)?;
        Ok(entries.get(alias).cloned())
    }

    fn put(&self, alias: &str, site: &str) -> AliasResult<()> {
        let mut entries = self.entries.write().map_err(|_| AliasError::Poisoned)?;
        entries.insert(alias.to_string(), site.to_string());
        Ok(())
    }

    fn delete(&self, alias: &str) -> AliasResult<bool> {
        let mut entries = self.entries.write().map_err(|_| AliasError::Poisoned)?;
        Ok(entries.remove(alias).is_some())
    }

    fn list(&self) -> AliasResult<BTreeMap<String, String>> {
        let entries = self.entries.read().map_err(|_| AliasError::Poisoned)?;
        Ok(entries.clone())
    }
}
