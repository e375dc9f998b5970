//! File-backed alias table
//!
//! The table lives in a flat TOML document of `alias = "site"` pairs. Nothing is
//! cached: every lookup reads the whole file and every mutation rewrites it, so
//! edits made by other tools are visible at once. Two processes mutating the
//! same file race and the last full write wins.

use crate::alias::store::AliasStore;
use crate::alias::{AliasError, AliasResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Entry written into a missing or empty alias file
pub const SEED_ALIAS: (&str, &str) = ("ggl", "google.com");

/// Alias store backed by a TOML file
#[derive(Debug, Clone)]
pub struct FileAliasStore {
    path: PathBuf,
}

impl FileAliasStore {
    /// Opens the alias file, creating it with the seed entry if it is absent
    /// or holds no entries
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML alias file
    ///
    /// # Returns
    ///
    /// * `Ok(FileAliasStore)` - The file exists and parses
    /// * `Err(AliasError)` - The file could not be created, read or parsed
    pub fn open(path: &Path) -> AliasResult<Self> {
        let store = Self {
            path: path.to_path_buf(),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_seed = !path.exists() || store.load()?.is_empty();
        if needs_seed {
            tracing::debug!("Seeding alias file {}", path.display());
            let mut seed = BTreeMap::new();
            seed.insert(SEED_ALIAS.0.to_string(), SEED_ALIAS.1.to_string());
            store.save(&seed)?;
        }

        Ok(store)
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AliasResult<BTreeMap<String, String>> {
        let content = fs::read_to_string(&self.path)?;
        let table: BTreeMap<String, String> = toml::from_str(&content)?;
        Ok(table)
    }

    fn save(&self, table: &BTreeMap<String, String>) -> AliasResult<()> {
        let content = toml::to_string(table)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl AliasStore for FileAliasStore {
    fn get(&self, alias: &str) -> AliasResult<Option<String>> {
        Ok(self.load()?.remove(alias))
    }

    fn put(&self, alias: &str, site: &str) -> AliasResult<()> {
        let mut table = self.load()?;
        table.insert(alias.to_string(), site.to_string());
        self.save(&table)
    }

    fn delete(&self, alias: &str) -> AliasResult<bool> {
        let mut table = self.load()?;
        if table.remove(alias).is_none() {
            return Ok(false);
        }
        self.save(&table)?;
        Ok(true)
    }

    fn list(&self) -> AliasResult<BTreeMap<String, String>> {
        self.load()
    }

    fn rename(&self, old_alias: &str, new_alias: &str, new_site: &str) -> AliasResult<()> {
        let mut table = self.load()?;
        if table.remove(old_alias).is_none() {
            return Err(AliasError::NotFound(old_alias.to_string()));
        }
        table.insert(new_alias.to_string(), new_site.to_string());
        self.save(&table)
    }
}
