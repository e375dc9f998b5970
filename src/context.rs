//! Application context
//!
//! The entry point builds one context from the configuration and hands it to
//! the coordinator. Nothing here is global, so tests can run as many isolated
//! instances as they like.

use crate::alias::{AliasResolver, FileAliasStore};
use crate::config::Config;
use crate::pipeline::{Coordinator, HttpFetcher};
use crate::storage::{open_storage, SqliteStore};
use crate::TagCounterError;
use std::path::Path;

/// Coordinator wired to the on-disk alias file, SQLite store and HTTP client
pub type AppCoordinator = Coordinator<FileAliasStore, SqliteStore, HttpFetcher>;

/// Everything a request needs, opened once per process
pub struct AppContext {
    pub config: Config,
    pub resolver: AliasResolver<FileAliasStore>,
    pub store: SqliteStore,
    pub fetcher: HttpFetcher,
}

impl AppContext {
    /// Opens the alias file and result database named in the configuration
    /// and builds the HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(AppContext)` - All collaborators are ready
    /// * `Err(TagCounterError)` - A file could not be opened or the client
    ///   could not be built
    pub fn open(config: Config) -> Result<Self, TagCounterError> {
        let aliases = FileAliasStore::open(Path::new(&config.storage.alias_path))?;
        tracing::debug!("Alias file: {}", aliases.path().display());

        let store = open_storage(Path::new(&config.storage.database_path))?;
        tracing::debug!("Result database: {}", config.storage.database_path);

        let fetcher = HttpFetcher::new(&config.fetch)?;

        Ok(Self {
            resolver: AliasResolver::new(aliases),
            store,
            fetcher,
            config,
        })
    }

    /// Hands the collaborators to a coordinator
    pub fn into_coordinator(self) -> AppCoordinator {
        let timeout = self.config.fetch.timeout();
        Coordinator::new(self.resolver, self.store, self.fetcher, timeout)
    }
}
