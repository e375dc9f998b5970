//! Pipeline coordinator - request orchestration logic
//!
//! This module drives one request through the pipeline:
//! - Resolving the identifier through the alias table
//! - Checking the result store for the full URL
//! - Fetching, counting and storing on a miss
//!
//! Each request runs to completion before returning. Nothing is retried; a
//! failed fetch is not stored, so asking again repeats the attempt.

use crate::alias::{AliasResolver, AliasStore};
use crate::pipeline::fetcher::{FetchError, PageFetcher};
use crate::pipeline::parser::count_tags;
use crate::state::RequestState;
use crate::storage::{FetchRecord, ResultStore};
use crate::url::full_url_for;
use crate::TagCounterError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Result of a `get` request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A stored record answered the request; no fetch was made
    Hit {
        site: String,
        stored_at: DateTime<Utc>,
        tag_data: String,
    },

    /// The page was fetched, counted and stored
    Fresh {
        site: String,
        elapsed: Duration,
        tag_data: String,
    },

    /// The fetch failed; nothing was stored
    Failed { site: String, error: FetchError },
}

impl Outcome {
    /// The terminal request state this outcome corresponds to
    pub fn state(&self) -> RequestState {
        match self {
            Self::Hit { .. } => RequestState::HitReturn,
            Self::Fresh { .. } => RequestState::FreshReturn,
            Self::Failed { .. } => RequestState::FetchError,
        }
    }

    /// The formatted tag counts, if the request produced any
    pub fn tag_data(&self) -> Option<&str> {
        match self {
            Self::Hit { tag_data, .. } | Self::Fresh { tag_data, .. } => Some(tag_data),
            Self::Failed { .. } => None,
        }
    }
}

/// Result of a `view` request
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    /// A stored record exists
    Hit {
        site: String,
        stored_at: DateTime<Utc>,
        tag_data: String,
    },

    /// Nothing stored for this site yet
    NotFound { site: String },
}

/// Tracks the state of one request and refuses illegal steps
struct RequestTracker {
    state: RequestState,
}

impl RequestTracker {
    fn start() -> Self {
        Self {
            state: RequestState::Resolving,
        }
    }

    fn advance(&mut self, next: RequestState) -> Result<(), TagCounterError> {
        if !self.state.can_transition_to(next) {
            return Err(TagCounterError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Request state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

/// Main pipeline coordinator
///
/// Owns the alias resolver, the result store and the fetcher. Tests build one
/// from in-memory parts; the binary builds one from an
/// [`AppContext`](crate::AppContext).
pub struct Coordinator<A, S, F> {
    resolver: AliasResolver<A>,
    store: S,
    fetcher: F,
    timeout: Duration,
}

impl<A, S, F> Coordinator<A, S, F>
where
    A: AliasStore,
    S: ResultStore,
    F: PageFetcher,
{
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `resolver` - Alias resolver used for every request
    /// * `store` - Result store backing the cache
    /// * `fetcher` - Network fetcher used on cache misses
    /// * `timeout` - Upper bound for one fetch
    pub fn new(resolver: AliasResolver<A>, store: S, fetcher: F, timeout: Duration) -> Self {
        Self {
            resolver,
            store,
            fetcher,
            timeout,
        }
    }

    /// Borrows the alias resolver
    pub fn resolver(&self) -> &AliasResolver<A> {
        &self.resolver
    }

    /// Borrows the result store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the result store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Borrows the fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Upper bound for one fetch
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the full pipeline for a raw identifier
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - A hit, a fresh result, or a fetch failure
    /// * `Err(TagCounterError)` - The alias table could not be read, or the
    ///   fresh result could not be stored
    pub async fn get(&mut self, raw_input: &str) -> Result<Outcome, TagCounterError> {
        let mut tracker = RequestTracker::start();

        let site = self.resolver.resolve(raw_input)?;
        tracker.advance(RequestState::CacheCheck)?;

        let full_url = full_url_for(&site);
        if let Some(record) = self.lookup(&full_url) {
            tracker.advance(RequestState::HitReturn)?;
            return Ok(Outcome::Hit {
                site,
                stored_at: record.created_at,
                tag_data: record.tag_data,
            });
        }

        tracker.advance(RequestState::Fetching)?;
        let page = match self.fetcher.fetch(&site, self.timeout).await {
            Ok(page) => page,
            Err(error) => {
                tracker.advance(RequestState::FetchError)?;
                return Ok(Outcome::Failed { site, error });
            }
        };

        tracker.advance(RequestState::Parsing)?;
        let counts = count_tags(&page.body);
        let tag_data = counts.format();
        tracing::debug!(
            "Counted {} tags ({} distinct) on {}",
            counts.total(),
            counts.len(),
            page.full_url
        );

        tracker.advance(RequestState::Storing)?;
        let id = self
            .store
            .insert(&tag_data, &page.short_url, &page.full_url)?;
        tracing::debug!("Stored record {} for {}", id, page.full_url);

        tracker.advance(RequestState::FreshReturn)?;
        Ok(Outcome::Fresh {
            site,
            elapsed: page.elapsed,
            tag_data,
        })
    }

    /// Looks a site up in the store without ever fetching it
    pub fn view(&self, raw_input: &str) -> Result<ViewOutcome, TagCounterError> {
        let mut tracker = RequestTracker::start();

        let site = self.resolver.resolve(raw_input)?;
        tracker.advance(RequestState::CacheCheck)?;

        match self.lookup(&full_url_for(&site)) {
            Some(record) => {
                tracker.advance(RequestState::HitReturn)?;
                Ok(ViewOutcome::Hit {
                    site,
                    stored_at: record.created_at,
                    tag_data: record.tag_data,
                })
            }
            None => {
                tracker.advance(RequestState::NotFound)?;
                Ok(ViewOutcome::NotFound { site })
            }
        }
    }

    /// Every stored record for a site, newest first
    pub fn history(&self, raw_input: &str) -> Result<(String, Vec<FetchRecord>), TagCounterError> {
        let site = self.resolver.resolve(raw_input)?;
        let records = self.store.history(&full_url_for(&site))?;
        Ok((site, records))
    }

    /// Drops every stored record
    pub fn reset(&mut self) -> Result<(), TagCounterError> {
        self.store.truncate()?;
        tracing::info!("Result store truncated");
        Ok(())
    }

    /// Cache lookup with the lenient miss policy
    ///
    /// A store that cannot be queried is reported as a miss; the failure is
    /// only logged.
    fn lookup(&self, full_url: &str) -> Option<FetchRecord> {
        match self.store.find_latest(full_url) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Cache lookup for {} failed, treating as miss: {}", full_url, e);
                None
            }
        }
    }
}
