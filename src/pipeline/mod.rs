//! Pipeline module for counting tags on a site
//!
//! This module contains the fetch-parse-cache logic, including:
//! - HTTP fetching with a single bounded timeout
//! - HTML tokenizing and tag counting
//! - Request coordination against the alias table and result store

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, Outcome, ViewOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use parser::{count_tags, TagCounts};
