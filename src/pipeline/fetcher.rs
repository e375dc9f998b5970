//! HTTP fetcher implementation
//!
//! This module handles the single network request of a pipeline run:
//! - Building the HTTP client with the configured user agent
//! - GET of `http://<site>/` with a per-request timeout
//! - Error classification into HTTP status failures and everything else

use crate::config::FetchConfig;
use crate::url::{full_url_for, parse_site_url};
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw response body
    pub body: Vec<u8>,

    /// Client-observed time from sending the request to the end of the body
    pub elapsed: Duration,

    /// Canonical site the request was built from (trimmed)
    pub short_url: String,

    /// Full URL that was requested
    pub full_url: String,
}

/// Why a fetch failed
///
/// The classification is deliberately coarse: a response with a status code
/// keeps its code, every other failure (DNS, refused connection, timeout,
/// malformed host) is reported as an incorrect URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP error code: {0}")]
    HttpStatus(u16),

    #[error("Incorrect url")]
    IncorrectUrl,
}

/// Fetches the page for a canonical site
///
/// The coordinator only talks to this trait, so tests can swap in a fetcher
/// that counts calls or serves canned bodies.
pub trait PageFetcher {
    /// Fetches `http://<site>/`, giving up after `timeout`
    fn fetch(
        &self,
        site: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(
        &self,
        site: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send {
        let short_url = site.trim().to_string();
        let client = self.client.clone();
        async move { fetch_page(&client, short_url, timeout).await }
    }
}

/// Fetches a site's root page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `short_url` - The canonical site, already trimmed
/// * `timeout` - Upper bound for the whole request
///
/// # Returns
///
/// The fetched page, or the classified failure
pub async fn fetch_page(
    client: &Client,
    short_url: String,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    let full_url = full_url_for(&short_url);
    let Some(url) = parse_site_url(&short_url) else {
        tracing::debug!("Rejected malformed site {:?}", short_url);
        return Err(FetchError::IncorrectUrl);
    };

    let start = Instant::now();
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await.map_err(classify_error)?;
    let elapsed = start.elapsed();

    tracing::info!("{}: {}", Utc::now().format("%Y-%m-%d %H:%M:%S%.6f"), full_url);

    Ok(FetchedPage {
        body: body.to_vec(),
        elapsed,
        short_url,
        full_url,
    })
}

/// Maps a transport error onto the coarse fetch error buckets
fn classify_error(error: reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::HttpStatus(status.as_u16());
    }

    if error.is_timeout() {
        tracing::debug!("Request timeout: {}", error);
    } else if error.is_connect() {
        tracing::debug!("Connection failed: {}", error);
    } else {
        tracing::debug!("Request failed: {}", error);
    }
    FetchError::IncorrectUrl
}
