//! Integration tests for the tag counting pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run the
//! resolve-check-fetch-parse-store cycle end-to-end.

use std::time::Duration;
use tagcounter::alias::{AliasResolver, FileAliasStore, MemoryAliasStore};
use tagcounter::config::{Config, FetchConfig};
use tagcounter::output::{render_get, render_view};
use tagcounter::pipeline::{Coordinator, FetchError, HttpFetcher, Outcome, PageFetcher, ViewOutcome};
use tagcounter::storage::{ResultStore, SqliteStore};
use tagcounter::AppContext;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Home</title><script>if (a < b) { x = "<div>"; }</script></head>
<body>
<p>one</p><p>two<br/></p>
<a href="/page1">Page 1</a>
</body>
</html>"#;

/// Site string for a mock server, e.g. `127.0.0.1:41234`
fn site_of(server: &MockServer) -> String {
    server.address().to_string()
}

fn http_fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetchConfig::default()).expect("Failed to build HTTP client")
}

fn memory_coordinator(
    aliases: MemoryAliasStore,
    timeout: Duration,
) -> Coordinator<MemoryAliasStore, SqliteStore, HttpFetcher> {
    Coordinator::new(
        AliasResolver::new(aliases),
        SqliteStore::new_in_memory().expect("Failed to open in-memory store"),
        http_fetcher(),
        timeout,
    )
}

async fn serve_index(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(INDEX_HTML)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let site = site_of(&mock_server);
    let page = http_fetcher()
        .fetch(&site, Duration::from_secs(10))
        .await
        .expect("Fetch failed");

    assert_eq!(page.body, INDEX_HTML.as_bytes());
    assert_eq!(page.short_url, site);
    assert_eq!(page.full_url, format!("http://{}/", site));
}

#[tokio::test]
async fn test_fetch_trims_site() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let site = site_of(&mock_server);
    let page = http_fetcher()
        .fetch(&format!("  {}\n", site), Duration::from_secs(10))
        .await
        .expect("Fetch failed");

    assert_eq!(page.short_url, site);
}

#[tokio::test]
async fn test_fetch_http_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let error = http_fetcher()
        .fetch(&site_of(&mock_server), Duration::from_secs(10))
        .await
        .unwrap_err();

    assert_eq!(error, FetchError::HttpStatus(404));
    assert_eq!(error.to_string(), "HTTP error code: 404");
}

#[tokio::test]
async fn test_fetch_timeout_is_incorrect_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let error = http_fetcher()
        .fetch(&site_of(&mock_server), Duration::from_millis(300))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Incorrect url");
}

#[tokio::test]
async fn test_fetch_unresolvable_host() {
    let error = http_fetcher()
        .fetch("test12345.invalid", Duration::from_secs(10))
        .await
        .unwrap_err();

    assert_eq!(error, FetchError::IncorrectUrl);
}

#[tokio::test]
async fn test_get_twice_fetches_once() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let site = site_of(&mock_server);
    let mut coordinator = memory_coordinator(MemoryAliasStore::new(), Duration::from_secs(10));

    let first = coordinator.get(&site).await.expect("First get failed");
    let first_message = render_get(&first);
    assert!(first_message.starts_with("GET: Page loaded in "));
    let Outcome::Fresh { tag_data: fresh, .. } = first else {
        panic!("First request should be fresh");
    };
    assert!(!fresh.is_empty());

    let second = coordinator.get(&site).await.expect("Second get failed");
    let second_message = render_get(&second);
    assert!(second_message.starts_with("GET: Page has been loaded before:"));
    let Outcome::Hit { tag_data: cached, .. } = second else {
        panic!("Second request should be a cache hit");
    };
    assert_eq!(cached, fresh);

    // The mock's expect(1) is verified when mock_server drops
}

#[tokio::test]
async fn test_counts_from_served_page() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let mut coordinator = memory_coordinator(MemoryAliasStore::new(), Duration::from_secs(10));
    let outcome = coordinator.get(&site_of(&mock_server)).await.unwrap();
    let tag_data = outcome.tag_data().expect("Expected tag data");

    assert_eq!(
        tag_data,
        "html - 2\nhead - 2\ntitle - 2\nscript - 2\nbody - 2\np - 4\nbr - 1\na - 2\n"
    );
}

#[tokio::test]
async fn test_alias_resolves_to_mock_site() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let site = site_of(&mock_server);
    let aliases = MemoryAliasStore::with_entries([("local", site.as_str())]);
    let mut coordinator = memory_coordinator(aliases, Duration::from_secs(10));

    let by_alias = coordinator.get("local").await.unwrap();
    assert!(matches!(by_alias, Outcome::Fresh { .. }));

    let by_site = coordinator.get(&site).await.unwrap();
    assert!(matches!(by_site, Outcome::Hit { .. }));

    let record = coordinator
        .store()
        .find_latest(&format!("http://{}/", site))
        .unwrap()
        .unwrap();
    assert_eq!(record.short_site, "127");
}

#[tokio::test]
async fn test_failed_fetch_is_retried_next_time() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let site = site_of(&mock_server);
    let mut coordinator = memory_coordinator(MemoryAliasStore::new(), Duration::from_secs(10));

    for _ in 0..2 {
        let outcome = coordinator.get(&site).await.unwrap();
        assert_eq!(render_get(&outcome), "HTTP error code: 500");
    }
    assert_eq!(coordinator.store().count().unwrap(), 0);
}

#[tokio::test]
async fn test_view_does_not_fetch() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let site = site_of(&mock_server);
    let mut coordinator = memory_coordinator(MemoryAliasStore::new(), Duration::from_secs(10));

    let miss = coordinator.view(&site).unwrap();
    assert!(matches!(miss, ViewOutcome::NotFound { .. }));
    assert!(render_view(&miss).contains("was not found in the database, please use"));

    coordinator.get(&site).await.unwrap();

    let hit = coordinator.view(&site).unwrap();
    assert!(render_view(&hit).starts_with("VIEW: Page has been loaded before:"));
}

#[tokio::test]
async fn test_app_context_persists_between_runs() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 1).await;

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.database_path = dir.path().join("tagcounter.db").to_string_lossy().into_owned();
    config.storage.alias_path = dir.path().join("synonyms.toml").to_string_lossy().into_owned();
    config.fetch.timeout_secs = 10;

    let site = site_of(&mock_server);

    {
        let ctx = AppContext::open(config.clone()).unwrap();
        ctx.resolver.add("mock", &site).unwrap();
        let mut coordinator = ctx.into_coordinator();
        let outcome = coordinator.get("mock").await.unwrap();
        assert!(matches!(outcome, Outcome::Fresh { .. }));
    }

    // A second process-like run sees both the alias and the stored result
    let mut coordinator = AppContext::open(config).unwrap().into_coordinator();
    let outcome = coordinator.get("mock").await.unwrap();
    assert!(matches!(outcome, Outcome::Hit { .. }));
}

#[tokio::test]
async fn test_reset_then_view_misses() {
    let mock_server = MockServer::start().await;
    serve_index(&mock_server, 2).await;

    let site = site_of(&mock_server);
    let mut coordinator = memory_coordinator(MemoryAliasStore::new(), Duration::from_secs(10));

    coordinator.get(&site).await.unwrap();
    coordinator.reset().unwrap();
    assert!(matches!(coordinator.view(&site).unwrap(), ViewOutcome::NotFound { .. }));

    let outcome = coordinator.get(&site).await.unwrap();
    assert!(matches!(outcome, Outcome::Fresh { .. }));
}

#[test]
fn test_file_alias_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = FileAliasStore::open(&dir.path().join("synonyms.toml")).unwrap();
    let resolver = AliasResolver::new(store);

    assert_eq!(resolver.resolve("ggl").unwrap(), "google.com");
    assert_eq!(resolver.resolve("google.com").unwrap(), "google.com");

    resolver.add("testsyn", "testsite").unwrap();
    assert_eq!(resolver.resolve("testsyn").unwrap(), "testsite");

    resolver.rename("testsyn", "testsyn", "testsite2").unwrap();
    assert_eq!(resolver.resolve("testsyn").unwrap(), "testsite2");

    resolver.delete("testsyn").unwrap();
    assert_eq!(resolver.resolve("testsyn").unwrap(), "testsyn");
}
