//! ContentStore integration tests
//!
//! Caching behavior, cache-busting URLs, failure degradation, and the
//! typed accessors.

mod common;

use common::{articles_document, StubFetcher};
use globalcare::{ContentError, ContentStore};

const BASE: &str = "http://origin.test/content";

#[tokio::test]
async fn test_second_load_serves_from_cache() {
    let fetcher = StubFetcher::new().with_document("articles", articles_document());
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher.clone()));

    let first = store.load("articles", false).await.unwrap();
    let second = store.load("articles", false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_force_refresh_refetches() {
    let fetcher = StubFetcher::new().with_document("articles", articles_document());
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher.clone()));

    store.load("articles", false).await.unwrap();
    store.load("articles", true).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_invalidate_all_refetches_once_per_resource() {
    let fetcher = StubFetcher::new()
        .with_document("articles", articles_document())
        .with_document("terms", common::terms_document());
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher.clone()));

    store.articles().await;
    store.terms().await;
    assert_eq!(fetcher.calls(), 2);

    store.invalidate_all().await;

    store.articles().await;
    store.articles().await;
    store.terms().await;
    assert_eq!(fetcher.calls(), 4);
}

#[tokio::test]
async fn test_fetch_url_carries_cache_buster() {
    let fetcher = StubFetcher::new().with_document("articles", articles_document());
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher.clone()));

    store.articles().await;

    let urls = fetcher.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("http://origin.test/content/articles.json?v="));
}

#[tokio::test]
async fn test_http_failure_is_typed_and_degrades_to_empty() {
    let fetcher = StubFetcher::new().with_status("articles", 500);
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher));

    let err = store.load("articles", false).await.unwrap_err();
    assert!(matches!(err, ContentError::Fetch { status: 500, .. }));

    // Typed accessor swallows the failure
    assert!(store.articles().await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_failure() {
    let fetcher = StubFetcher::new().with_body("terms", "{not json");
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher));

    let err = store.load("terms", false).await.unwrap_err();
    assert!(matches!(err, ContentError::Parse { .. }));

    assert!(store.terms().await.is_empty());
}

#[tokio::test]
async fn test_missing_collection_field_yields_empty() {
    let fetcher = StubFetcher::new().with_document("treatments", serde_json::json!({"other": []}));
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher));

    assert!(store.treatments().await.is_empty());
}

#[tokio::test]
async fn test_article_lookup_by_id() {
    let fetcher = StubFetcher::new().with_document("articles", articles_document());
    let store = ContentStore::with_fetcher(BASE, Box::new(fetcher.clone()));

    let article = store.article("knee-pain-basics").await.unwrap();
    assert_eq!(article.title, "Knee Pain Basics");

    assert!(store.article("missing").await.is_none());

    // Both lookups shared the one cached fetch
    assert_eq!(fetcher.calls(), 1);
}
