//! Integration Tests for cache warm-up
//!
//! Drives prefetching through the public API with a closure backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use search_cache::cache::{ManualClock, SearchCache};
use search_cache::models::{SearchPage, SearchRequest};
use search_cache::prefetch::{popular_search_request, warmup_requests};
use search_cache::{prefetch_popular_searches, search_through, shared, warmup_cache, CacheConfig};
use serde_json::json;

async fn catalog_search(request: SearchRequest) -> anyhow::Result<SearchPage> {
    if request.category.as_deref() == Some("technology") {
        anyhow::bail!("search index unavailable");
    }
    let title = request.label();
    Ok(SearchPage::new(vec![json!({ "title": title })], 1))
}

#[tokio::test]
async fn test_warmup_then_organic_traffic() {
    let clock = Arc::new(ManualClock::new());
    let config = CacheConfig::default().with_default_ttl(Duration::from_secs(60));
    let cache = shared(SearchCache::with_clock(config, clock.clone()));

    let report = warmup_cache(&cache, &catalog_search).await;

    assert_eq!(report.attempted, warmup_requests().len());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.cached, warmup_requests().len() - 1);
    assert_eq!(cache.read().await.len(), warmup_requests().len() - 1);

    // Warmed entries are served without touching the backend
    let calls = AtomicUsize::new(0);
    let counting = |request: SearchRequest| {
        calls.fetch_add(1, Ordering::SeqCst);
        catalog_search(request)
    };
    for request in warmup_requests() {
        let _ = search_through(&cache, &counting, request).await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1, "Only the failed warm-up should miss");
}

#[tokio::test]
async fn test_prefetch_survives_default_ttl() {
    let clock = Arc::new(ManualClock::new());
    let config = CacheConfig::default().with_default_ttl(Duration::from_secs(60));
    let cache = shared(SearchCache::with_clock(config, clock.clone()));
    let queries = vec!["dune".to_string(), "middlemarch".to_string()];

    let report = prefetch_popular_searches(&cache, &queries, &catalog_search).await;
    assert_eq!(report.cached, 2);

    // Organic entry with the default TTL
    cache
        .write()
        .await
        .set(&SearchRequest::query("emma"), &[json!({ "title": "Emma" })], 1, None);

    clock.advance(Duration::from_secs(90));

    let mut guard = cache.write().await;
    assert!(guard.get(&SearchRequest::query("emma")).is_none());
    assert!(guard.get(&popular_search_request("dune")).is_some());
    assert!(guard.get(&popular_search_request("middlemarch")).is_some());
}

#[tokio::test]
async fn test_second_prefetch_skips_everything() {
    let cache = shared(SearchCache::default());
    let queries = vec!["dune".to_string(), "emma".to_string()];

    let first = prefetch_popular_searches(&cache, &queries, &catalog_search).await;
    let second = prefetch_popular_searches(&cache, &queries, &catalog_search).await;

    assert_eq!(first.cached, 2);
    assert_eq!(second.skipped, 2);
    assert_eq!(second.cached, 0);
}
