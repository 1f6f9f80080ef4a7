//! Cache warm-up
//!
//! Populates the cache ahead of traffic for anticipated searches. All
//! requests in a batch run concurrently and every one is awaited; a
//! backend failure is recorded in the report and never aborts the batch.

use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::cache::SharedCache;
use crate::error::CacheError;
use crate::models::{SearchPage, SearchRequest, SortOrder};
use crate::prefetch::SearchBackend;

// == Constants ==
/// Page size used for every warm-up request
pub const PREFETCH_PAGE_SIZE: u32 = 20;

/// TTL multiplier for popular-search prefetches
pub const POPULAR_TTL_FACTOR: u32 = 2;

/// TTL multiplier for the fixed warm-up list
pub const WARMUP_TTL_FACTOR: u32 = 3;

// == Prefetch Report ==
/// Outcome of one warm-up batch.
#[derive(Debug, Default)]
pub struct PrefetchReport {
    /// Requests considered
    pub attempted: usize,
    /// Requests fetched and stored
    pub cached: usize,
    /// Requests already cached, not fetched
    pub skipped: usize,
    /// Requests fetched but excluded by the caching policy
    pub uncacheable: usize,
    /// One `CacheError::Prefetch` per failed request
    pub failures: Vec<CacheError>,
}

impl PrefetchReport {
    /// True when no request failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn record(&mut self, outcome: Outcome) {
        self.attempted += 1;
        match outcome {
            Outcome::Cached => self.cached += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Uncacheable => self.uncacheable += 1,
            Outcome::Failed(err) => self.failures.push(err),
        }
    }
}

enum Outcome {
    Cached,
    Skipped,
    Uncacheable,
    Failed(CacheError),
}

// == Canonical Requests ==
/// The request prefetched for a popular query string.
pub fn popular_search_request(query: &str) -> SearchRequest {
    SearchRequest::query(query)
        .with_page(PREFETCH_PAGE_SIZE, 0)
        .with_sort("relevance", SortOrder::Desc)
}

/// Filter combinations warmed by `warmup_cache`.
pub fn warmup_requests() -> Vec<SearchRequest> {
    let base = SearchRequest::default().with_page(PREFETCH_PAGE_SIZE, 0);
    vec![
        base.clone().with_category("fiction"),
        base.clone().with_category("non-fiction"),
        base.clone().with_category("technology"),
        base.clone().with_free(true),
        base.clone().with_sort("created_at", SortOrder::Desc),
        base.clone().with_price_range(0.0, 10.0),
        base.with_price_range(10.0, 25.0),
    ]
}

// == Prefetch Popular Searches ==
/// Prefetches each query with a TTL of twice the cache default.
///
/// Queries already cached are not fetched again.
pub async fn prefetch_popular_searches<B>(
    cache: &SharedCache,
    queries: &[String],
    backend: &B,
) -> PrefetchReport
where
    B: SearchBackend + ?Sized,
{
    let ttl = cache
        .read()
        .await
        .default_ttl()
        .saturating_mul(POPULAR_TTL_FACTOR);
    let requests = queries.iter().map(|q| popular_search_request(q)).collect();
    prefetch_all(cache, requests, backend, ttl).await
}

// == Warmup Cache ==
/// Prefetches `warmup_requests()` with a TTL of three times the cache default.
pub async fn warmup_cache<B>(cache: &SharedCache, backend: &B) -> PrefetchReport
where
    B: SearchBackend + ?Sized,
{
    let ttl = cache
        .read()
        .await
        .default_ttl()
        .saturating_mul(WARMUP_TTL_FACTOR);
    prefetch_all(cache, warmup_requests(), backend, ttl).await
}

// == Search Through ==
/// Serves a request from the cache, falling back to the backend on a miss.
///
/// Backend results are cached with the default TTL. Backend errors are
/// returned to the caller.
pub async fn search_through<B>(
    cache: &SharedCache,
    backend: &B,
    request: SearchRequest,
) -> anyhow::Result<SearchPage>
where
    B: SearchBackend + ?Sized,
{
    let hit = cache.write().await.get(&request);
    if let Some(page) = hit {
        return Ok(SearchPage::new(page.results, page.total));
    }

    let page = backend.search(request.clone()).await?;
    cache
        .write()
        .await
        .set(&request, &page.results, page.total, None);
    Ok(page)
}

async fn prefetch_all<B>(
    cache: &SharedCache,
    requests: Vec<SearchRequest>,
    backend: &B,
    ttl: Duration,
) -> PrefetchReport
where
    B: SearchBackend + ?Sized,
{
    let logging = cache.read().await.logging_enabled();

    let outcomes = join_all(
        requests
            .into_iter()
            .map(|request| prefetch_one(cache, request, backend, ttl)),
    )
    .await;

    let mut report = PrefetchReport::default();
    for outcome in outcomes {
        if let (Outcome::Failed(err), true) = (&outcome, logging) {
            warn!(error = %err, "Prefetch failed");
        }
        report.record(outcome);
    }

    if logging {
        info!(
            attempted = report.attempted,
            cached = report.cached,
            skipped = report.skipped,
            failed = report.failed(),
            "Prefetch finished"
        );
    }
    report
}

async fn prefetch_one<B>(
    cache: &SharedCache,
    request: SearchRequest,
    backend: &B,
    ttl: Duration,
) -> Outcome
where
    B: SearchBackend + ?Sized,
{
    let cached = cache.read().await.contains(&request);
    if cached {
        return Outcome::Skipped;
    }

    // No lock is held while the backend runs.
    match backend.search(request.clone()).await {
        Ok(page) => {
            let stored = cache
                .write()
                .await
                .set(&request, &page.results, page.total, Some(ttl));
            if stored {
                Outcome::Cached
            } else {
                Outcome::Uncacheable
            }
        }
        Err(err) => Outcome::Failed(CacheError::Prefetch {
            label: request.label(),
            reason: format!("{:#}", err),
        }),
    }
}
