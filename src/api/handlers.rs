//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::{cache_key, shared, SearchCache, SharedCache};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, LookupResponse, PatternQuery, SearchRequest, StatsResponse,
    StoreRequest, StoreResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe search cache
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: SearchCache) -> Self {
        Self {
            cache: shared(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(SearchCache::new(config.cache.clone()))
    }
}

/// Handler for POST /lookup
///
/// Returns the cached page for a search request, or 404 on a miss.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<LookupResponse>> {
    let key = cache_key(&req);

    // Write lock: an expired hit is removed on access
    let page = state.cache.write().await.get(&req);

    match page {
        Some(page) => Ok(Json(LookupResponse::new(key, page))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /entries
///
/// Stores a page of results for a search request with optional TTL.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = cache_key(&req.request);
    let ttl = req.ttl.map(Duration::from_secs);
    let cached = state
        .cache
        .write()
        .await
        .set(&req.request, &req.results, req.total, ttl);

    Ok(Json(StoreResponse::new(key, cached)))
}

/// Handler for DELETE /entries
///
/// Removes every cached entry.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.write().await.clear();
    Json(ClearResponse::new(removed))
}

/// Handler for DELETE /entries/matching?pattern=...
///
/// Removes every entry whose key matches the regular expression.
pub async fn clear_matching_handler(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Result<Json<ClearResponse>> {
    let removed = state.cache.write().await.clear_matching(&query.pattern)?;
    Ok(Json(ClearResponse::new(removed)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
