//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use super::search::SearchResult;
use crate::cache::{CacheStats, CachedPage};

/// Response body for a cache hit (POST /lookup)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// The derived cache key
    pub key: String,
    pub results: Vec<SearchResult>,
    pub total: u64,
}

impl LookupResponse {
    pub fn new(key: impl Into<String>, page: CachedPage) -> Self {
        Self {
            key: key.into(),
            results: page.results,
            total: page.total,
        }
    }
}

/// Response body for the store operation (PUT /entries)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub message: String,
    pub key: String,
    /// False when the caching policy skipped the results
    pub cached: bool,
}

impl StoreResponse {
    pub fn new(key: impl Into<String>, cached: bool) -> Self {
        let key = key.into();
        let message = if cached {
            format!("Results cached under '{}'", key)
        } else {
            format!("Results for '{}' skipped by caching policy", key)
        };
        Self {
            message,
            key,
            cached,
        }
    }
}

/// Response body for invalidation (DELETE /entries, DELETE /entries/matching)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Removed {} cache entries", removed),
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries in cache
    pub size: usize,
    /// Configured entry ceiling
    pub max_size: usize,
    /// Approximate serialized size of all entries in bytes
    pub memory_usage_bytes: usize,
    /// Always 0.0; hits and misses are not counted
    pub hit_rate: f64,
    /// Share of the entry ceiling in use
    pub fill_ratio: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            size: stats.size,
            max_size: stats.max_size,
            memory_usage_bytes: stats.memory_usage_bytes,
            hit_rate: stats.hit_rate,
            fill_ratio: stats.fill_ratio(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
