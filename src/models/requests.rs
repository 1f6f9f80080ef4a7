//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use super::search::{SearchRequest, SearchResult};

/// Request body for storing a page of results (PUT /entries)
///
/// # Fields
/// - `request`: The search the results belong to
/// - `results`: The result records to cache
/// - `total`: Total hit count reported by the backend
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    pub request: SearchRequest,
    pub results: Vec<SearchResult>,
    pub total: u64,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ttl == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        None
    }
}

/// Query string for pattern invalidation (DELETE /entries/matching)
#[derive(Debug, Clone, Deserialize)]
pub struct PatternQuery {
    pub pattern: String,
}
