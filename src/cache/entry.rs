//! Cache Entry Module
//!
//! Defines a cached page of search results with its TTL metadata.

use std::time::Duration;

use serde::Serialize;

use crate::models::SearchResult;

// == Cached Page ==
/// Results handed back to callers on a hit.
///
/// Always a copy; mutating it does not touch the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedPage {
    pub results: Vec<SearchResult>,
    pub total: u64,
}

// == Cache Entry ==
/// A snapshot of one search response with expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Owned copy of the result records
    pub results: Vec<SearchResult>,
    /// Total hit count reported by the backend
    pub total: u64,
    /// Clock reading at insertion (milliseconds)
    pub inserted_at_ms: u64,
    /// Lifetime of this entry
    pub ttl: Duration,
    /// Insertion sequence number, breaks timestamp ties during eviction
    pub seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, copying the caller's results.
    pub fn new(
        results: &[SearchResult],
        total: u64,
        inserted_at_ms: u64,
        ttl: Duration,
        seq: u64,
    ) -> Self {
        Self {
            results: results.to_vec(),
            total,
            inserted_at_ms,
            ttl,
            seq,
        }
    }

    // == Age ==
    /// Milliseconds since insertion.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at_ms)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry whose age equals its TTL is expired.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        u128::from(self.age_ms(now_ms)) >= self.ttl.as_millis()
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        let ttl_ms = u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX);
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }

    // == Eviction Order ==
    /// Sort key for oldest-inserted-first eviction.
    pub fn insertion_order(&self) -> (u64, u64) {
        (self.inserted_at_ms, self.seq)
    }

    // == Page ==
    pub fn page(&self) -> CachedPage {
        CachedPage {
            results: self.results.clone(),
            total: self.total,
        }
    }

    // == Approximate Size ==
    /// Serialized JSON size of the stored results and total, in bytes.
    pub fn approximate_size(&self) -> usize {
        let results = serde_json::to_vec(&self.results)
            .map(|bytes| bytes.len())
            .unwrap_or(0);
        results + self.total.to_string().len()
    }
}
