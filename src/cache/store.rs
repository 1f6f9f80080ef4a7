//! Cache Store Module
//!
//! Bounded search result cache: HashMap storage keyed by the derived
//! request key, per-entry TTL expiration and oldest-inserted eviction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::cache::{
    cache_key, CacheEntry, CacheStats, CachedPage, Clock, MonotonicClock, MAX_CACHED_RESULTS,
    MIN_QUERY_LENGTH,
};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::models::{SearchRequest, SearchResult};

// == Search Cache ==
/// Search result cache with TTL expiration and a size bound.
///
/// Eviction removes the oldest *inserted* entries first. Reads do not
/// refresh an entry's position, so this approximates LRU without tracking
/// access order. Expired entries are swept lazily on `set`, or dropped
/// when a `get` lands on them.
#[derive(Debug)]
pub struct SearchCache {
    /// Entries by derived key
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    /// Next insertion sequence number
    next_seq: u64,
}

impl SearchCache {
    // == Constructor ==
    /// Creates a cache backed by a monotonic clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Creates a cache reading time from the given clock.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            clock,
            next_seq: 0,
        }
    }

    // == Get ==
    /// Looks up the cached page for a request.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, request: &SearchRequest) -> Option<CachedPage> {
        let key = cache_key(request);
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get(&key) else {
            if self.config.enable_logging {
                debug!(key = %key, "Cache miss");
            }
            return None;
        };

        if entry.is_expired(now) {
            if self.config.enable_logging {
                debug!(key = %key, age_ms = entry.age_ms(now), "Cache entry expired");
            }
            self.entries.remove(&key);
            return None;
        }

        if self.config.enable_logging {
            debug!(
                key = %key,
                ttl_remaining_ms = entry.ttl_remaining_ms(now),
                "Cache hit"
            );
        }
        Some(entry.page())
    }

    // == Contains ==
    /// Returns true if a fresh entry exists. Does not remove expired entries.
    pub fn contains(&self, request: &SearchRequest) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(&cache_key(request))
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Set ==
    /// Stores a snapshot of `results` for the request.
    ///
    /// Skipped (returns `false`) when the results are empty, longer than
    /// `MAX_CACHED_RESULTS`, or the query is non-empty but shorter than
    /// `MIN_QUERY_LENGTH` characters. An existing entry for the same key is
    /// replaced and restamped. Also returns `false` when the new entry does
    /// not survive the sweep and size enforcement that follow the insert.
    ///
    /// # Arguments
    /// * `request` - The search the results belong to
    /// * `results` - Result records, copied into the cache
    /// * `total` - Total hit count reported by the backend
    /// * `ttl` - Optional TTL (uses the configured default if None)
    pub fn set(
        &mut self,
        request: &SearchRequest,
        results: &[SearchResult],
        total: u64,
        ttl: Option<Duration>,
    ) -> bool {
        if let Some(reason) = skip_reason(request, results) {
            if self.config.enable_logging {
                debug!(key = %cache_key(request), reason, "Not caching results");
            }
            return false;
        }

        let key = cache_key(request);
        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let entry = CacheEntry::new(results, total, self.clock.now_ms(), ttl, self.next_seq);
        self.next_seq += 1;

        if self.config.enable_logging {
            debug!(
                key = %key,
                results = results.len(),
                ttl_ms = ttl.as_millis() as u64,
                "Cached results"
            );
        }
        self.entries.insert(key.clone(), entry);

        self.cleanup_expired();
        self.enforce_size_limit();

        // A zero TTL or a zero size bound drops the entry straight away
        let stored = self.entries.contains_key(&key);
        if !stored && self.config.enable_logging {
            debug!(key = %key, "Cached results dropped on insert");
        }
        stored
    }

    // == Clear ==
    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        if self.config.enable_logging {
            debug!(removed, "Cache cleared");
        }
        removed
    }

    // == Clear Pattern ==
    /// Removes every entry whose key matches `pattern`.
    ///
    /// Returns the number of entries removed.
    pub fn clear_pattern(&mut self, pattern: &Regex) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !pattern.is_match(key));
        let removed = before - self.entries.len();
        if self.config.enable_logging {
            debug!(pattern = %pattern, removed, "Cleared matching cache entries");
        }
        removed
    }

    /// Compiles `pattern` and removes every matching entry.
    pub fn clear_matching(&mut self, pattern: &str) -> Result<usize> {
        let pattern = Regex::new(pattern)?;
        Ok(self.clear_pattern(&pattern))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Each entry is judged against its own TTL. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();

        if removed > 0 && self.config.enable_logging {
            debug!(removed, "Expired cache entries swept");
        }
        removed
    }

    // == Enforce Size Limit ==
    /// Evicts oldest-inserted entries until the size bound holds.
    fn enforce_size_limit(&mut self) {
        let max = self.config.max_cache_size;
        if self.entries.len() <= max {
            return;
        }

        let mut by_age: Vec<(&String, (u64, u64))> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.insertion_order()))
            .collect();
        by_age.sort_unstable_by_key(|(_, order)| *order);

        let excess = self.entries.len() - max;
        let evicted: Vec<String> = by_age
            .into_iter()
            .take(excess)
            .map(|(key, _)| key.clone())
            .collect();

        for key in evicted {
            self.entries.remove(&key);
            if self.config.enable_logging {
                debug!(key = %key, "Cache entry evicted");
            }
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let memory_usage_bytes = self
            .entries
            .iter()
            .map(|(key, entry)| key.len() + entry.approximate_size())
            .sum();
        CacheStats::new(self.entries.len(), self.config.max_cache_size, memory_usage_bytes)
    }

    // == Accessors ==
    pub fn default_ttl(&self) -> Duration {
        self.config.default_ttl
    }

    pub fn logging_enabled(&self) -> bool {
        self.config.enable_logging
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// Why a result set is excluded from caching, if it is.
fn skip_reason(request: &SearchRequest, results: &[SearchResult]) -> Option<&'static str> {
    if results.is_empty() {
        return Some("empty results");
    }
    if results.len() > MAX_CACHED_RESULTS {
        return Some("too many results");
    }
    let short_query = request
        .query
        .as_deref()
        .is_some_and(|q| !q.is_empty() && q.chars().count() < MIN_QUERY_LENGTH);
    if short_query {
        return Some("query too short");
    }
    None
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;
    use serde_json::json;

    fn test_cache(max: usize) -> (SearchCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = CacheConfig::default().with_max_cache_size(max);
        (SearchCache::with_clock(config, clock.clone()), clock)
    }

    fn book(title: &str) -> SearchResult {
        json!({ "title": title })
    }

    #[test]
    fn test_store_new() {
        let (cache, _) = test_cache(100);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_set_and_get() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");

        assert!(cache.set(&req, &[book("A")], 1, None));
        let page = cache.get(&req).unwrap();

        assert_eq!(page.results, vec![book("A")]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let (mut cache, _) = test_cache(100);
        assert!(cache.get(&SearchRequest::query("nothing")).is_none());
    }

    #[test]
    fn test_get_with_reordered_tags_hits() {
        let (mut cache, _) = test_cache(100);
        cache.set(
            &SearchRequest::query("dune").with_tags(["a", "b"]),
            &[book("Dune")],
            1,
            None,
        );

        let hit = cache.get(&SearchRequest::query("dune").with_tags(["b", "a"]));
        assert!(hit.is_some());
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");

        cache.set(&req, &[book("A")], 1, None);
        cache.set(&req, &[book("B"), book("C")], 2, None);

        let page = cache.get(&req).unwrap();
        assert_eq!(page.results, vec![book("B"), book("C")]);
        assert_eq!(page.total, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stored_results_are_a_snapshot() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");
        let mut results = vec![book("A")];

        cache.set(&req, &results, 1, None);
        results.push(book("B"));

        let mut page = cache.get(&req).unwrap();
        assert_eq!(page.results, vec![book("A")]);

        page.results.clear();
        assert_eq!(cache.get(&req).unwrap().results.len(), 1);
    }

    #[test]
    fn test_ttl_expiration() {
        let (mut cache, clock) = test_cache(100);
        let req = SearchRequest::query("fiction");
        cache.set(&req, &[book("A")], 1, None);

        clock.advance(Duration::from_secs(299));
        assert!(cache.get(&req).is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&req).is_none());
        assert_eq!(cache.len(), 0, "Expired entry should be removed on get");
    }

    #[test]
    fn test_custom_ttl_boundary() {
        let (mut cache, clock) = test_cache(100);
        let req = SearchRequest::query("fiction");
        cache.set(&req, &[book("A")], 1, Some(Duration::from_millis(1_000)));

        clock.set_ms(999);
        assert!(cache.get(&req).is_some());
        clock.set_ms(1_000);
        assert!(cache.get(&req).is_none());
    }

    #[test]
    fn test_skip_empty_results() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");

        assert!(!cache.set(&req, &[], 0, None));
        assert!(cache.get(&req).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_skip_oversized_results() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");
        let results: Vec<SearchResult> = (0..=MAX_CACHED_RESULTS).map(|i| json!(i)).collect();

        assert!(!cache.set(&req, &results, 500, None));
        assert!(cache.get(&req).is_none());

        let results: Vec<SearchResult> = (0..MAX_CACHED_RESULTS).map(|i| json!(i)).collect();
        assert!(cache.set(&req, &results, 500, None));
    }

    #[test]
    fn test_skip_short_query() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("a");

        assert!(!cache.set(&req, &[book("A")], 1, None));
        assert!(cache.get(&req).is_none());
    }

    #[test]
    fn test_short_query_counts_characters() {
        let (mut cache, _) = test_cache(100);
        // One character, two bytes
        assert!(!cache.set(&SearchRequest::query("é"), &[book("A")], 1, None));
        assert!(cache.set(&SearchRequest::query("éa"), &[book("A")], 1, None));
    }

    #[test]
    fn test_empty_query_is_cacheable() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::default().with_category("fiction");

        assert!(cache.set(&req, &[book("A")], 1, None));
        assert!(cache.get(&req).is_some());
    }

    #[test]
    fn test_eviction_oldest_inserted_first() {
        let (mut cache, clock) = test_cache(3);

        for query in ["q1", "q2", "q3", "q4"] {
            cache.set(&SearchRequest::query(query), &[book(query)], 1, None);
            clock.advance(Duration::from_millis(10));
        }

        assert_eq!(cache.len(), 3);
        assert!(cache.get(&SearchRequest::query("q1")).is_none());
        assert!(cache.get(&SearchRequest::query("q2")).is_some());
        assert!(cache.get(&SearchRequest::query("q3")).is_some());
        assert!(cache.get(&SearchRequest::query("q4")).is_some());
    }

    #[test]
    fn test_eviction_with_identical_timestamps() {
        let (mut cache, _) = test_cache(3);

        for query in ["q1", "q2", "q3", "q4"] {
            cache.set(&SearchRequest::query(query), &[book(query)], 1, None);
        }

        assert_eq!(cache.len(), 3);
        assert!(cache.get(&SearchRequest::query("q1")).is_none());
    }

    #[test]
    fn test_reads_do_not_refresh_eviction_order() {
        let (mut cache, _) = test_cache(3);

        for query in ["q1", "q2", "q3"] {
            cache.set(&SearchRequest::query(query), &[book(query)], 1, None);
        }
        // Reading q1 does not protect it
        assert!(cache.get(&SearchRequest::query("q1")).is_some());

        cache.set(&SearchRequest::query("q4"), &[book("q4")], 1, None);
        assert!(cache.get(&SearchRequest::query("q1")).is_none());
        assert!(cache.get(&SearchRequest::query("q2")).is_some());
    }

    #[test]
    fn test_overwrite_restamps_entry() {
        let (mut cache, _) = test_cache(3);

        for query in ["q1", "q2", "q3"] {
            cache.set(&SearchRequest::query(query), &[book(query)], 1, None);
        }
        cache.set(&SearchRequest::query("q1"), &[book("q1 again")], 1, None);
        cache.set(&SearchRequest::query("q4"), &[book("q4")], 1, None);

        assert!(cache.get(&SearchRequest::query("q1")).is_some());
        assert!(cache.get(&SearchRequest::query("q2")).is_none());
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let (mut cache, clock) = test_cache(100);
        cache.set(&SearchRequest::query("short"), &[book("A")], 1, Some(Duration::from_secs(1)));
        cache.set(&SearchRequest::query("long"), &[book("B")], 1, Some(Duration::from_secs(60)));

        clock.advance(Duration::from_secs(2));
        // Still present until something sweeps
        assert_eq!(cache.len(), 2);

        cache.set(&SearchRequest::query("new"), &[book("C")], 1, None);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&SearchRequest::query("short")));
        assert!(cache.contains(&SearchRequest::query("long")));
    }

    #[test]
    fn test_cleanup_expired() {
        let (mut cache, clock) = test_cache(100);
        cache.set(&SearchRequest::query("key1"), &[book("A")], 1, Some(Duration::from_secs(1)));
        cache.set(&SearchRequest::query("key2"), &[book("B")], 1, Some(Duration::from_secs(10)));

        clock.advance(Duration::from_millis(1_100));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&SearchRequest::query("key2")).is_some());
    }

    #[test]
    fn test_contains_does_not_remove() {
        let (mut cache, clock) = test_cache(100);
        let req = SearchRequest::query("fiction");
        cache.set(&req, &[book("A")], 1, Some(Duration::from_secs(1)));
        assert!(cache.contains(&req));

        clock.advance(Duration::from_secs(1));
        assert!(!cache.contains(&req));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let (mut cache, _) = test_cache(100);
        cache.set(&SearchRequest::query("one"), &[book("A")], 1, None);
        cache.set(&SearchRequest::query("two"), &[book("B")], 1, None);

        assert_eq!(cache.clear(), 2);
        assert!(cache.get(&SearchRequest::query("one")).is_none());
        assert!(cache.get(&SearchRequest::query("two")).is_none());
    }

    #[test]
    fn test_set_with_zero_ttl_is_not_stored() {
        let (mut cache, _) = test_cache(100);
        let req = SearchRequest::query("fiction");

        assert!(!cache.set(&req, &[book("A")], 1, Some(Duration::ZERO)));
        assert!(cache.get(&req).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_with_zero_capacity_is_not_stored() {
        let (mut cache, _) = test_cache(0);
        let req = SearchRequest::query("fiction");

        assert!(!cache.set(&req, &[book("A")], 1, None));
        assert!(cache.get(&req).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear_pattern() {
        let (mut cache, _) = test_cache(100);
        cache.set(&SearchRequest::query("fiction"), &[book("A")], 1, None);
        let scifi = SearchRequest::query("dune").with_category("science fiction");
        cache.set(&scifi, &[book("B")], 1, None);
        cache.set(&SearchRequest::query("poetry"), &[book("C")], 1, None);

        let removed = cache.clear_pattern(&Regex::new("fiction").unwrap());

        assert_eq!(removed, 2);
        assert!(cache.get(&SearchRequest::query("fiction")).is_none());
        assert!(cache.get(&SearchRequest::query("poetry")).is_some());
    }

    #[test]
    fn test_clear_matching_anchored_prefix() {
        let (mut cache, _) = test_cache(100);
        cache.set(&SearchRequest::query("dune").with_page(20, 0), &[book("A")], 1, None);
        cache.set(&SearchRequest::query("dune").with_page(20, 20), &[book("B")], 1, None);
        cache.set(&SearchRequest::query("dunes"), &[book("C")], 1, None);

        assert_eq!(cache.clear_matching(r"^dune\|").unwrap(), 2);
        assert!(cache.get(&SearchRequest::query("dunes")).is_some());
    }

    #[test]
    fn test_clear_matching_invalid_pattern() {
        let (mut cache, _) = test_cache(100);
        let result = cache.clear_matching("(unclosed");
        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
    }

    #[test]
    fn test_stats() {
        let (mut cache, _) = test_cache(50);
        assert_eq!(cache.stats(), CacheStats::new(0, 50, 0));

        cache.set(&SearchRequest::query("fiction"), &[book("A")], 1, None);
        let stats = cache.stats();

        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_size, 50);
        assert!(stats.memory_usage_bytes > 0);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_logging_enabled_paths() {
        let clock = Arc::new(ManualClock::new());
        let config = CacheConfig::default().with_max_cache_size(1).with_logging(true);
        let mut cache = SearchCache::with_clock(config, clock.clone());
        assert!(cache.logging_enabled());

        cache.set(&SearchRequest::query("one"), &[book("A")], 1, None);
        cache.set(&SearchRequest::query("two"), &[book("B")], 1, None);
        cache.set(&SearchRequest::query("x"), &[book("C")], 1, None);
        assert!(cache.get(&SearchRequest::query("two")).is_some());
        assert!(cache.get(&SearchRequest::query("one")).is_none());
        assert_eq!(cache.len(), 1);
    }
}
