//! Cache Statistics Module
//!
//! Snapshot of cache occupancy.

use serde::Serialize;

// == Cache Stats ==
/// Occupancy snapshot returned by `SearchCache::stats`.
///
/// Hits and misses are not counted, so `hit_rate` is always `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Configured entry ceiling
    pub max_size: usize,
    /// Approximate serialized size of all keys and entries, in bytes
    pub memory_usage_bytes: usize,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(size: usize, max_size: usize, memory_usage_bytes: usize) -> Self {
        Self {
            size,
            max_size,
            memory_usage_bytes,
            hit_rate: 0.0,
        }
    }

    /// Fraction of the entry ceiling in use.
    pub fn fill_ratio(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.size as f64 / self.max_size as f64
        }
    }
}
