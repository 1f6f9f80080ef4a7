//! Cache Module
//!
//! Provides the in-memory search result cache: key derivation, TTL
//! expiration and size-bounded eviction.

use std::sync::Arc;

use tokio::sync::RwLock;

mod clock;
mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use entry::{CacheEntry, CachedPage};
pub use key::{cache_key, KEY_DELIMITER};
pub use stats::CacheStats;
pub use store::SearchCache;

// == Public Constants ==
/// Result sets longer than this are never cached
pub const MAX_CACHED_RESULTS: usize = 100;

/// Non-empty queries shorter than this many characters are never cached
pub const MIN_QUERY_LENGTH: usize = 2;

/// A cache instance shared between request handlers and warm-up tasks.
pub type SharedCache = Arc<RwLock<SearchCache>>;

/// Wraps a cache for shared use.
pub fn shared(cache: SearchCache) -> SharedCache {
    Arc::new(RwLock::new(cache))
}
