//! Search Cache - a bounded search result cache
//!
//! Sits in front of a remote full-text search: derives a key per search
//! request, expires entries by TTL, evicts the oldest insertions past a
//! size bound, and warms itself for anticipated searches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod prefetch;
pub mod tasks;

pub use api::AppState;
pub use cache::{shared, SearchCache, SharedCache};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
pub use prefetch::{prefetch_popular_searches, search_through, warmup_cache, SearchBackend};
pub use tasks::spawn_sweep_task;
