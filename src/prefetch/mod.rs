//! Prefetch Module
//!
//! Warm-up orchestration: proactively fills the cache for anticipated
//! searches through an externally supplied search backend.

mod backend;
mod warmup;

pub use backend::SearchBackend;
pub use warmup::{
    popular_search_request, prefetch_popular_searches, search_through, warmup_cache,
    warmup_requests, PrefetchReport, POPULAR_TTL_FACTOR, PREFETCH_PAGE_SIZE, WARMUP_TTL_FACTOR,
};
