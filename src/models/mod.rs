//! Search and API models
//!
//! Domain types the cache keys on, plus the DTOs used for
//! serializing/deserializing admin HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod search;

// Re-export commonly used types
pub use requests::{PatternQuery, StoreRequest};
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, LookupResponse, StatsResponse, StoreResponse,
};
pub use search::{PriceRange, SearchPage, SearchRequest, SearchResult, SortOrder};
