//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `POST /lookup` - Cached page for a search request
//! - `PUT /entries` - Store a page of results
//! - `DELETE /entries` - Clear the cache
//! - `DELETE /entries/matching` - Clear entries whose key matches a pattern
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
