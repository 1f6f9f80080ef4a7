//! Error types for the search cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the search cache and its admin API.
///
/// Store operations themselves never fail; these cover pattern parsing,
/// HTTP lookups and prefetch outcomes.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No fresh entry for the requested key
    #[error("Cache miss: {0}")]
    NotFound(String),

    /// Invalidation pattern failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The search backend rejected a warm-up request
    #[error("Prefetch failed for {label}: {reason}")]
    Prefetch { label: String, reason: String },
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidPattern(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Prefetch { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the search cache.
pub type Result<T> = std::result::Result<T, CacheError>;
