//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for both cache backends and the HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent, or expired and lazily removed
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache could not be constructed with the given parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Value could not be encoded for, or decoded from, the remote store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote store reported a failure
    #[error("Backend error: {0}")]
    Backend(#[from] redis::RedisError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfig(_) | CacheError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CacheError::Backend(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
