//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::Cache;
use crate::error::{CacheError, Result};
use crate::models::{DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse};

/// Application state shared across all handlers.
///
/// Holds whichever cache backend the process was wired with.
#[derive(Clone)]
pub struct AppState {
    /// Selected cache backend
    pub cache: Arc<dyn Cache>,
    /// TTL applied when a request carries none
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Arc<dyn Cache>, default_ttl: Duration) -> Self {
        Self { cache, default_ttl }
    }
}

/// Handler for POST /cache
///
/// Stores a key-value pair with the request TTL, or the default one.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req
        .ttl
        .map(Duration::from_secs)
        .unwrap_or(state.default_ttl);
    state.cache.set(&req.key, req.value, ttl).await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key).await?;
    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use mock_instant::MockClock;
    use serde_json::json;

    fn test_state(max_entries: usize) -> AppState {
        let cache = MemoryCache::new(max_entries).unwrap();
        AppState::new(Arc::new(cache), Duration::from_secs(300))
    }

    fn set_request(key: &str, value: serde_json::Value, ttl: Option<u64>) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value,
            ttl,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state(100);

        let req = set_request("test_key", json!({"answer": 42}), None);
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"answer": 42}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state(100);

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state(100);

        let req = set_request("to_delete", json!("value"), None);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_default_ttl_applies() {
        let state = test_state(100);

        let req = set_request("defaulted", json!(1), None);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        MockClock::advance(Duration::from_secs(299));
        assert!(get_handler(State(state.clone()), Path("defaulted".to_string()))
            .await
            .is_ok());

        MockClock::advance(Duration::from_secs(1));
        assert!(get_handler(State(state), Path("defaulted".to_string()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_request_ttl_overrides_default() {
        let state = test_state(100);

        let req = set_request("short", json!(1), Some(5));
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        MockClock::advance(Duration::from_secs(5));
        assert!(get_handler(State(state), Path("short".to_string()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state(100);

        let req = set_request("", json!("value"), None);
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
