//! Cache Facade
//!
//! The capability set shared by every cache backend.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::Result;

// == Cache Trait ==
/// Uniform key-value cache contract.
///
/// `set`, `get` and `delete` complete before returning and report their
/// outcome. `async_set` and `async_delete` are fire-and-forget: the operation
/// runs on a separate Tokio task and the caller receives no completion or
/// failure signal. Callers that need confirmation must use the awaited
/// variants, or synchronise externally.
///
/// Backends are chosen at construction time and shared as `Arc<dyn Cache>`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<()>;

    /// Returns the live value for `key`; absent and expired keys are `NotFound`.
    async fn get(&self, key: &str) -> Result<Value>;

    /// Removes `key`; fails with `NotFound` if there is nothing to remove.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Schedules a `set` and returns immediately.
    fn async_set(&self, key: String, value: Value, ttl: Duration);

    /// Schedules a `delete` and returns immediately.
    fn async_delete(&self, key: String);
}

/// Runs a cache operation on the current Tokio runtime without waiting for it.
///
/// Errors are logged at debug level and otherwise dropped. Outside a runtime
/// the operation is not run at all.
pub(crate) fn spawn_detached<F>(operation: &'static str, key: String, task: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(err) = task.await {
                    debug!("Background {} of '{}' failed: {}", operation, key, err);
                }
            });
        }
        Err(_) => {
            warn!(
                "No Tokio runtime available, dropping background {} of '{}'",
                operation, key
            );
        }
    }
}
