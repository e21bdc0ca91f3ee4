//! In-Memory Cache Module
//!
//! Shares a [`BoundedStore`] between concurrent callers behind a single
//! exclusive lock and exposes it through the [`Cache`] trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::cache::facade::spawn_detached;
use crate::cache::{BoundedStore, Cache, CacheStats};
use crate::error::Result;

// == Memory Cache ==
/// Thread-safe bounded LRU/TTL cache.
///
/// Cloning yields another handle to the same store. Every operation is a
/// short critical section over the key index and recency list together.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<BoundedStore<Value>>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates a cache holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Result<Self> {
        Ok(Self {
            store: Arc::new(Mutex::new(BoundedStore::new(max_entries)?)),
        })
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<()> {
        self.store.lock().await.set(key, value, ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Value> {
        self.store.lock().await.get(key)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.lock().await.delete(key)
    }

    fn async_set(&self, key: String, value: Value, ttl: Duration) {
        let cache = self.clone();
        let task_key = key.clone();
        spawn_detached("set", key, async move {
            cache.set(&task_key, value, ttl).await
        });
    }

    fn async_delete(&self, key: String) {
        let cache = self.clone();
        let task_key = key.clone();
        spawn_detached("delete", key, async move { cache.delete(&task_key).await });
    }
}
