//! Redis Cache Module
//!
//! Forwards the [`Cache`] contract to a Redis server. Values travel as JSON
//! text; expiry is delegated to Redis via `PX`.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ConnectionInfo, IntoConnectionInfo};
use serde_json::Value;
use tracing::info;

use crate::cache::facade::spawn_detached;
use crate::cache::Cache;
use crate::error::{CacheError, Result};

/// Connection parameters for [`RedisCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    /// `host:port` of the server
    pub addr: String,
    /// Password for `AUTH`, if any
    pub password: Option<String>,
    /// Logical database index
    pub db: i64,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            addr: "localhost:6379".to_string(),
            password: None,
            db: 0,
        }
    }
}

impl RedisSettings {
    /// Builds the client connection info.
    pub fn connection_info(&self) -> Result<ConnectionInfo> {
        let url = format!("redis://{}", self.addr);
        let mut info = url.as_str().into_connection_info()?;
        info.redis.db = self.db;
        info.redis.password = self.password.clone();
        Ok(info)
    }
}

// == Redis Cache ==
/// Redis-backed implementation of [`Cache`].
///
/// No retries: a transport failure surfaces immediately as `Backend`.
/// Cloning shares the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connects to the configured server and verifies it answers `PING`.
    pub async fn connect(settings: &RedisSettings) -> Result<Self> {
        let client = Client::open(settings.connection_info()?)?;
        let connection = ConnectionManager::new(client).await?;
        let cache = Self { connection };

        let pong = cache.ping().await?;
        info!(
            "Connected to Redis at {} (db {}), ping response: {}",
            settings.addr, settings.db, pong
        );
        Ok(cache)
    }

    pub async fn ping(&self) -> Result<String> {
        let mut connection = self.connection.clone();
        let pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        Ok(pong)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<()> {
        let mut connection = self.connection.clone();
        let millis = ttl_millis(ttl);

        // Redis rejects a zero expiry; an already expired write reads as absent.
        if millis == 0 {
            let _: i64 = connection.del(key).await?;
            return Ok(());
        }

        let payload = serde_json::to_string(&value)?;
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("PX")
            .arg(millis)
            .query_async(&mut connection)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Value> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.get(key).await?;

        match raw {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut connection = self.connection.clone();
        let removed: i64 = connection.del(key).await?;

        if removed == 0 {
            Err(CacheError::NotFound(key.to_string()))
        } else {
            Ok(())
        }
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

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}
