//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::RedisSettings;

/// Which cache implementation the server is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Bounded in-process LRU/TTL store
    Memory,
    /// External Redis server
    Redis,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend used to serve requests
    pub backend: CacheBackend,
    /// Maximum number of entries the in-process cache can hold
    pub max_entries: usize,
    /// TTL in seconds applied when a request carries none
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Redis address as `host:port`
    pub redis_addr: String,
    /// Redis password, if the server requires one
    pub redis_password: Option<String>,
    /// Redis logical database index
    pub redis_db: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REDIS_ADDR` - Redis address (default: localhost:6379)
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    /// - `REDIS_DB` - Redis database index (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.backend),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            redis_addr: env::var("REDIS_ADDR").unwrap_or(defaults.redis_addr),
            redis_password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            redis_db: parse_var("REDIS_DB").unwrap_or(defaults.redis_db),
        }
    }

    /// Default TTL as a Duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Connection settings for the Redis backend.
    pub fn redis_settings(&self) -> RedisSettings {
        RedisSettings {
            addr: self.redis_addr.clone(),
            password: self.redis_password.clone(),
            db: self.redis_db,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            max_entries: 1000,
            default_ttl: 300,
            server_port: 8080,
            redis_addr: "localhost:6379".to_string(),
            redis_password: None,
            redis_db: 0,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, CacheBackend::Memory);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.redis_addr, "localhost:6379");
        assert!(config.redis_password.is_none());
        assert_eq!(config.redis_db, 0);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for var in [
            "CACHE_BACKEND",
            "MAX_ENTRIES",
            "DEFAULT_TTL",
            "SERVER_PORT",
            "REDIS_ADDR",
            "REDIS_PASSWORD",
            "REDIS_DB",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.backend, CacheBackend::Memory);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("redis".parse::<CacheBackend>(), Ok(CacheBackend::Redis));
        assert_eq!(" Memory ".parse::<CacheBackend>(), Ok(CacheBackend::Memory));
        assert!("memcached".parse::<CacheBackend>().is_err());
    }

    #[test]
    fn test_redis_settings_from_config() {
        let config = Config {
            redis_addr: "cache.internal:6380".to_string(),
            redis_password: Some("secret".to_string()),
            redis_db: 3,
            ..Config::default()
        };

        let settings = config.redis_settings();
        assert_eq!(settings.addr, "cache.internal:6380");
        assert_eq!(settings.password.as_deref(), Some("secret"));
        assert_eq!(settings.db, 3);
    }
}
