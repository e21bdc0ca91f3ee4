//! kvcache - A key-value cache with interchangeable backends
//!
//! A bounded in-process cache with TTL expiration and LRU eviction, and a
//! Redis adapter, both behind the [`Cache`] trait.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, MemoryCache, RedisCache};
pub use config::{CacheBackend, Config};
pub use error::{CacheError, Result};
