//! Cache Module
//!
//! Provides the [`Cache`] contract and its two backends: a bounded in-process
//! cache with TTL expiration and LRU eviction, and a Redis adapter.

mod entry;
mod facade;
mod lru;
mod memory;
mod remote;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use facade::Cache;
pub use lru::{NodeId, OrderedEntries};
pub use memory::MemoryCache;
pub use remote::{RedisCache, RedisSettings};
pub use stats::CacheStats;
pub use store::BoundedStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
