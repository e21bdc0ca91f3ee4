//! Cache Store Module
//!
//! Bounded cache engine combining a key index with recency ordering and lazy
//! TTL expiration.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, NodeId, OrderedEntries};
use crate::error::{CacheError, Result};

// == Bounded Store ==
/// Capacity-bounded storage with LRU eviction and lazy TTL expiration.
///
/// The key index and the recency list always hold the same set of keys.
/// Not synchronised; see [`MemoryCache`](crate::cache::MemoryCache) for the
/// shared, locked wrapper.
#[derive(Debug)]
pub struct BoundedStore<V> {
    /// Key to node in the recency list
    index: HashMap<String, NodeId>,
    /// Entries ordered from most to least recently used
    order: OrderedEntries<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<V: Clone + Debug> BoundedStore<V> {
    // == Constructor ==
    /// Creates a new store holding at most `max_entries` entries.
    ///
    /// Fails with `InvalidConfig` when `max_entries` is zero.
    pub fn new(max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            index: HashMap::with_capacity(max_entries),
            order: OrderedEntries::with_capacity(max_entries),
            stats: CacheStats::new(),
            max_entries,
        })
    }

    // == Set ==
    /// Stores a value which expires `ttl` from now.
    ///
    /// An existing key gets the new value and a fresh TTL window. A new key at
    /// capacity evicts the least recently used entry first. Either way the key
    /// becomes the most recently used. Returns the evicted key, if any.
    pub fn set(&mut self, key: &str, value: V, ttl: Duration) -> Option<String> {
        if let Some(&id) = self.index.get(key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.refresh(value, ttl);
            }
            self.order.move_to_front(id);
            return None;
        }

        let evicted = if self.index.len() >= self.max_entries {
            self.evict_oldest()
        } else {
            None
        };

        let id = self
            .order
            .insert_front(CacheEntry::new(key.to_string(), value, ttl));
        self.index.insert(key.to_string(), id);
        self.stats.set_total_entries(self.index.len());

        evicted
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Expired entries are removed on the spot and reported exactly like
    /// absent keys.
    pub fn get(&mut self, key: &str) -> Result<V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        let expired = self.order.get(id).map_or(true, |entry| entry.is_expired());
        if expired {
            self.remove_node(key, id);
            debug!("Removed expired key '{}'", key);
            self.stats.record_expiration();
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        }

        self.order.move_to_front(id);
        self.stats.record_hit();
        self.order
            .get(id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        match self.index.get(key).copied() {
            Some(id) => {
                if let Some(entry) = self.remove_node(key, id) {
                    debug!("Removed key '{}' with value {:?}", key, entry.value);
                }
                Ok(())
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Peek Oldest ==
    /// Returns the key that the next eviction would remove.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order
            .back()
            .and_then(|id| self.order.get(id))
            .map(|entry| entry.key.as_str())
    }

    /// Keys from most to least recently used, expired entries included.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    // == Evict Oldest ==
    fn evict_oldest(&mut self) -> Option<String> {
        let id = self.order.back()?;
        let entry = self.order.remove(id)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        info!(
            "Evicting least recently used key '{}' with value {:?}",
            entry.key, entry.value
        );
        Some(entry.key)
    }

    fn remove_node(&mut self, key: &str, id: NodeId) -> Option<CacheEntry<V>> {
        self.index.remove(key);
        let entry = self.order.remove(id);
        self.stats.set_total_entries(self.index.len());
        entry
    }
}
