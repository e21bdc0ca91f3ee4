//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

use std::time::Duration;

/// Upper bound applied to every TTL so `now + ttl` cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single cache entry: key, value and absolute expiration instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being readable
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry which expires `ttl` from now.
    pub fn new(key: String, value: V, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: expiration_from_now(ttl),
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL window.
    pub fn refresh(&mut self, value: V, ttl: Duration) {
        self.value = value;
        self.expires_at = expiration_from_now(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration instant, so a TTL of `d` is readable strictly before `d`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        let now = Instant::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::ZERO
        }
    }
}

fn expiration_from_now(ttl: Duration) -> Instant {
    Instant::now() + ttl.min(MAX_TTL)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use mock_instant::MockClock;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("k".to_string(), "test_value", Duration::from_secs(60));

        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, "test_value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("k".to_string(), 1, Duration::from_secs(1));
        assert!(!entry.is_expired());

        MockClock::advance(Duration::from_millis(999));
        assert!(!entry.is_expired());

        MockClock::advance(Duration::from_millis(1));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("k".to_string(), (), Duration::ZERO);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("k".to_string(), (), Duration::from_secs(10));
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(10));

        MockClock::advance(Duration::from_secs(4));
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(6));

        MockClock::advance(Duration::from_secs(20));
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_refresh_resets_window() {
        let mut entry = CacheEntry::new("k".to_string(), "old", Duration::from_secs(5));
        MockClock::advance(Duration::from_secs(4));

        entry.refresh("new", Duration::from_secs(5));
        MockClock::advance(Duration::from_secs(4));

        assert_eq!(entry.value, "new");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let entry = CacheEntry::new("k".to_string(), (), Duration::MAX);
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() <= MAX_TTL);
    }
}
