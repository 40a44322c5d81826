use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A thread-safe cache with a fixed time-to-live per entry.
pub struct Cache<K, V> {
    data: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a live value; expired entries are evicted on read.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        if let Some(entry) = self.data.get(key) {
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }
        self.evict_if_expired(key, now);
        None
    }

    /// Remove `key` only if the entry stored now is expired at `now`, so a
    /// value written after the read is kept.
    fn evict_if_expired(&self, key: &K, now: Instant) -> bool {
        self.data
            .remove_if(key, |_, entry| entry.expires_at <= now)
            .is_some()
    }

    /// Insert or replace a value, restarting its TTL.
    pub fn set(&self, key: K, value: V) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Remove all expired entries from the cache.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, including ones that expired but were not read yet.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Key = (&'static str, &'static str);

    fn cache(ttl_ms: u64) -> Cache<Key, Vec<f64>> {
        Cache::new(Duration::from_millis(ttl_ms))
    }

    #[test]
    fn test_get_live_entry() {
        let closes = cache(60_000);
        closes.set(("^GSPC", "1h"), vec![4500.0, 4510.5]);

        assert_eq!(closes.get(&("^GSPC", "1h")), Some(vec![4500.0, 4510.5]));
        assert_eq!(closes.get(&("^GSPC", "1d")), None);
        assert_eq!(closes.get(&("GC=F", "1h")), None);
        assert_eq!(closes.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let closes = cache(10);
        closes.set(("GC=F", "15m"), vec![1900.0]);
        assert_eq!(closes.len(), 1);

        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(closes.get(&("GC=F", "15m")), None);
        assert!(closes.is_empty());
    }

    #[test]
    fn test_set_replaces_and_restarts_ttl() {
        let closes = cache(60_000);
        closes.set(("^GSPC", "4h"), vec![1.0]);
        closes.set(("^GSPC", "4h"), vec![2.0, 3.0]);

        assert_eq!(closes.get(&("^GSPC", "4h")), Some(vec![2.0, 3.0]));
        assert_eq!(closes.len(), 1);
    }

    #[test]
    fn test_eviction_keeps_entry_rewritten_after_read() {
        let closes = cache(10);
        closes.set(("^GSPC", "1h"), vec![4500.0]);
        std::thread::sleep(Duration::from_millis(25));

        // A reader saw the stale entry at `seen`, then a writer refreshed it
        let seen = Instant::now();
        closes.set(("^GSPC", "1h"), vec![4510.0]);

        assert!(!closes.evict_if_expired(&("^GSPC", "1h"), seen));
        assert_eq!(closes.len(), 1);
    }

    #[test]
    fn test_eviction_removes_stale_entry() {
        let closes = cache(10);
        closes.set(("GC=F", "1d"), vec![1900.0]);
        std::thread::sleep(Duration::from_millis(25));

        assert!(closes.evict_if_expired(&("GC=F", "1d"), Instant::now()));
        assert!(closes.is_empty());
    }

    #[test]
    fn test_cleanup_keeps_live_entries() {
        let short = cache(50);
        short.set(("^GSPC", "1h"), Vec::new());
        short.set(("GC=F", "1h"), Vec::new());

        std::thread::sleep(Duration::from_millis(80));
        short.set(("GC=F", "1d"), vec![1950.0]);
        short.cleanup();

        assert_eq!(short.len(), 1);
        assert!(short.get(&("GC=F", "1d")).is_some());
    }
}
