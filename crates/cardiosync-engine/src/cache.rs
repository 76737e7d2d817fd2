//! Time-bounded query memoization for the reporting layer.
//!
//! A plain mutex-guarded map keyed by query string. Entries expire after a
//! fixed TTL and are evicted on access; there is no background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A TTL cache keyed by query string.
pub struct QueryCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Arc<T>)>>,
}

impl<T> QueryCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry; an expired entry is evicted and reported as
    /// a miss.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(Arc::clone(value)),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under `key`, stamped with the current time.
    pub fn put(&self, key: &str, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key.to_string(), (Instant::now(), Arc::clone(&value)));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_inside_ttl() {
        let cache = QueryCache::new(Duration::from_secs(600));
        cache.put("HealthDB/HeartAttack", vec![1, 2, 3]);
        let hit = cache.get("HealthDB/HeartAttack").unwrap();
        assert_eq!(*hit, vec![1, 2, 3]);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.put("k", 1u32);
        assert!(cache.get("k").is_none());
        // The expired entry is gone, not just hidden.
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let cache = QueryCache::new(Duration::from_secs(600));
        cache.put("a", 1u32);
        assert!(cache.get("b").is_none());
        assert_eq!(*cache.get("a").unwrap(), 1);
    }

    #[test]
    fn put_overwrites() {
        let cache = QueryCache::new(Duration::from_secs(600));
        cache.put("k", 1u32);
        cache.put("k", 2u32);
        assert_eq!(*cache.get("k").unwrap(), 2);
    }
}
