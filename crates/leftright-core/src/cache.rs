//! Small expiring key/value cache with an injected clock.

use crate::clock::Clock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at_ms: u64,
}

pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    // A poisoned lock only means another thread panicked mid-insert; the map itself is intact.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a live value, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now_ms();
        let mut entries = self.lock();

        match entries.get(key) {
            Some(e) if now < e.expires_at_ms => Some(e.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let expires_at_ms = self.clock.now_ms().saturating_add(ttl_ms);
        self.lock().insert(
            key,
            Entry {
                value,
                expires_at_ms,
            },
        );
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache(clock: &Arc<ManualClock>) -> TtlCache<&'static str, u64> {
        TtlCache::new(clock.clone(), Duration::from_secs(300))
    }

    #[test]
    fn test_value_lives_until_expiry() {
        let clock = Arc::new(ManualClock::new(1_000));
        let c = cache(&clock);
        c.insert("stars", 42);

        clock.advance(299_999);
        assert_eq!(c.get(&"stars"), Some(42));

        clock.advance(1);
        assert_eq!(c.get(&"stars"), None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_custom_ttl_overrides_default() {
        let clock = Arc::new(ManualClock::new(0));
        let c = cache(&clock);
        c.insert_with_ttl("stars", 0, Duration::from_secs(60));

        clock.advance(59_000);
        assert_eq!(c.get(&"stars"), Some(0));
        clock.advance(1_000);
        assert_eq!(c.get(&"stars"), None);
    }

    #[test]
    fn test_reinsert_refreshes_expiry() {
        let clock = Arc::new(ManualClock::new(0));
        let c = cache(&clock);
        c.insert("stars", 1);
        clock.advance(200_000);
        c.insert("stars", 2);
        clock.advance(200_000);
        assert_eq!(c.get(&"stars"), Some(2));
    }

    #[test]
    fn test_missing_key() {
        let clock = Arc::new(ManualClock::new(0));
        let c = cache(&clock);
        assert_eq!(c.get(&"nope"), None);
        c.insert("a", 1);
        c.clear();
        assert_eq!(c.len(), 0);
    }
}
