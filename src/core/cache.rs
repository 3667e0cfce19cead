use crate::domain::ports::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// TTL for cached country directories.
pub const DIRECTORY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL for individual LOCODE lookups.
pub const LOOKUP_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory map with per-entry freshness. Expired entries are treated as
/// misses and overwritten on the next put; `sweep_expired` only bounds
/// memory growth. The lock is never held across an await point.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: Box<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Box<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.lock();
        let entry = entries.get(key)?;
        if now.duration_since(entry.stored_at) < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: &str, value: V) {
        let stored_at = self.clock.now();
        self.lock()
            .insert(key.to_string(), Entry { value, stored_at });
    }

    pub fn sweep_expired(&self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.lock()
            .retain(|_, entry| now.duration_since(entry.stored_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::MockClock;
    use super::*;

    #[test]
    fn test_get_within_ttl() {
        let cache = TtlCache::new(DIRECTORY_TTL);
        cache.put("us", vec!["USNYC".to_string()]);
        assert_eq!(cache.get("us"), Some(vec!["USNYC".to_string()]));
        assert_eq!(cache.get("gb"), None);
    }

    #[test]
    fn test_expired_entry_is_miss() {
        let clock = MockClock::new();
        let cache = TtlCache::with_clock(DIRECTORY_TTL, Box::new(clock.clone()));

        cache.put("us", 1u32);
        clock.advance(Duration::from_secs(23 * 60 * 60));
        assert_eq!(cache.get("us"), Some(1));

        clock.advance(Duration::from_secs(2 * 60 * 60));
        assert_eq!(cache.get("us"), None);
        // Stale entry stays until swept or overwritten.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_unconditionally() {
        let clock = MockClock::new();
        let cache = TtlCache::with_clock(LOOKUP_TTL, Box::new(clock.clone()));

        cache.put("usnyc", 1u32);
        clock.advance(Duration::from_secs(2 * 60 * 60));
        cache.put("usnyc", 2u32);
        assert_eq!(cache.get("usnyc"), Some(2));
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let clock = MockClock::new();
        let cache = TtlCache::with_clock(LOOKUP_TTL, Box::new(clock.clone()));

        cache.put("old", 1u32);
        clock.advance(Duration::from_secs(2 * 60 * 60));
        cache.put("fresh", 2u32);
        cache.sweep_expired();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(2));
        assert_eq!(cache.get("old"), None);
    }
}
