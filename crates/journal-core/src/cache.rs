//! Injectable time-bounded caches.
//!
//! Services take a [`Cache`] instead of owning a module-level map so callers
//! choose the lifetime and tests can swap in [`NoopCache`].

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Key/value cache with a per-entry time to live.
pub trait Cache<K, V>: Send + Sync {
    /// Cached value, or `None` if absent or expired.
    fn get(&self, key: &K) -> Option<V>;

    /// Store `value`, replacing any previous entry for `key`.
    fn put(&self, key: K, value: V, ttl: Duration);

    fn invalidate(&self, key: &K);

    fn clear(&self);
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// In-memory cache; expired entries are dropped when touched.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// Number of live entries. Purges expired ones first.
    pub fn len(&self) -> usize {
        let mut entries = lock(&self.entries);
        expire_entries(&mut entries);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let mut entries = lock(&self.entries);
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: K, value: V, ttl: Duration) {
        let mut entries = lock(&self.entries);
        expire_entries(&mut entries);
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    fn invalidate(&self, key: &K) {
        lock(&self.entries).remove(key);
    }

    fn clear(&self) {
        lock(&self.entries).clear();
    }
}

/// Cache that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl<K, V> Cache<K, V> for NoopCache {
    fn get(&self, _key: &K) -> Option<V> {
        None
    }

    fn put(&self, _key: K, _value: V, _ttl: Duration) {}

    fn invalidate(&self, _key: &K) {}

    fn clear(&self) {}
}

// A poisoned cache is still a valid cache; take the map back.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn expire_entries<K: Eq + Hash, V>(entries: &mut HashMap<K, CacheEntry<V>>) {
    entries.retain(|_, entry| !entry.is_expired());
}
