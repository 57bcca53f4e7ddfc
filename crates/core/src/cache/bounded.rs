//! Capacity- and time-bounded associative store.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default entry lifetime in minutes.
pub const DEFAULT_TTL_MINUTES: u64 = 5;

/// Default maximum number of stored entries.
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Construction-time cache limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Entry lifetime in minutes (minimum 1).
    pub ttl_minutes: u64,
    /// Maximum number of stored entries, stale ones included (minimum 1).
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_minutes: DEFAULT_TTL_MINUTES, max_entries: DEFAULT_MAX_ENTRIES }
    }
}

impl CacheSettings {
    /// TTL as a Duration, with the one-minute floor applied.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.max(1) * 60)
    }
}

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    /// Insertion sequence, breaks ties between equal `created_at` readings.
    seq: u64,
}

struct Store<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    next_seq: u64,
}

/// A key/value store with per-entry expiration and a maximum entry count.
///
/// Expired entries stay in the map, and count against `max_entries`, until
/// they are looked up or evicted. Eviction removes the entry inserted the
/// longest time ago; reading an entry does not refresh its age.
pub struct BoundedCache<K, V> {
    store: Mutex<Store<K, V>>,
    ttl: Duration,
    max_entries: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache. `max_entries` below 1 is raised to 1.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            store: Mutex::new(Store { entries: HashMap::new(), next_seq: 0 }),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Create a cache from loaded settings.
    pub fn from_settings(settings: CacheSettings) -> Self {
        Self::new(settings.ttl(), settings.max_entries)
    }

    /// Look up `key`, deleting it instead if its TTL has passed.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut store = self.lock();
        let expired = self.is_expired(store.entries.get(key)?);

        if expired {
            store.entries.remove(key);
            return None;
        }

        store.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert or overwrite `key`.
    ///
    /// When the store already holds `max_entries` entries, the oldest one is
    /// evicted before inserting, even if `key` is already present.
    pub fn set(&self, key: K, value: V) {
        let mut store = self.lock();

        if store.entries.len() >= self.max_entries {
            evict_oldest(&mut store.entries);
        }

        let seq = store.next_seq;
        store.next_seq += 1;
        store
            .entries
            .insert(key, CacheEntry { value, created_at: Instant::now(), seq });
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        entry.created_at.elapsed() > self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Store<K, V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_oldest<K, V>(entries: &mut HashMap<K, CacheEntry<V>>)
where
    K: Eq + Hash + Clone,
{
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| (entry.created_at, entry.seq))
        .map(|(key, _)| key.clone());

    if let Some(key) = oldest {
        entries.remove(&key);
    }
}
