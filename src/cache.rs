// src/cache.rs

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// An entry is stale once `ttl` has fully elapsed since it was stored.
/// A `stored_at` in the future (clock moved back) counts as fresh.
pub fn is_expired(stored_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now.signed_duration_since(stored_at) >= ttl
}

struct Entry<V> {
    stored_at: DateTime<Utc>,
    value: V,
}

/// Query-keyed results with time-based expiry.
///
/// Each call takes the lock once, so a single get or insert is atomic per key.
/// Two callers missing on the same key may both compute; the later insert wins.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, dropping it if it has expired.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if !is_expired(entry.stored_at, now, self.ttl) => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: impl Into<String>, value: V, now: DateTime<Utc>) {
        self.lock().insert(
            key.into(),
            Entry {
                stored_at: now,
                value,
            },
        );
    }

    #[cfg(test)]
    pub fn remove(&self, key: &str) -> Option<V> {
        self.lock().remove(key).map(|e| e.value)
    }

    /// Drops every expired entry, returning how many went.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| !is_expired(e.stored_at, now, self.ttl));
        before - entries.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<V>>> {
        // A panic mid-insert cannot leave a half-written entry behind.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
