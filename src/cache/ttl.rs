//! Time-bounded map of shared values

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::clock::Clock;

struct CacheEntry<V> {
    value: Arc<V>,
    computed_at: DateTime<Utc>,
}

/// Entries are served until `ttl` has elapsed since insertion, then ignored
/// and overwritten by the next insert. Reads take the read lock, inserts and
/// removals the write lock; nothing is computed while a lock is held.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, computed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // A clock that moved backwards counts as no time elapsed
        let elapsed = (now - computed_at).to_std().unwrap_or(Duration::ZERO);
        elapsed < self.ttl
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry.computed_at, now))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Store `value`, replacing whatever was there, and return the shared handle
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            value: Arc::clone(&value),
            computed_at: self.clock.now(),
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, entry);
        value
    }

    pub fn invalidate(&self, key: &K) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key).is_some()
    }

    /// Drop every entry whose key fails `keep`; returns how many were dropped
    pub fn retain(&self, mut keep: impl FnMut(&K) -> bool) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|key, _| keep(key));
        before - entries.len()
    }

    /// Drop expired entries; returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry.computed_at, now));
        before - entries.len()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// Stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
