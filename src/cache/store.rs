//! Cache Store Module
//!
//! Response cache keyed by request, with a single fixed TTL. There is no
//! eviction: once `max_entries` live entries are held, new keys are turned
//! away until expired ones are purged.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, MAX_BODY_SIZE};
use crate::error::CacheError;

// == Response Cache ==
#[derive(Debug)]
pub struct ResponseCache {
    /// Cached bodies keyed by request line
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of every entry
    ttl: Duration,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a new ResponseCache with specified capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Insert ==
    /// Stores a response body under `key`.
    ///
    /// Overwriting an existing key restarts its TTL. A new key is refused
    /// when the cache is full, even if some entries are already expired but
    /// not yet purged.
    pub fn insert(&mut self, key: String, body: String) -> Result<(), CacheError> {
        if body.len() > MAX_BODY_SIZE {
            self.stats.record_rejection();
            return Err(CacheError::TooLarge(body.len()));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.stats.record_rejection();
            return Err(CacheError::CacheFull(self.max_entries));
        }

        self.entries.insert(key, CacheEntry::new(body, self.ttl));
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Get ==
    /// Returns a copy of the entry if present and not expired.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let entry = entry.clone();
                self.stats.record_hit();
                Some(entry)
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_expired(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
