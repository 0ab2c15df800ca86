//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! byte-budget admission control.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, DEFAULT_MAX_BYTES, DEFAULT_MAX_MEMORY};
use crate::error::{CacheError, Result};
use crate::size::{parse_size, EntrySize};

// == Cache Store ==
/// Main cache storage with a soft memory budget and TTL support.
///
/// Generic over the stored value type; the `EntrySize` bound supplies the
/// size estimate used for admission accounting. The store itself is not
/// synchronized: concurrent callers share it behind `Arc<RwLock<_>>` and
/// hold the lock for each operation's full critical section.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum allowed total of entry sizes, in bytes
    max_bytes: u64,
    /// Human-readable form of the budget, informational only
    max_bytes_label: String,
    /// Sum of `size_bytes` over all resident entries
    current_bytes: u64,
}

impl<V: EntrySize> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty CacheStore with the default 100 MB budget.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_bytes: DEFAULT_MAX_BYTES,
            max_bytes_label: DEFAULT_MAX_MEMORY.to_string(),
            current_bytes: 0,
        }
    }

    /// Creates an empty CacheStore with a budget parsed from a size spec
    /// like "10MB".
    pub fn with_max_memory(spec: &str) -> Result<Self> {
        let mut store = Self::new();
        store.set_max_memory(spec)?;
        Ok(store)
    }

    // == Set Max Memory ==
    /// Sets the memory budget from a human-readable size spec.
    ///
    /// On a malformed spec the error propagates and the prior budget is
    /// left untouched. Lowering the budget below `current_bytes` does not
    /// evict resident entries; only future admissions see the new limit.
    pub fn set_max_memory(&mut self, spec: &str) -> Result<()> {
        let (max_bytes, label) = parse_size(spec)?;
        self.max_bytes = max_bytes;
        self.max_bytes_label = label;
        Ok(())
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// If admitting the value would push the byte total over the budget,
    /// the set is rejected and the store is left exactly as it was. The
    /// check runs against the full current total, so replacing an existing
    /// key can be rejected even when the net size would fit.
    ///
    /// On success any previous entry for the key is removed first, so a key
    /// is never double-counted.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(value, ttl);

        if self.current_bytes + entry.size_bytes > self.max_bytes {
            self.stats.record_rejection();
            debug!(
                "rejecting '{}': {} bytes does not fit ({} of {} bytes in use)",
                key, entry.size_bytes, self.current_bytes, self.max_bytes
            );
            return Err(CacheError::BudgetExceeded(format!(
                "value of {} bytes does not fit: {} of {} bytes in use",
                entry.size_bytes, self.current_bytes, self.max_bytes
            )));
        }

        self.remove_entry(&key);
        self.insert_entry(key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// An entry whose TTL has elapsed is removed here as a side effect and
    /// reported as not found, whether or not the sweeper has seen it yet.
    pub fn get(&mut self, key: &str) -> Result<V>
    where
        V: Clone,
    {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                // Lazy expiry: the read path reclaims the entry itself
                self.remove_entry(key);
                self.stats.record_expired_removals(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return Err(CacheError::NotFound(key.to_string()));
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            Ok(value)
        } else {
            self.stats.record_miss();
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    // == Delete ==
    /// Removes `key` if present, adjusting the byte total.
    ///
    /// Returns whether a removal occurred. Deleting an absent key is a
    /// no-op that returns false.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key);
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Exists ==
    /// Reports whether `key` holds a live entry.
    ///
    /// An expired-but-not-yet-swept entry reports false, matching what a
    /// subsequent get would find. The entry itself is reclaimed by get or
    /// the sweeper, so this never mutates the store.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.get(key).map_or(false, |e| !e.is_expired())
    }

    // == Flush ==
    /// Removes every entry and resets the byte total to zero.
    pub fn flush(&mut self) {
        self.entries = HashMap::new();
        self.current_bytes = 0;
        self.stats.set_total_entries(0);
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// The caller holds the write lock for this entire pass, so the scan
    /// and the deletes form one critical section.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.stats.record_expired_removals(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Accessors ==
    /// Returns the current number of entries, counting not-yet-swept
    /// expired entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the byte total of all resident entries.
    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }

    /// Returns the configured memory budget in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Returns the human-readable form of the budget, e.g. "100MB".
    pub fn max_memory_label(&self) -> &str {
        &self.max_bytes_label
    }

    // == Internal Helpers ==
    /// Removes an entry and subtracts its size from the byte total.
    fn remove_entry(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.remove(key) {
            self.current_bytes -= entry.size_bytes;
            true
        } else {
            false
        }
    }

    /// Inserts an entry and adds its size to the byte total.
    fn insert_entry(&mut self, key: String, entry: CacheEntry<V>) {
        self.current_bytes += entry.size_bytes;
        self.entries.insert(key, entry);
    }
}

impl<V: EntrySize> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
