//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::size::EntrySize;

// == Cache Entry ==
/// A single cache entry: the stored value, its absolute expiry, and the
/// byte size it was admitted with.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Estimated payload size recorded at admission time
    pub size_bytes: u64,
}

impl<V: EntrySize> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// The size estimate is taken once here and reused for the entry's
    /// whole lifetime, so the byte accounting stays consistent even if the
    /// value type's estimate is not stable.
    pub fn new(value: V, ttl: Duration) -> Self {
        let size_bytes = value.estimated_size() as u64;
        let expires_at = current_timestamp_ms() + ttl.as_millis() as u64;

        Self {
            value,
            expires_at,
            size_bytes,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to the expiration time, so a ttl of zero is
    /// expired immediately.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
