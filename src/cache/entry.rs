//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with size, expiry and
//! access bookkeeping.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A cached payload plus the metadata eviction strategies rank it by.
///
/// `value` is never mutated after insertion; only successful reads touch the
/// access fields.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Canonical key
    pub key: String,
    /// The stored payload
    pub value: Value,
    /// Byte cost of `value` (compact JSON length)
    pub size: usize,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Last successful read (Unix milliseconds), creation time until then
    pub last_accessed_at: u64,
    /// Number of successful reads
    pub access_count: u64,
    /// Logical insertion order within the owning store
    pub insert_seq: u64,
    /// Logical recency within the owning store
    pub access_seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    ///
    /// # Arguments
    /// * `key` - The canonical key
    /// * `value` - The payload to store
    /// * `ttl_ms` - Lifetime in milliseconds
    pub fn new(key: String, value: Value, ttl_ms: u64) -> Self {
        Self::with_timestamp(key, value, current_timestamp_ms(), ttl_ms)
    }

    /// Creates an entry with an explicit creation time, as restored from a snapshot.
    pub fn with_timestamp(key: String, value: Value, created_at: u64, ttl_ms: u64) -> Self {
        let size = value_size(&value);
        Self {
            key,
            value,
            size,
            created_at,
            expires_at: created_at.saturating_add(ttl_ms),
            last_accessed_at: created_at,
            access_count: 0,
            insert_seq: 0,
            access_seq: 0,
        }
    }

    // == Expiry ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Full lifetime in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.expires_at.saturating_sub(self.created_at)
    }

    /// Remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    /// Milliseconds since the last successful read (or insertion).
    pub fn idle_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_accessed_at)
    }

    // == Access Bookkeeping ==
    /// Records a successful read.
    pub fn record_access(&mut self, now: u64, seq: u64) {
        self.last_accessed_at = now;
        self.access_count += 1;
        self.access_seq = seq;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Byte cost of a payload: the length of its compact JSON serialization.
pub fn value_size(value: &Value) -> usize {
    serde_json::to_vec(value).map(|bytes| bytes.len()).unwrap_or(0)
}
