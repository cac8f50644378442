//! Snapshot format for export and import.
//!
//! ```json
//! {
//!   "entries": [{"key": "...", "data": {...}, "ttl": 60000, "timestamp": 1700000000000}],
//!   "metadata": {"strategy": "hybrid", "timestamp": 1700000000000, "version": "1.0"}
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// One exported entry. `ttl` is the full lifetime in milliseconds and
/// `timestamp` the original creation time, so expiry survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub data: Value,
    pub ttl: u64,
    pub timestamp: u64,
}

impl SnapshotEntry {
    pub fn from_entry(entry: &CacheEntry) -> Self {
        Self {
            key: entry.key.clone(),
            data: entry.value.clone(),
            ttl: entry.ttl_ms(),
            timestamp: entry.created_at,
        }
    }

    pub fn expires_at(&self) -> u64 {
        self.timestamp.saturating_add(self.ttl)
    }

    pub fn into_entry(self) -> CacheEntry {
        CacheEntry::with_timestamp(self.key, self.data, self.timestamp, self.ttl)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub strategy: String,
    /// Export time (Unix milliseconds)
    pub timestamp: u64,
    pub version: String,
}

/// A full export of the live entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<SnapshotEntry>,
    pub metadata: SnapshotMetadata,
}

impl Snapshot {
    /// Parses a snapshot document leniently.
    ///
    /// The document must be an object with an `entries` array; individual
    /// entries that fail to parse are dropped and counted. Missing metadata
    /// is tolerated.
    pub fn parse_lenient(raw: &str) -> Result<(Self, usize)> {
        let doc: Value = serde_json::from_str(raw)?;
        let entries = doc
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| CacheError::InvalidSnapshot("missing 'entries' array".to_string()))?;

        let mut parsed = Vec::with_capacity(entries.len());
        let mut malformed = 0;
        for (index, raw_entry) in entries.iter().enumerate() {
            match serde_json::from_value::<SnapshotEntry>(raw_entry.clone()) {
                Ok(entry) => parsed.push(entry),
                Err(e) => {
                    warn!("Skipping malformed snapshot entry #{}: {}", index, e);
                    malformed += 1;
                }
            }
        }

        let metadata = doc
            .get("metadata")
            .cloned()
            .and_then(|m| serde_json::from_value(m).ok())
            .unwrap_or_else(|| SnapshotMetadata {
                strategy: String::new(),
                timestamp: 0,
                version: SNAPSHOT_VERSION.to_string(),
            });

        Ok((
            Self {
                entries: parsed,
                metadata,
            },
            malformed,
        ))
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Entries stored
    pub imported: usize,
    /// Entries already expired relative to import time
    pub expired: usize,
    /// Entries that could not be parsed
    pub malformed: usize,
    /// Entries refused by the store, such as values larger than the memory budget
    pub rejected: usize,
}
