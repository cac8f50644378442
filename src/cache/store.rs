//! Cache Store Module
//!
//! Synchronous single-owner core: the key→entry map, aggregate accounting,
//! strategy-driven eviction and expiry.

use std::collections::HashMap;

use regex::Regex;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::cache::events::{CacheEvent, EventBus};
use crate::cache::snapshot::{
    ImportSummary, Snapshot, SnapshotEntry, SnapshotMetadata, SNAPSHOT_VERSION,
};
use crate::cache::strategy::{AggregateState, EvictionStrategy};
use crate::cache::{current_timestamp_ms, CacheEntry, CacheMetrics, CacheStats, StrategyKind};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded entry storage with pluggable eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Active eviction policy
    strategy: Box<dyn EvictionStrategy>,
    strategy_kind: StrategyKind,
    /// Running counters and size accounting
    metrics: CacheMetrics,
    /// Lifecycle notifications
    events: EventBus,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Maximum aggregate entry size in bytes
    max_memory_size: usize,
    /// Default TTL in milliseconds
    default_ttl: u64,
    /// Logical clock stamping inserts and reads
    clock: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store from configuration. Invalid values fall back to defaults.
    pub fn new(config: &CacheConfig) -> Self {
        let config = config.clone().normalized();
        Self {
            entries: HashMap::new(),
            strategy: config.strategy.build(),
            strategy_kind: config.strategy,
            metrics: CacheMetrics::new(),
            events: EventBus::new(config.event_capacity),
            max_size: config.max_size,
            max_memory_size: config.max_memory_size,
            default_ttl: config.default_ttl,
            clock: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and counted as misses. Only a hit touches
    /// the entry's access bookkeeping.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = current_timestamp_ms();

        if self.entries.get(key).is_some_and(|e| e.is_expired_at(now)) {
            self.expire(key);
            self.metrics.record_miss();
            self.events.emit(CacheEvent::Miss { key: key.to_string() });
            return None;
        }

        let seq = self.tick();
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.record_access(now, seq);
                let value = entry.value.clone();
                self.metrics.record_hit();
                self.events.emit(CacheEvent::Hit { key: key.to_string() });
                Some(value)
            }
            None => {
                self.metrics.record_miss();
                self.events.emit(CacheEvent::Miss { key: key.to_string() });
                None
            }
        }
    }

    // == Has ==
    /// Expiry-aware existence check. Does not count as a hit or miss.
    pub fn has(&mut self, key: &str) -> bool {
        let now = current_timestamp_ms();
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                self.expire(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any entry under the same key.
    ///
    /// A `ttl` of `None` or `0` uses the default TTL. If the cache ends up
    /// over either bound, entries are evicted by strategy priority until both
    /// bounds hold again. A value larger than the whole memory budget is
    /// rejected and any existing entry is left untouched.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<u64>) -> Result<()> {
        let ttl = ttl.filter(|t| *t > 0).unwrap_or(self.default_ttl);
        self.insert_entry(CacheEntry::new(key, value, ttl))
    }

    fn insert_entry(&mut self, mut entry: CacheEntry) -> Result<()> {
        if entry.size > self.max_memory_size {
            warn!(
                "Rejecting entry '{}': {} bytes exceeds memory limit of {} bytes",
                entry.key, entry.size, self.max_memory_size
            );
            let err = CacheError::EntryTooLarge {
                key: entry.key.clone(),
                size: entry.size,
                max: self.max_memory_size,
            };
            self.events.emit(CacheEvent::Error {
                key: entry.key,
                message: err.to_string(),
            });
            return Err(err);
        }

        if let Some(previous) = self.entries.remove(&entry.key) {
            self.metrics.sub_size(previous.size);
        }

        let seq = self.tick();
        entry.insert_seq = seq;
        entry.access_seq = seq;

        let key = entry.key.clone();
        let size = entry.size;
        self.metrics.add_size(size);
        self.entries.insert(key.clone(), entry);
        self.metrics.record_set();
        self.events.emit(CacheEvent::Set {
            key: key.clone(),
            size,
        });
        debug!("Stored '{}' ({} bytes)", key, size);

        self.enforce_bounds(&key);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.remove_entry(key).is_some() {
            self.metrics.record_delete();
            self.events.emit(CacheEvent::Delete { key: key.to_string() });
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes every entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.metrics.total_size = 0;
        self.events.emit(CacheEvent::Clear { removed });
        removed
    }

    // == Cleanup Expired ==
    /// Removes every entry the active strategy flags for proactive eviction.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let state = self.aggregate_state(current_timestamp_ms());
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| self.strategy.should_evict(entry, &state))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.expire(&key);
        }

        self.events.emit(CacheEvent::Cleanup { removed: count });
        count
    }

    // == Pattern Invalidation ==
    /// Deletes every entry whose key matches `pattern`.
    ///
    /// A malformed pattern is reported before anything is touched.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern)?;
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();

        let count = matching.len();
        for key in matching {
            self.delete(&key);
        }
        debug!("Invalidated {} entries matching '{}'", count, pattern);
        Ok(count)
    }

    // == Export ==
    /// Snapshot of all live entries in insertion order.
    pub fn export(&self) -> Snapshot {
        let now = current_timestamp_ms();
        let mut live: Vec<&CacheEntry> = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .collect();
        live.sort_by_key(|entry| entry.insert_seq);

        Snapshot {
            entries: live.into_iter().map(SnapshotEntry::from_entry).collect(),
            metadata: SnapshotMetadata {
                strategy: self.strategy.name().to_string(),
                timestamp: now,
                version: SNAPSHOT_VERSION.to_string(),
            },
        }
    }

    // == Import ==
    /// Restores entries from a snapshot, keeping their original creation time
    /// and lifetime.
    ///
    /// Entries already expired at import time are skipped. Existing entries
    /// with the same key are overwritten. Bounds are enforced as for `set`.
    pub fn import(&mut self, snapshot: Snapshot) -> ImportSummary {
        let now = current_timestamp_ms();
        let mut summary = ImportSummary::default();

        for item in snapshot.entries {
            if item.expires_at() <= now {
                summary.expired += 1;
                continue;
            }
            match self.insert_entry(item.into_entry()) {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    debug!("Snapshot entry rejected: {}", e);
                    summary.rejected += 1;
                }
            }
        }

        summary
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats::from_metrics(
            &self.metrics,
            self.entries.len(),
            self.max_size,
            self.max_memory_size,
            self.strategy.name(),
        )
    }

    // == Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of live entry sizes in bytes.
    pub fn total_size(&self) -> usize {
        self.metrics.total_size
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy_kind
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    // == Internals ==
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn aggregate_state(&self, now: u64) -> AggregateState {
        AggregateState {
            now,
            clock: self.clock,
            entry_count: self.entries.len(),
            total_size: self.metrics.total_size,
            max_size: self.max_size,
            max_memory_size: self.max_memory_size,
            default_ttl: self.default_ttl,
        }
    }

    fn over_bounds(&self) -> bool {
        self.entries.len() > self.max_size || self.metrics.total_size > self.max_memory_size
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.metrics.sub_size(entry.size);
        Some(entry)
    }

    fn expire(&mut self, key: &str) {
        if self.remove_entry(key).is_some() {
            self.metrics.record_expiration();
            self.events.emit(CacheEvent::Expired { key: key.to_string() });
        }
    }

    /// Evicts until both bounds hold. `protected` (the key just written) is
    /// only chosen when nothing else is left.
    fn enforce_bounds(&mut self, protected: &str) {
        if !self.over_bounds() {
            return;
        }

        // Expired entries go first, whatever the policy
        let state = self.aggregate_state(current_timestamp_ms());
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, entry)| {
                key.as_str() != protected && self.strategy.should_evict(entry, &state)
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            self.expire(&key);
        }

        while self.over_bounds() {
            let Some(victim) = self.select_victim(protected) else {
                break;
            };
            if let Some(entry) = self.remove_entry(&victim) {
                self.metrics.record_eviction();
                debug!(
                    "Evicted '{}' ({} bytes) under {} policy",
                    victim,
                    entry.size,
                    self.strategy.name()
                );
                self.events.emit(CacheEvent::Eviction {
                    key: victim,
                    size: entry.size,
                });
            }
        }
    }

    /// Highest-priority entry; ties go to the oldest insertion.
    fn select_victim(&self, protected: &str) -> Option<String> {
        let state = self.aggregate_state(current_timestamp_ms());
        let only_protected = self.entries.len() == 1 && self.entries.contains_key(protected);

        let mut best: Option<(&CacheEntry, f64)> = None;
        for (key, entry) in &self.entries {
            if key == protected && !only_protected {
                continue;
            }
            let priority = self.strategy.eviction_priority(entry, &state);
            let better = match best {
                None => true,
                Some((current, current_priority)) => {
                    priority > current_priority
                        || (priority == current_priority && entry.insert_seq < current.insert_seq)
                }
            };
            if better {
                best = Some((entry, priority));
            }
        }

        best.map(|(entry, _)| entry.key.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    fn store_with(max_size: usize, strategy: StrategyKind) -> CacheStore {
        CacheStore::new(
            &CacheConfig::default()
                .with_max_size(max_size)
                .with_strategy(strategy)
                .with_default_ttl(300_000),
        )
    }

    fn fill(store: &mut CacheStore, keys: &[&str]) {
        for key in keys {
            store.set(key.to_string(), json!(format!("value_{}", key)), None).unwrap();
        }
    }

    #[test]
    fn test_store_new() {
        let store = store_with(100, StrategyKind::Hybrid);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.total_size(), 0);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        let value = json!({"wines": ["Chablis", "Sancerre"], "score": 0.93});

        store.set("key1".to_string(), value.clone(), None).unwrap();

        assert_eq!(store.get("key1"), Some(value));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        fill(&mut store, &["key1"]);

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.total_size(), 0);
        assert_eq!(store.stats().deletes, 1);
    }

    #[test]
    fn test_store_overwrite_replaces_size() {
        let mut store = store_with(100, StrategyKind::Hybrid);

        store.set("key1".to_string(), json!("short"), None).unwrap();
        store.set("key1".to_string(), json!("a much longer value"), None).unwrap();

        assert_eq!(store.get("key1"), Some(json!("a much longer value")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_size(), r#""a much longer value""#.len());
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        store.set("key1".to_string(), json!("value1"), Some(100)).unwrap();

        assert!(store.get("key1").is_some());
        sleep(Duration::from_millis(150));

        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty(), "Expired entry is removed on access");
        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_store_zero_ttl_uses_default() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        store.set("key1".to_string(), json!(1), Some(0)).unwrap();
        assert_eq!(store.get("key1"), Some(json!(1)));
    }

    #[test]
    fn test_store_has_is_expiry_aware() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        store.set("short".to_string(), json!(1), Some(50)).unwrap();
        store.set("long".to_string(), json!(2), None).unwrap();

        assert!(store.has("short"));
        sleep(Duration::from_millis(80));
        assert!(!store.has("short"));
        assert!(store.has("long"));
        assert_eq!(store.len(), 1);

        let stats = store.stats();
        assert_eq!(stats.hits + stats.misses, 0, "has() is not a lookup");
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store_with(3, StrategyKind::Lru);
        fill(&mut store, &["key1", "key2", "key3"]);

        // Cache is full, adding key4 should evict key1 (oldest)
        fill(&mut store, &["key4"]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store_with(3, StrategyKind::Lru);
        fill(&mut store, &["key1", "key2", "key3"]);

        // Access key1 to make it most recently used
        store.get("key1").unwrap();

        // Adding key4 should evict key2 (now oldest)
        fill(&mut store, &["key4"]);

        assert!(store.get("key1").is_some());
        assert_eq!(store.get("key2"), None);
    }

    #[test]
    fn test_store_lfu_eviction() {
        let mut store = store_with(3, StrategyKind::Lfu);
        fill(&mut store, &["a", "b", "c"]);
        store.get("a");
        store.get("a");
        store.get("c");

        fill(&mut store, &["d"]);

        assert_eq!(store.len(), 3);
        assert!(!store.has("b"), "Never-read entry goes first");
        assert!(store.has("a"));
        assert!(store.has("c"));
        assert!(store.has("d"), "The entry being inserted survives");
    }

    #[test]
    fn test_store_ttl_strategy_eviction() {
        let now = current_timestamp_ms();
        let mut store = store_with(3, StrategyKind::Ttl);
        let aged = |key: &str, age: u64, ttl: u64| SnapshotEntry {
            key: key.to_string(),
            data: json!(key),
            ttl,
            timestamp: now - age,
        };
        // Lifetime used: half_spent 50%, fresh_short ~10%, quarter 25%
        let summary = store.import(Snapshot {
            entries: vec![
                aged("half_spent", 50_000, 100_000),
                aged("fresh_short", 100, 1_000),
                aged("quarter", 25_000, 100_000),
            ],
            metadata: SnapshotMetadata {
                strategy: "ttl".to_string(),
                timestamp: now,
                version: SNAPSHOT_VERSION.to_string(),
            },
        });
        assert_eq!(summary.imported, 3);

        store.set("new".to_string(), json!(4), None).unwrap();

        assert!(!store.has("half_spent"));
        assert!(store.has("fresh_short"));
        assert!(store.has("quarter"));
        assert!(store.has("new"));
    }

    #[test]
    fn test_store_memory_enforcement() {
        let mut store = CacheStore::new(
            &CacheConfig::default()
                .with_max_memory_size(100)
                .with_strategy(StrategyKind::Lru),
        );
        let value = json!("x".repeat(28)); // 30 bytes serialized

        for i in 0..4 {
            store.set(format!("k{}", i), value.clone(), None).unwrap();
            assert!(store.total_size() <= 100);
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.total_size(), 90);
        assert!(!store.has("k0"));
    }

    #[test]
    fn test_store_rejects_oversized_entry() {
        let mut store = CacheStore::new(&CacheConfig::default().with_max_memory_size(10));
        store.set("keep".to_string(), json!(1), None).unwrap();

        let result = store.set("huge".to_string(), json!("y".repeat(64)), None);

        assert!(matches!(result, Err(CacheError::EntryTooLarge { .. })));
        assert!(store.has("keep"));
        assert!(!store.has("huge"));
    }

    #[test]
    fn test_store_expired_entries_evicted_before_live_ones() {
        let mut store = store_with(2, StrategyKind::Lfu);
        store.set("stale".to_string(), json!(1), Some(30)).unwrap();
        store.set("fresh".to_string(), json!(2), None).unwrap();
        store.get("stale");
        store.get("stale");
        sleep(Duration::from_millis(60));

        store.set("new".to_string(), json!(3), None).unwrap();

        assert!(store.has("fresh"));
        assert!(store.has("new"));
        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        fill(&mut store, &["key1"]);
        store.get("key1").unwrap(); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.max_size, 100);
        assert_eq!(stats.strategy, "hybrid");
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        store.set("key1".to_string(), json!("value1"), Some(50)).unwrap();
        store.set("key2".to_string(), json!("value2"), Some(10_000)).unwrap();

        sleep(Duration::from_millis(80));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_clear() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        fill(&mut store, &["a", "b", "c"]);

        assert_eq!(store.clear(), 3);
        assert!(store.is_empty());
        assert_eq!(store.total_size(), 0);
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn test_store_invalidate_pattern() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        fill(
            &mut store,
            &["pairing_cache:abc", "pairing_cache:def", "other_cache:ghi"],
        );

        let removed = store.invalidate_pattern("pairing_cache:.*").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.has("other_cache:ghi"));
    }

    #[test]
    fn test_store_invalidate_malformed_pattern() {
        let mut store = store_with(100, StrategyKind::Hybrid);
        fill(&mut store, &["a", "b"]);

        let result = store.invalidate_pattern("([unclosed");

        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_export_import_roundtrip() {
        let mut store = store_with(100, StrategyKind::Lru);
        store.set("a".to_string(), json!({"n": 1}), Some(60_000)).unwrap();
        store.set("b".to_string(), json!([1, 2, 3]), None).unwrap();

        let snapshot = store.export();
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].key, "a");
        assert_eq!(snapshot.entries[0].ttl, 60_000);
        assert_eq!(snapshot.metadata.strategy, "lru");
        assert_eq!(snapshot.metadata.version, SNAPSHOT_VERSION);

        let mut restored = store_with(100, StrategyKind::Lru);
        let summary = restored.import(snapshot.clone());

        assert_eq!(summary.imported, 2);
        assert_eq!(restored.len(), store.len());
        assert_eq!(restored.get("a"), Some(json!({"n": 1})));
        assert_eq!(restored.get("b"), Some(json!([1, 2, 3])));
        assert_eq!(restored.export().entries, snapshot.entries);
    }

    #[test]
    fn test_store_import_skips_expired() {
        let now = current_timestamp_ms();
        let snapshot = Snapshot {
            entries: vec![
                SnapshotEntry {
                    key: "old".to_string(),
                    data: json!(1),
                    ttl: 1_000,
                    timestamp: now - 5_000,
                },
                SnapshotEntry {
                    key: "live".to_string(),
                    data: json!(2),
                    ttl: 60_000,
                    timestamp: now - 5_000,
                },
            ],
            metadata: SnapshotMetadata {
                strategy: "hybrid".to_string(),
                timestamp: now,
                version: SNAPSHOT_VERSION.to_string(),
            },
        };

        let mut store = store_with(100, StrategyKind::Hybrid);
        store.set("live".to_string(), json!("stale local"), None).unwrap();
        let summary = store.import(snapshot);

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.expired, 1);
        assert!(!store.has("old"));
        assert_eq!(store.get("live"), Some(json!(2)), "Import overwrites");
    }

    #[test]
    fn test_store_emits_eviction_events() {
        let mut store = store_with(1, StrategyKind::Lru);
        let mut rx = store.subscribe();

        fill(&mut store, &["a", "b"]);

        let events: Vec<CacheEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(events.contains(&CacheEvent::Eviction {
            key: "a".to_string(),
            size: r#""value_a""#.len(),
        }));
        assert_eq!(
            events.iter().filter(|e| matches!(e, CacheEvent::Set { .. })).count(),
            2
        );
    }

    #[test]
    fn test_store_invalid_config_falls_back() {
        let store = CacheStore::new(&CacheConfig::default().with_max_size(0));
        assert_eq!(store.stats().max_size, crate::config::DEFAULT_MAX_SIZE);
    }
}
