//! Cache Statistics Module
//!
//! Running counters and the derived statistics snapshot.

use serde::{Deserialize, Serialize};

// == Cache Metrics ==
/// Running counters maintained by the store.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    /// Successful reads
    pub hits: u64,
    /// Failed reads (absent or expired)
    pub misses: u64,
    /// Completed inserts and overwrites
    pub sets: u64,
    /// Explicit removals (delete, invalidation)
    pub deletes: u64,
    /// Entries removed under capacity pressure
    pub evictions: u64,
    /// Entries removed because they expired
    pub expirations: u64,
    /// Sum of live entry sizes
    pub total_size: usize,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new CacheMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Size Accounting ==
    pub fn add_size(&mut self, size: usize) {
        self.total_size += size;
    }

    pub fn sub_size(&mut self, size: usize) {
        self.total_size = self.total_size.saturating_sub(size);
    }
}

// == Cache Stats ==
/// Point-in-time statistics, stable and JSON-serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Current number of live entries
    pub entries: usize,
    pub total_size: usize,
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub max_size: usize,
    pub max_memory_size: usize,
    /// entries / max_size
    pub utilization: f64,
    /// total_size / max_memory_size
    pub memory_utilization: f64,
    pub strategy: String,
}

impl CacheStats {
    /// Derives a snapshot from the running counters and current bounds.
    pub fn from_metrics(
        metrics: &CacheMetrics,
        entries: usize,
        max_size: usize,
        max_memory_size: usize,
        strategy: &str,
    ) -> Self {
        let requests = metrics.hits + metrics.misses;
        let (hit_rate, miss_rate) = if requests == 0 {
            (0.0, 0.0)
        } else {
            (
                metrics.hits as f64 / requests as f64,
                metrics.misses as f64 / requests as f64,
            )
        };

        Self {
            hits: metrics.hits,
            misses: metrics.misses,
            sets: metrics.sets,
            deletes: metrics.deletes,
            evictions: metrics.evictions,
            expirations: metrics.expirations,
            entries,
            total_size: metrics.total_size,
            hit_rate,
            miss_rate,
            max_size,
            max_memory_size,
            utilization: ratio(entries, max_size),
            memory_utilization: ratio(metrics.total_size, max_memory_size),
            strategy: strategy.to_string(),
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
