//! Eviction Strategy Module
//!
//! Pluggable policies deciding which entries leave the cache first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Aggregate State ==
/// Cache-wide figures a strategy may weigh an entry against.
#[derive(Debug, Clone, Copy)]
pub struct AggregateState {
    /// Current Unix time in milliseconds
    pub now: u64,
    /// Current value of the store's logical access clock
    pub clock: u64,
    /// Number of live entries
    pub entry_count: usize,
    /// Sum of live entry sizes
    pub total_size: usize,
    /// Entry count ceiling
    pub max_size: usize,
    /// Byte ceiling
    pub max_memory_size: usize,
    /// Default TTL in milliseconds
    pub default_ttl: u64,
}

// == Strategy Trait ==
/// An eviction policy.
pub trait EvictionStrategy: Send + Sync + fmt::Debug {
    /// Policy name as used in configuration and snapshots.
    fn name(&self) -> &'static str;

    /// Whether the entry should be removed regardless of capacity pressure.
    ///
    /// Expired entries never survive, whatever the policy.
    fn should_evict(&self, entry: &CacheEntry, state: &AggregateState) -> bool {
        entry.is_expired_at(state.now)
    }

    /// Eviction rank; the highest value is evicted first.
    fn eviction_priority(&self, entry: &CacheEntry, state: &AggregateState) -> f64;
}

/// Elapsed fraction of an entry's lifetime. Exceeds 1.0 once expired.
fn elapsed_ttl_fraction(entry: &CacheEntry, now: u64) -> f64 {
    let ttl = entry.ttl_ms().max(1) as f64;
    now.saturating_sub(entry.created_at) as f64 / ttl
}

fn inverse_frequency(entry: &CacheEntry) -> f64 {
    1.0 / (1.0 + entry.access_count as f64)
}

/// Evicts whatever has used up the largest share of its lifetime.
///
/// Priority is `(now - created_at) / ttl`, reaching 1.0 at expiry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtlStrategy;

impl EvictionStrategy for TtlStrategy {
    fn name(&self) -> &'static str {
        "ttl"
    }

    fn eviction_priority(&self, entry: &CacheEntry, state: &AggregateState) -> f64 {
        elapsed_ttl_fraction(entry, state.now)
    }
}

/// Evicts the least recently read entry.
///
/// Recency is measured on the store's logical clock so that two reads in
/// the same millisecond still order correctly.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruStrategy;

impl EvictionStrategy for LruStrategy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn eviction_priority(&self, entry: &CacheEntry, state: &AggregateState) -> f64 {
        state.clock.saturating_sub(entry.access_seq) as f64
    }
}

/// Evicts the least frequently read entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuStrategy;

impl EvictionStrategy for LfuStrategy {
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn eviction_priority(&self, entry: &CacheEntry, _state: &AggregateState) -> f64 {
        inverse_frequency(entry)
    }
}

/// Weighted blend of expiry proximity, idle time and rarity.
#[derive(Debug, Clone, Copy)]
pub struct HybridStrategy {
    pub ttl_weight: f64,
    pub idle_weight: f64,
    pub frequency_weight: f64,
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self {
            ttl_weight: 0.4,
            idle_weight: 0.3,
            frequency_weight: 0.3,
        }
    }
}

impl EvictionStrategy for HybridStrategy {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn eviction_priority(&self, entry: &CacheEntry, state: &AggregateState) -> f64 {
        let ttl_score = elapsed_ttl_fraction(entry, state.now).min(1.0);
        let idle_score =
            (entry.idle_ms(state.now) as f64 / state.default_ttl.max(1) as f64).min(1.0);

        self.ttl_weight * ttl_score
            + self.idle_weight * idle_score
            + self.frequency_weight * inverse_frequency(entry)
    }
}

// == Strategy Kind ==
/// Configuration-level name of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Ttl,
    Lru,
    Lfu,
    #[default]
    Hybrid,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Ttl => "ttl",
            StrategyKind::Lru => "lru",
            StrategyKind::Lfu => "lfu",
            StrategyKind::Hybrid => "hybrid",
        }
    }

    /// Instantiates the policy.
    pub fn build(&self) -> Box<dyn EvictionStrategy> {
        match self {
            StrategyKind::Ttl => Box::new(TtlStrategy),
            StrategyKind::Lru => Box::new(LruStrategy),
            StrategyKind::Lfu => Box::new(LfuStrategy),
            StrategyKind::Hybrid => Box::new(HybridStrategy::default()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ttl" => Ok(StrategyKind::Ttl),
            "lru" => Ok(StrategyKind::Lru),
            "lfu" => Ok(StrategyKind::Lfu),
            "hybrid" => Ok(StrategyKind::Hybrid),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown eviction strategy '{}'",
                other
            ))),
        }
    }
}
