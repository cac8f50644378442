//! Cache Module
//!
//! Bounded in-memory response caching with TTL expiry, pluggable eviction
//! strategies, memory accounting, pattern invalidation and snapshots.

mod entry;
pub mod events;
pub mod factory;
mod key;
mod response_cache;
pub mod snapshot;
mod stats;
mod store;
pub mod strategy;


// Re-export public types
pub use entry::{current_timestamp_ms, value_size, CacheEntry};
pub use events::CacheEvent;
pub use factory::{create_cache, create_cache_for, create_cache_with, CacheKind};
pub use key::{canonical_json, CacheKeyGenerator};
pub use response_cache::{AiResponseCache, BatchGet, WarmupEntry};
pub use snapshot::{ImportSummary, Snapshot, SnapshotEntry, SnapshotMetadata};
pub use stats::{CacheMetrics, CacheStats};
pub use store::CacheStore;
pub use strategy::{EvictionStrategy, StrategyKind};
