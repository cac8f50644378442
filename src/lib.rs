//! AI Response Cache - A bounded multi-strategy cache for expensive computations
//!
//! Memoizes pairing recommendations, procurement analyses and similarity
//! lookups under canonical request keys, with TTL expiry, TTL/LRU/LFU/Hybrid
//! eviction, memory accounting, pattern invalidation and snapshots.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{create_cache, AiResponseCache, CacheKind, StrategyKind};
pub use config::CacheConfig;
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
