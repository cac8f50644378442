//! Cache factory
//!
//! Preset configurations per workload and an explicit constructor; callers
//! own and pass the instance around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{AiResponseCache, StrategyKind};
use crate::config::CacheConfig;
use crate::error::CacheError;

const MIB: usize = 1024 * 1024;
const MINUTE_MS: u64 = 60 * 1000;

/// Workload a cache instance is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    /// Wine pairing recommendations
    Pairing,
    /// Procurement analyses; inputs change often, so shorter lived
    Procurement,
    /// Similarity lookups; stable and heavily reused
    Similarity,
    #[default]
    General,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Pairing => "pairing",
            CacheKind::Procurement => "procurement",
            CacheKind::Similarity => "similarity",
            CacheKind::General => "general",
        }
    }

    /// Preset configuration for this workload.
    pub fn config(&self) -> CacheConfig {
        let base = CacheConfig::default();
        match self {
            CacheKind::Pairing => base
                .with_key_prefix("pairing_cache")
                .with_max_size(500)
                .with_max_memory_size(20 * MIB)
                .with_default_ttl(60 * MINUTE_MS)
                .with_strategy(StrategyKind::Hybrid),
            CacheKind::Procurement => base
                .with_key_prefix("procurement_cache")
                .with_max_size(200)
                .with_max_memory_size(20 * MIB)
                .with_default_ttl(30 * MINUTE_MS)
                .with_strategy(StrategyKind::Lru),
            CacheKind::Similarity => base
                .with_key_prefix("similarity_cache")
                .with_max_size(2000)
                .with_max_memory_size(50 * MIB)
                .with_default_ttl(24 * 60 * MINUTE_MS)
                .with_strategy(StrategyKind::Lfu),
            CacheKind::General => base,
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pairing" => Ok(CacheKind::Pairing),
            "procurement" => Ok(CacheKind::Procurement),
            "similarity" => Ok(CacheKind::Similarity),
            "general" | "default" => Ok(CacheKind::General),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown cache type '{}'",
                other
            ))),
        }
    }
}

/// Creates an owned cache with the preset for `kind`.
///
/// The cleanup scheduler is started when called inside a tokio runtime.
pub fn create_cache(kind: CacheKind) -> AiResponseCache {
    create_cache_with(kind.config())
}

/// Like [`create_cache`], keyed by a type string. Unknown types get the
/// general preset.
pub fn create_cache_for(type_name: &str) -> AiResponseCache {
    let kind = type_name.parse().unwrap_or_else(|e| {
        warn!("{}, using the general preset", e);
        CacheKind::General
    });
    create_cache(kind)
}

/// Creates an owned cache from an explicit configuration.
pub fn create_cache_with(config: CacheConfig) -> AiResponseCache {
    let mut cache = AiResponseCache::new(config);
    if tokio::runtime::Handle::try_current().is_ok() {
        cache.start_cleanup();
    }
    cache
}
