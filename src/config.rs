//! Configuration Module
//!
//! Cache sizing, expiry and strategy settings, loadable from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::StrategyKind;

// == Defaults ==
/// Default entry count ceiling
pub const DEFAULT_MAX_SIZE: usize = 1000;
/// Default aggregate byte ceiling (50 MiB)
pub const DEFAULT_MAX_MEMORY_SIZE: usize = 50 * 1024 * 1024;
/// Default TTL in milliseconds (1 hour)
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;
/// Default key namespace
pub const DEFAULT_KEY_PREFIX: &str = "ai_cache";
/// Default broadcast buffer for lifecycle events
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

const MIN_CLEANUP_INTERVAL_MS: u64 = 10;
const MAX_CLEANUP_INTERVAL_MS: u64 = 60_000;

/// Cache configuration parameters.
///
/// All values are optional in spirit: zero or empty values are replaced by
/// the defaults in [`CacheConfig::normalized`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub max_size: usize,
    /// Maximum aggregate entry size in bytes
    pub max_memory_size: usize,
    /// TTL in milliseconds applied when `set` omits one
    pub default_ttl: u64,
    /// Eviction strategy used under capacity pressure
    pub strategy: StrategyKind,
    /// Namespace prefix for generated keys
    pub key_prefix: String,
    /// Cleanup sweep interval in milliseconds, derived from `default_ttl` when unset
    pub cleanup_interval: Option<u64>,
    /// Capacity of the lifecycle event channel
    pub event_capacity: usize,
    /// Admin HTTP server port (binary only)
    pub server_port: u16,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// `CACHE_KIND` picks a preset (see [`crate::cache::CacheKind`]); the
    /// remaining variables override individual fields of that preset.
    ///
    /// # Environment Variables
    /// - `CACHE_KIND` - Preset name (default: general)
    /// - `CACHE_MAX_SIZE` - Maximum entries
    /// - `CACHE_MAX_MEMORY` - Maximum aggregate bytes
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds
    /// - `CACHE_STRATEGY` - ttl | lru | lfu | hybrid
    /// - `CACHE_KEY_PREFIX` - Key namespace
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Cleanup frequency in milliseconds
    /// - `SERVER_PORT` - Admin HTTP port (default: 3000)
    pub fn from_env() -> Self {
        let kind = env_parse::<crate::cache::CacheKind>("CACHE_KIND").unwrap_or_default();
        let mut config = kind.config();

        if let Some(v) = env_parse("CACHE_MAX_SIZE") {
            config.max_size = v;
        }
        if let Some(v) = env_parse("CACHE_MAX_MEMORY") {
            config.max_memory_size = v;
        }
        if let Some(v) = env_parse("CACHE_DEFAULT_TTL_MS") {
            config.default_ttl = v;
        }
        if let Some(v) = env_parse("CACHE_STRATEGY") {
            config.strategy = v;
        }
        if let Ok(v) = env::var("CACHE_KEY_PREFIX") {
            config.key_prefix = v;
        }
        if let Some(v) = env_parse("CACHE_CLEANUP_INTERVAL_MS") {
            config.cleanup_interval = Some(v);
        }
        if let Some(v) = env_parse("SERVER_PORT") {
            config.server_port = v;
        }

        config.normalized()
    }

    // == Builders ==
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_max_memory_size(mut self, bytes: usize) -> Self {
        self.max_memory_size = bytes;
        self
    }

    pub fn with_default_ttl(mut self, ttl_ms: u64) -> Self {
        self.default_ttl = ttl_ms;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_cleanup_interval(mut self, interval_ms: u64) -> Self {
        self.cleanup_interval = Some(interval_ms);
        self
    }

    // == Normalization ==
    /// Replaces non-positive or empty values with defaults.
    ///
    /// Invalid configuration never fails construction; it degrades to the
    /// documented defaults and logs a warning.
    pub fn normalized(mut self) -> Self {
        if self.max_size == 0 {
            warn!("max_size must be positive, falling back to {}", DEFAULT_MAX_SIZE);
            self.max_size = DEFAULT_MAX_SIZE;
        }
        if self.max_memory_size == 0 {
            warn!(
                "max_memory_size must be positive, falling back to {}",
                DEFAULT_MAX_MEMORY_SIZE
            );
            self.max_memory_size = DEFAULT_MAX_MEMORY_SIZE;
        }
        if self.default_ttl == 0 {
            warn!("default_ttl must be positive, falling back to {}ms", DEFAULT_TTL_MS);
            self.default_ttl = DEFAULT_TTL_MS;
        }
        if self.key_prefix.trim().is_empty() {
            warn!("key_prefix is empty, falling back to '{}'", DEFAULT_KEY_PREFIX);
            self.key_prefix = DEFAULT_KEY_PREFIX.to_string();
        }
        if self.cleanup_interval == Some(0) {
            self.cleanup_interval = None;
        }
        if self.event_capacity == 0 {
            self.event_capacity = DEFAULT_EVENT_CAPACITY;
        }
        self
    }

    /// Interval between cleanup sweeps.
    ///
    /// Unless configured explicitly, a quarter of the default TTL, kept
    /// within 10ms..=60s.
    pub fn effective_cleanup_interval(&self) -> Duration {
        let ms = self.cleanup_interval.unwrap_or_else(|| {
            (self.default_ttl / 4).clamp(MIN_CLEANUP_INTERVAL_MS, MAX_CLEANUP_INTERVAL_MS)
        });
        Duration::from_millis(ms.max(MIN_CLEANUP_INTERVAL_MS))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            max_memory_size: DEFAULT_MAX_MEMORY_SIZE,
            default_ttl: DEFAULT_TTL_MS,
            strategy: StrategyKind::default(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            cleanup_interval: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            server_port: 3000,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
