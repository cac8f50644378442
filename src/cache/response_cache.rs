//! Response cache orchestrator
//!
//! Async handle over a shared [`CacheStore`]: serializes access through a
//! tokio `RwLock`, generates keys, runs the cleanup scheduler and offers the
//! compute-on-miss helpers.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::events::{CacheEvent, EventBus};
use crate::cache::snapshot::{ImportSummary, Snapshot};
use crate::cache::{CacheKeyGenerator, CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

/// Result of [`AiResponseCache::get_many`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchGet {
    pub found: HashMap<String, Value>,
    pub missing: Vec<String>,
}

/// One pre-computed result for [`AiResponseCache::warmup`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmupEntry {
    pub subject: Value,
    #[serde(default)]
    pub context: Option<Value>,
    #[serde(default)]
    pub preferences: Option<Value>,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
}

// == AI Response Cache ==
/// Bounded multi-strategy cache for expensive computations.
///
/// No lock is held while a `get_or_set` producer runs, so two concurrent
/// misses on the same key may both compute; the later write wins.
pub struct AiResponseCache {
    store: Arc<RwLock<CacheStore>>,
    events: EventBus,
    keys: CacheKeyGenerator,
    cleanup_interval: Duration,
    cleanup_handle: Option<JoinHandle<()>>,
}

impl AiResponseCache {
    // == Constructors ==
    /// Creates a cache without starting the cleanup scheduler.
    pub fn new(config: CacheConfig) -> Self {
        let config = config.normalized();
        let store = CacheStore::new(&config);
        let events = store.events().clone();

        Self {
            store: Arc::new(RwLock::new(store)),
            events,
            keys: CacheKeyGenerator::new(config.key_prefix.clone()),
            cleanup_interval: config.effective_cleanup_interval(),
            cleanup_handle: None,
        }
    }

    /// Creates a cache and starts its cleanup scheduler.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: CacheConfig) -> Self {
        let mut cache = Self::new(config);
        cache.start_cleanup();
        cache
    }

    /// Starts the periodic cleanup task if it is not already running.
    pub fn start_cleanup(&mut self) {
        if self.is_cleanup_running() {
            return;
        }
        self.cleanup_handle = Some(spawn_cleanup_task(self.store.clone(), self.cleanup_interval));
    }

    pub fn is_cleanup_running(&self) -> bool {
        self.cleanup_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Accessors ==
    pub fn key_generator(&self) -> &CacheKeyGenerator {
        &self.keys
    }

    /// Key for a subject under this cache's namespace.
    pub fn generate_key(
        &self,
        subject: &Value,
        context: Option<&Value>,
        preferences: Option<&Value>,
    ) -> String {
        self.keys.generate(subject, context, preferences)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Shared store handle, as used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    // == Single-key Operations ==
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.store.write().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Option<u64>) -> Result<()> {
        self.store.write().await.set(key.into(), value, ttl)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    // == Get Or Set ==
    /// Returns the cached value, or awaits `producer`, caches its result and
    /// returns it.
    ///
    /// A producer error is returned unchanged and nothing is cached. A
    /// produced value that cannot be cached (too large) is still returned.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<u64>,
    ) -> std::result::Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Value, E>>,
        E: fmt::Display,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        match producer().await {
            Ok(value) => {
                if let Err(e) = self.set(key, value.clone(), ttl).await {
                    warn!("Computed value for '{}' was not cached: {}", key, e);
                }
                Ok(value)
            }
            Err(e) => {
                warn!("Producer for '{}' failed: {}", key, e);
                self.events.emit(CacheEvent::Error {
                    key: key.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    // == Batch Operations ==
    pub async fn get_many<I, K>(&self, keys: I) -> BatchGet
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut store = self.store.write().await;
        let mut batch = BatchGet::default();
        for key in keys {
            let key = key.as_ref();
            match store.get(key) {
                Some(value) => {
                    batch.found.insert(key.to_string(), value);
                }
                None => batch.missing.push(key.to_string()),
            }
        }
        batch
    }

    pub async fn set_many<I>(&self, pairs: I, ttl: Option<u64>) -> Vec<(String, Result<()>)>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut store = self.store.write().await;
        pairs
            .into_iter()
            .map(|(key, value)| {
                let result = store.set(key.clone(), value, ttl);
                (key, result)
            })
            .collect()
    }

    // == Bulk Removal ==
    pub async fn clear(&self) -> usize {
        let removed = self.store.write().await.clear();
        info!("Cache cleared: {} entries removed", removed);
        removed
    }

    /// Removes expired entries now, independent of the scheduler.
    pub async fn cleanup(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<usize> {
        self.store.write().await.invalidate_pattern(pattern)
    }

    /// Deletes every entry whose key was generated from `subject`.
    pub async fn invalidate_by_subject(&self, subject: &Value) -> Result<usize> {
        let pattern = self.keys.subject_pattern(subject);
        self.invalidate_pattern(&pattern).await
    }

    // == Warmup ==
    /// Pre-populates the cache, deriving each key with the key generator.
    ///
    /// Returns the number of entries stored.
    pub async fn warmup(&self, entries: Vec<WarmupEntry>) -> usize {
        let mut store = self.store.write().await;
        let mut stored = 0;
        for entry in entries {
            let key = self.keys.generate(
                &entry.subject,
                entry.context.as_ref(),
                entry.preferences.as_ref(),
            );
            match store.set(key.clone(), entry.value, entry.ttl) {
                Ok(()) => stored += 1,
                Err(e) => warn!("Warmup skipped '{}': {}", key, e),
            }
        }
        info!("Cache warmup stored {} entries", stored);
        stored
    }

    // == Snapshots ==
    pub async fn export(&self) -> Snapshot {
        self.store.read().await.export()
    }

    pub async fn import(&self, snapshot: Snapshot) -> ImportSummary {
        let summary = self.store.write().await.import(snapshot);
        info!(
            "Snapshot imported: {} stored, {} expired, {} rejected",
            summary.imported, summary.expired, summary.rejected
        );
        summary
    }

    /// Imports a raw snapshot document, skipping entries that do not parse.
    pub async fn import_json(&self, raw: &str) -> Result<ImportSummary> {
        let (snapshot, malformed) = Snapshot::parse_lenient(raw)?;
        let mut summary = self.import(snapshot).await;
        summary.malformed += malformed;
        Ok(summary)
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Lifecycle ==
    /// Stops the cleanup scheduler and releases every entry.
    pub async fn close(&mut self) -> usize {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            debug!("Cleanup task aborted");
        }
        self.store.write().await.clear()
    }
}

impl Drop for AiResponseCache {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
        }
    }
}

impl fmt::Debug for AiResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiResponseCache")
            .field("key_prefix", &self.keys.prefix())
            .field("cleanup_interval", &self.cleanup_interval)
            .field("cleanup_running", &self.is_cleanup_running())
            .finish()
    }
}
