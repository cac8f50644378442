//! Lifecycle events
//!
//! Advisory notifications for metrics exporters, loggers or a sync layer.
//! Delivery is best-effort: lagging or absent subscribers never affect the
//! cache.

use serde::Serialize;
use tokio::sync::broadcast;

/// Something that happened to the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CacheEvent {
    Hit { key: String },
    Miss { key: String },
    Set { key: String, size: usize },
    Delete { key: String },
    Eviction { key: String, size: usize },
    Expired { key: String },
    Clear { removed: usize },
    Cleanup { removed: usize },
    Error { key: String, message: String },
}

/// Broadcast sender wrapper owned by the store.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CacheEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: CacheEvent) {
        // No receivers is the common case
        let _ = self.sender.send(event);
    }
}
