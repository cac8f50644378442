//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries, whether
//! or not anyone reads them again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// cleanup runs, and takes the store's write lock only for the sweep itself.
///
/// # Returns
/// A JoinHandle for the spawned task; aborting it is how the cache stops
/// the scheduler on close.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new(&CacheConfig::default())));
/// let cleanup_handle = spawn_cleanup_task(store.clone(), Duration::from_secs(15));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(store: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store_guard = store.write().await;
                store_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
