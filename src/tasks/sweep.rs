//! Expiration Sweep Task
//!
//! Optional background task that periodically drops expired cache
//! entries. The cache sweeps lazily on its own; this only bounds how long
//! dead entries linger when writes are rare.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically removes expired entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps and taking the write lock only for the sweep itself.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = shared(SearchCache::default());
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
