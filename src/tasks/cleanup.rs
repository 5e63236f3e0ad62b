//! TTL Purge Task
//!
//! Background task that periodically removes expired cached responses, so
//! a full cache starts admitting new keys again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that purges expired cache entries every
/// `interval_secs` seconds.
///
/// Returns the JoinHandle so the task can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::new(1000, Duration::from_secs(60))));
/// let purge_handle = spawn_cleanup_task(cache.clone(), 30);
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval_secs: u64) -> JoinHandle<()> {
    // A zero interval would spin; clamp to one second
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut guard = cache.write().await;
                let removed = guard.purge_expired();
                (removed, guard.stats())
            };

            if removed > 0 {
                info!("Cache purge: removed {} expired responses", removed);
            } else {
                debug!("Cache purge: no expired responses found");
            }
            debug!(
                "Cache stats: entries={}, hits={}, misses={}, rejected={}, hit_rate={:.2}",
                stats.total_entries,
                stats.hits,
                stats.misses,
                stats.rejected,
                stats.hit_rate()
            );
        }
    })
}
