//! Expiration Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::size::EntrySize;

// == Sweeper Handle ==
/// Scoped handle to a running sweeper task.
///
/// The task is aborted when the handle is dropped, so discarding the cache
/// and its handle cannot leak a background task. The server also aborts it
/// explicitly during graceful shutdown.
#[derive(Debug)]
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweeper task.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has terminated.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// == Spawn Sweeper ==
/// Spawns a background task that periodically sweeps expired entries.
///
/// Each pass takes the write lock once and holds it for the whole
/// scan-and-delete, so the sweep is atomic with respect to every other
/// cache operation.
///
/// # Arguments
/// * `cache` - Shared reference to the cache store
/// * `interval` - Time between sweep passes
pub fn spawn_sweeper<V>(cache: Arc<RwLock<CacheStore<V>>>, interval: Duration) -> SweeperHandle
where
    V: EntrySize + Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        info!("Starting expiration sweeper with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("Sweep removed {} expired entries", removed);
            } else {
                debug!("Sweep found no expired entries");
            }
        }
    });

    SweeperHandle { handle }
}
