//! Background expiry sweeper.
//!
//! One long-lived task per process calls [`RecordStore::sweep`] on a fixed
//! interval. The task is tracked, not detached: [`SweeperHandle`] carries
//! a shutdown signal and the join handle, and the server awaits it during
//! graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::RecordStore;

/// Handle to the running sweeper task.
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the periodic expiry task.
///
/// Fires `store.sweep(ttl)` every `interval` until shut down. The first
/// tick happens immediately on spawn, which is harmless on an empty store.
pub fn spawn_sweeper(
    store: Arc<dyn RecordStore>,
    ttl: Duration,
    interval: Duration,
) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(ttl_secs = ttl.as_secs(), interval_secs = interval.as_secs(), "sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.sweep(ttl);
                    if removed > 0 {
                        info!(removed, "swept expired records");
                    }
                }
                _ = shutdown_rx.changed() => {
                    debug!("sweeper shutting down");
                    break;
                }
            }
        }
    });

    SweeperHandle { shutdown_tx, task }
}
