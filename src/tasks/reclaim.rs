//! Scheduled buffer reclaim.
//!
//! # Responsibilities
//! - Periodically wipe the accumulation buffer
//! - Log how much memory each run released

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::store::AccumulatorStore;

/// Periodic task that unconditionally resets the accumulation buffer.
pub struct ReclaimTask {
    store: Arc<AccumulatorStore>,
    interval: Duration,
}

impl ReclaimTask {
    pub fn new(store: Arc<AccumulatorStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run the reclaim loop until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Reclaim task starting"
        );

        let mut ticker = time::interval(self.interval);
        // interval fires immediately; consume that tick so the first
        // reclaim happens one full period after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let released = self.store.reset();
                    tracing::info!(released, "Accumulation buffer cleared");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Reclaim task received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
