//! Periodic reconciliation worker
//!
//! Runs the reconciliation sweep on a fixed interval so past-due stays
//! and stuck rooms are repaired without an operator asking for it. The
//! sweep itself is idempotent, so the schedule needs no coordination
//! with on-demand runs triggered over the API.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::BookingManager;

/// Reconciliation worker
///
/// Spawned from `ServerState::start_background_tasks()`.
pub struct ReconcileWorker {
    manager: Arc<BookingManager>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ReconcileWorker {
    pub fn new(
        manager: Arc<BookingManager>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            manager,
            interval,
            shutdown,
        }
    }

    /// Main loop: sweep at startup, then on every interval tick.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Reconciliation worker started"
        );

        // Repair whatever drifted while the server was down
        self.sweep().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.sweep().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Reconciliation worker received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn sweep(&self) {
        match self.manager.reconcile(None).await {
            Ok(0) => {
                tracing::debug!("reconciliation sweep found nothing to correct");
            }
            Ok(corrected) => {
                tracing::info!(corrected, "reconciliation sweep corrected bookings");
            }
            Err(error) => {
                tracing::error!(error = %error, "reconciliation sweep failed");
            }
        }
    }
}
