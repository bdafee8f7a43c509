//! Server state
//!
//! `ServerState` holds shared references to every long-lived service:
//! the embedded store and the booking manager. `Arc` fields make cloning
//! cheap; axum clones the state per request.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::booking::scheduler::ReconcileWorker;
use crate::booking::BookingManager;
use crate::core::Config;
use crate::store::{seed, RedbStore};
use crate::utils::SystemClock;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<RedbStore>,
    pub manager: Arc<BookingManager>,
    shutdown: CancellationToken,
}

impl ServerState {
    /// Open the store, seed the fixed room inventory and wire up the
    /// booking manager.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = Arc::new(RedbStore::open(config.db_path())?);

        let seeded =
            seed::seed_default_rooms(store.as_ref(), Utc::now().timestamp_millis()).await?;
        if seeded > 0 {
            tracing::info!(seeded, "Seeded default room inventory");
        }

        let manager = Arc::new(BookingManager::new(store.clone(), Arc::new(SystemClock)));

        Ok(Self {
            config: config.clone(),
            store,
            manager,
            shutdown: CancellationToken::new(),
        })
    }

    /// Spawn background tasks (periodic reconciliation)
    pub fn start_background_tasks(&self) {
        let worker = ReconcileWorker::new(
            self.manager.clone(),
            Duration::from_secs(self.config.reconcile_interval_secs),
            self.shutdown.clone(),
        );
        tokio::spawn(worker.run());
    }

    /// Signal background tasks to stop
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
