use crate::idempotency::IdempotencyStore;
use std::sync::Arc;

/// Background sweep of expired idempotency entries. Read-time expiry keeps
/// the store correct without it; the sweep only bounds memory.
pub struct CleanupJob {
    store: Arc<IdempotencyStore>,
    interval_seconds: u64,
}

impl CleanupJob {
    pub fn new(store: Arc<IdempotencyStore>, interval_seconds: u64) -> Self {
        Self {
            store,
            interval_seconds,
        }
    }

    /// Runs a single sweep and returns how many entries were dropped.
    pub fn run_once(&self) -> usize {
        self.store.purge_expired()
    }

    /// Starts the sweep in a background task.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(self.interval_seconds));

            loop {
                interval.tick().await;
                let purged = self.run_once();
                if purged > 0 {
                    tracing::info!(purged, "purged expired idempotency entries");
                }
            }
        })
    }
}
