use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use tarang_core::booking::Booking;

use crate::api::BookingApi;

/// The dashboard refreshes every 10 seconds unless told otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What the dashboard renders: the latest booking list plus a connectivity
/// indicator. `connected` flips to false on a failed poll and recovers on
/// the next successful one.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub bookings: Vec<Booking>,
    pub connected: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Periodic refresh task with an explicit lifecycle: `start` owns the timer,
/// `stop` tears it down. Status-change and delete commands go straight to
/// the `BookingApi`; this type only reads.
pub struct DashboardPoller {
    snapshot: Arc<RwLock<DashboardSnapshot>>,
    handle: Option<JoinHandle<()>>,
}

impl DashboardPoller {
    pub fn start(api: Arc<dyn BookingApi>, interval: Duration) -> Self {
        let snapshot = Arc::new(RwLock::new(DashboardSnapshot::default()));
        let shared = snapshot.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match api.list_bookings().await {
                    Ok(bookings) => {
                        debug!("Dashboard refresh: {} bookings", bookings.len());
                        let mut snap = shared.write().await;
                        snap.bookings = bookings;
                        snap.connected = true;
                        snap.refreshed_at = Some(Utc::now());
                    }
                    Err(err) => {
                        warn!("Dashboard refresh failed: {}", err);
                        let mut snap = shared.write().await;
                        snap.connected = false;
                        snap.refreshed_at = Some(Utc::now());
                    }
                }
            }
        });

        Self {
            snapshot,
            handle: Some(handle),
        }
    }

    /// Shared handle for render loops that want to read without copying.
    pub fn snapshot_handle(&self) -> Arc<RwLock<DashboardSnapshot>> {
        self.snapshot.clone()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop refreshing. The last snapshot stays readable.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
