use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus, NotificationOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("booking not found: {0}")]
    NotFound(Uuid),

    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    #[error("datastore operation failed: {0}")]
    Backend(String),
}

/// Data-access seam for the booking collection. Implementations carry no
/// business logic; status transitions and validation happen above this trait.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError>;

    /// All bookings, newest first.
    async fn list(&self) -> Result<Vec<Booking>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Booking, StoreError>;

    /// Set the status and bump `updated_at`, returning the updated record.
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError>;

    /// Best-effort secondary write of the confirmation-email outcome.
    async fn record_notification(
        &self,
        id: Uuid,
        outcome: &NotificationOutcome,
    ) -> Result<(), StoreError>;

    /// Remove one booking, returning the deleted record.
    async fn delete(&self, id: Uuid) -> Result<Booking, StoreError>;

    /// Remove every booking, returning how many were deleted.
    async fn clear_all(&self) -> Result<u64, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> bool;
}
