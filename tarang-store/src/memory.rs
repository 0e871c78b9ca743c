use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use tarang_core::booking::{Booking, BookingStatus, NotificationOutcome};
use tarang_core::repository::{BookingStore, StoreError};

/// In-memory booking collection. Backs the test suites and mirrors the
/// Postgres store's contract exactly.
#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError> {
        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let mut all: Vec<Booking> = self.bookings.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> Result<Booking, StoreError> {
        self.bookings
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        booking.update_status(status);
        Ok(booking.clone())
    }

    async fn record_notification(
        &self,
        id: Uuid,
        outcome: &NotificationOutcome,
    ) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        booking.notification = outcome.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<Booking, StoreError> {
        self.bookings
            .write()
            .await
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        let mut bookings = self.bookings.write().await;
        let count = bookings.len() as u64;
        bookings.clear();
        Ok(count)
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tarang_core::booking::{BookerDetails, CreateBookingPayload, PackageType, TravelDetails};

    fn make_booking(package: &str) -> Booking {
        Booking::from_payload(CreateBookingPayload {
            package_name: package.to_string(),
            package_type: PackageType::Budget,
            price: 500.0,
            booker_details: BookerDetails {
                name: "Emma Wilson".to_string(),
                email: "emma.wilson@email.com".to_string(),
                phone: "+1-555-880-4411".to_string(),
            },
            travel_details: TravelDetails {
                number_of_travelers: 2,
                travel_date: NaiveDate::from_ymd_opt(2027, 3, 14).unwrap(),
            },
            payment: None,
            total_amount: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryBookingStore::new();
        let booking = make_booking("Paris Romantic Getaway");
        store.insert(&booking).await.unwrap();

        let deleted = store.delete(booking.id).await.unwrap();
        assert_eq!(deleted.id, booking.id);

        assert!(matches!(
            store.get(booking.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_all_counts() {
        let store = MemoryBookingStore::new();
        assert_eq!(store.clear_all().await.unwrap(), 0);

        store.insert(&make_booking("Tokyo Cultural Tour")).await.unwrap();
        store.insert(&make_booking("Caribbean Cruise")).await.unwrap();

        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryBookingStore::new();
        let mut first = make_booking("Dubai Luxury Experience");
        let mut second = make_booking("Maldives Beach Resort");
        first.created_at = first.created_at - chrono::Duration::minutes(5);
        second.created_at = second.created_at - chrono::Duration::minutes(1);
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].package_name, "Maldives Beach Resort");
        assert_eq!(all[1].package_name, "Dubai Luxury Experience");
    }

    #[tokio::test]
    async fn test_record_notification_outcome() {
        let store = MemoryBookingStore::new();
        let booking = make_booking("Swiss Alps Ski Package");
        store.insert(&booking).await.unwrap();

        store
            .record_notification(booking.id, &NotificationOutcome::failed("relay refused"))
            .await
            .unwrap();

        let stored = store.get(booking.id).await.unwrap();
        assert!(!stored.notification.confirmation_email_sent);
        assert_eq!(
            stored.notification.confirmation_email_error.as_deref(),
            Some("relay refused")
        );
    }
}
