use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tarang_core::booking::CreateBookingPayload;

/// A booking payload parked locally because the create call failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDraft {
    pub local_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub payload: CreateBookingPayload,
}

/// Ordered fallback queue for unsubmitted bookings. The embedder decides
/// how (or whether) to persist it between sessions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DraftQueue {
    drafts: Vec<LocalDraft>,
}

impl DraftQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a payload, returning the local id it was tagged with.
    pub fn save(&mut self, payload: CreateBookingPayload) -> Uuid {
        let draft = LocalDraft {
            local_id: Uuid::new_v4(),
            saved_at: Utc::now(),
            payload,
        };
        let id = draft.local_id;
        self.drafts.push(draft);
        id
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalDraft> {
        self.drafts.iter()
    }

    /// Hand the parked payloads back for reprocessing, oldest first.
    pub fn drain(&mut self) -> Vec<LocalDraft> {
        std::mem::take(&mut self.drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tarang_core::booking::{BookerDetails, PackageType, TravelDetails};

    fn payload() -> CreateBookingPayload {
        CreateBookingPayload {
            package_name: "Iceland Northern Lights".to_string(),
            package_type: PackageType::Standard,
            price: 2300.0,
            booker_details: BookerDetails {
                name: "Olivia Taylor".to_string(),
                email: "olivia.taylor@email.com".to_string(),
                phone: "+1-555-667-2301".to_string(),
            },
            travel_details: TravelDetails {
                number_of_travelers: 2,
                travel_date: NaiveDate::from_ymd_opt(2027, 2, 11).unwrap(),
            },
            payment: None,
            total_amount: Some(4600.0),
        }
    }

    #[test]
    fn test_save_tags_and_orders_drafts() {
        let mut queue = DraftQueue::new();
        let first = queue.save(payload());
        let second = queue.save(payload());

        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained[0].local_id, first);
        assert_eq!(drained[1].local_id, second);
        assert!(queue.is_empty());
    }
}
