use tracing::{info, warn};
use uuid::Uuid;

use tarang_core::booking::{Booking, CreateBookingPayload};

use crate::api::BookingApi;
use crate::drafts::DraftQueue;

/// What happened to a finalized wizard payload. `SavedLocally` is a notice,
/// not an error: the data is parked in the draft queue instead of lost.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Booking),
    SavedLocally(Uuid),
}

/// Hand the payload to the backend; fall back to the local draft queue when
/// the call fails for any reason.
pub async fn submit_with_fallback(
    api: &dyn BookingApi,
    drafts: &mut DraftQueue,
    payload: CreateBookingPayload,
) -> SubmitOutcome {
    match api.create_booking(&payload).await {
        Ok(booking) => {
            info!("Booking submitted successfully: {}", booking.id);
            SubmitOutcome::Submitted(booking)
        }
        Err(err) => {
            warn!("Booking submission failed, saving locally: {}", err);
            let local_id = drafts.save(payload);
            SubmitOutcome::SavedLocally(local_id)
        }
    }
}
