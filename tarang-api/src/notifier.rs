use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use tarang_core::booking::{Booking, NotificationOutcome};
use tarang_mailer::{BookingEmailDetails, EmailTemplate, OutgoingEmail};

use crate::state::AppState;

/// Dispatch the booking-confirmation email as an explicit background task.
///
/// The caller's response never waits on this: the task sends, then writes
/// the outcome back onto the booking as a best-effort update. The handle is
/// returned so tests can await completion; production callers drop it.
pub fn spawn_confirmation_email(state: AppState, booking: Booking) -> JoinHandle<()> {
    tokio::spawn(async move {
        let details = BookingEmailDetails {
            package_name: booking.package_name.clone(),
            travel_date: booking.travel_details.travel_date.to_string(),
            travelers: booking.travel_details.number_of_travelers,
            amount: booking.total_amount,
            booking_id: booking.id.to_string(),
        };
        let rendered =
            EmailTemplate::BookingConfirmation(details).render(&booking.booker_details.name);

        let outcome = match state
            .mailer
            .send(OutgoingEmail {
                to: booking.booker_details.email.clone(),
                subject: rendered.subject,
                html: rendered.html,
            })
            .await
        {
            Ok(receipt) => {
                info!(
                    "Confirmation email sent for booking {}: {}",
                    booking.id, receipt.message_id
                );
                NotificationOutcome::sent(Utc::now())
            }
            Err(err) => {
                error!(
                    "Failed to send confirmation email for booking {}: {}",
                    booking.id, err
                );
                NotificationOutcome::failed(err.to_string())
            }
        };

        // Best-effort follow-up write; a failure here only gets logged.
        if let Err(err) = state.store.record_notification(booking.id, &outcome).await {
            error!(
                "Failed to record notification outcome for booking {}: {}",
                booking.id, err
            );
        }
    })
}
