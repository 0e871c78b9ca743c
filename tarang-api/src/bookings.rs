use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tarang_core::booking::{Booking, BookingStatus, CreateBookingPayload};

use crate::error::ApiError;
use crate::notifier;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Booking,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Booking>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearAllResponse {
    pub success: bool,
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking).get(list_bookings))
        .route("/api/bookings/clear-all", delete(clear_all_bookings))
        .route(
            "/api/bookings/{id}",
            get(get_booking).delete(delete_booking),
        )
        .route("/api/bookings/{id}/status", patch(update_booking_status))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booking = Booking::from_payload(payload)?;

    state
        .store
        .insert(&booking)
        .await
        .map_err(|e| state.store_error("Error creating booking", e))?;

    tracing::info!("Booking created: {}", booking.id);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: Some("Booking created successfully".to_string()),
            data: booking,
        }),
    ))
}

/// GET /api/bookings
async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<BookingListResponse>, ApiError> {
    let bookings = state
        .store
        .list()
        .await
        .map_err(|e| state.store_error("Error fetching bookings", e))?;

    Ok(Json(BookingListResponse {
        success: true,
        count: bookings.len(),
        data: bookings,
    }))
}

/// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .store
        .get(id)
        .await
        .map_err(|e| state.store_error("Error fetching booking", e))?;

    Ok(Json(BookingResponse {
        success: true,
        message: None,
        data: booking,
    }))
}

/// PATCH /api/bookings/{id}/status
///
/// The one operation with a side effect beyond persistence: landing on
/// Confirmed dispatches the confirmation email off the request path. The
/// updated record is returned immediately; the send outcome arrives on the
/// record later via a best-effort write.
async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .store
        .update_status(id, req.status)
        .await
        .map_err(|e| state.store_error("Error updating booking", e))?;

    if req.status == BookingStatus::Confirmed && !booking.booker_details.email.is_empty() {
        notifier::spawn_confirmation_email(state.clone(), booking.clone());
    }

    Ok(Json(BookingResponse {
        success: true,
        message: Some("Booking status updated".to_string()),
        data: booking,
    }))
}

/// DELETE /api/bookings/{id}
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .store
        .delete(id)
        .await
        .map_err(|e| state.store_error("Error deleting booking", e))?;

    tracing::info!("Deleted booking: {}", id);

    Ok(Json(BookingResponse {
        success: true,
        message: Some("Booking deleted successfully".to_string()),
        data: booking,
    }))
}

/// DELETE /api/bookings/clear-all
async fn clear_all_bookings(
    State(state): State<AppState>,
) -> Result<Json<ClearAllResponse>, ApiError> {
    let deleted_count = state
        .store
        .clear_all()
        .await
        .map_err(|e| state.store_error("Error clearing bookings", e))?;

    tracing::info!("Cleared all bookings: {} records", deleted_count);

    Ok(Json(ClearAllResponse {
        success: true,
        message: format!("All bookings cleared ({} records)", deleted_count),
        deleted_count,
    }))
}
