//! HTTP-level integration tests for the booking API, driven through the
//! router with an in-memory store and the sandbox mailer.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use tarang_api::{app, notifier, AppState};
use tarang_core::booking::{Booking, BookingStatus, CreateBookingPayload};
use tarang_core::repository::BookingStore;
use tarang_mailer::{MailError, Mailer, OutgoingEmail, SandboxMailer, SendReceipt};
use tarang_store::MemoryBookingStore;

// ── Harness ────────────────────────────────────────────────────

fn test_state() -> (AppState, Arc<MemoryBookingStore>) {
    let store = Arc::new(MemoryBookingStore::new());
    let state = AppState {
        store: store.clone(),
        mailer: Arc::new(SandboxMailer::new()),
        expose_errors: true,
    };
    (state, store)
}

async fn request(
    router: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn booking_body(travelers: u32, email: &str) -> Value {
    json!({
        "packageName": "Bali Adventure Package",
        "packageType": "Standard",
        "price": 1200.0,
        "bookerDetails": {
            "name": "John Smith",
            "email": email,
            "phone": "+1-555-203-1188"
        },
        "travelDetails": {
            "numberOfTravelers": travelers,
            "travelDate": "2027-05-15"
        }
    })
}

/// Mailer that never completes in test time; proves the status-update
/// response does not wait on the send.
struct SlowMailer;

#[async_trait::async_trait]
impl Mailer for SlowMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<SendReceipt, MailError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(SendReceipt {
            message_id: "<slow@tarangtravel.com>".to_string(),
        })
    }
}

// ── Booking CRUD ───────────────────────────────────────────────

#[tokio::test]
async fn test_create_booking_defaults() {
    let (state, _) = test_state();
    let router = app(state);

    let (status, body) = request(
        router,
        "POST",
        "/api/bookings",
        Some(booking_body(3, "john.smith@email.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Booking created successfully");
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["totalAmount"], 3600.0);
    assert_eq!(body["data"]["payment"]["method"], "Pending");
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_traveler_count_invariant() {
    let (state, _) = test_state();
    let router = app(state);

    let (status, body) = request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(0, "a@b.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(11, "a@b.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        router,
        "POST",
        "/api/bookings",
        Some(booking_body(10, "a@b.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_is_newest_first_with_count() {
    let (state, _) = test_state();
    let router = app(state);

    let mut first = booking_body(1, "a@b.com");
    first["packageName"] = json!("Paris Romantic Getaway");
    request(router.clone(), "POST", "/api/bookings", Some(first)).await;

    tokio::time::sleep(Duration::from_millis(5)).await;

    let mut second = booking_body(1, "a@b.com");
    second["packageName"] = json!("Tokyo Cultural Tour");
    request(router.clone(), "POST", "/api/bookings", Some(second)).await;

    let (status, body) = request(router, "GET", "/api/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["packageName"], "Tokyo Cultural Tour");
    assert_eq!(body["data"][1]["packageName"], "Paris Romantic Getaway");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (state, _) = test_state();
    let router = app(state);

    let (_, created) = request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(2, "a@b.com")),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        router.clone(),
        "DELETE",
        &format!("/api/bookings/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking deleted successfully");
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = request(router, "GET", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Booking not found");
}

#[tokio::test]
async fn test_clear_all_counts_and_empties() {
    let (state, _) = test_state();
    let router = app(state);

    let (status, body) = request(router.clone(), "DELETE", "/api/bookings/clear-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 0);

    request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(1, "a@b.com")),
    )
    .await;
    request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(2, "a@b.com")),
    )
    .await;

    let (_, body) = request(router.clone(), "DELETE", "/api/bookings/clear-all", None).await;
    assert_eq!(body["deletedCount"], 2);
    assert_eq!(body["message"], "All bookings cleared (2 records)");

    let (_, body) = request(router, "GET", "/api/bookings", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_update_status_unknown_id_is_not_found() {
    let (state, _) = test_state();
    let router = app(state);

    let (status, _) = request(
        router,
        "PATCH",
        "/api/bookings/7b04fb54-9f06-4a5c-9d2a-1d7a08e51111/status",
        Some(json!({"status": "Confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Status update + notification flow ──────────────────────────

#[tokio::test]
async fn test_confirm_returns_before_notification_completes() {
    let store = Arc::new(MemoryBookingStore::new());
    let state = AppState {
        store: store.clone(),
        mailer: Arc::new(SlowMailer),
        expose_errors: true,
    };
    let router = app(state);

    let (_, created) = request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(2, "john.smith@email.com")),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // the PATCH must come back long before the 30s send does
    let (status, body) = tokio::time::timeout(
        Duration::from_secs(2),
        request(
            router,
            "PATCH",
            &format!("/api/bookings/{id}/status"),
            Some(json!({"status": "Confirmed"})),
        ),
    )
    .await
    .expect("status update blocked on the notification send");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Confirmed");
    assert_eq!(body["message"], "Booking status updated");
}

#[tokio::test]
async fn test_notification_failure_does_not_change_outcome() {
    // invalid recipient address forces the send to fail
    let (state, store) = test_state();
    let router = app(state);

    let (_, created) = request(
        router.clone(),
        "POST",
        "/api/bookings",
        Some(booking_body(2, "not-an-address")),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        router.clone(),
        "PATCH",
        &format!("/api/bookings/{id}/status"),
        Some(json!({"status": "Confirmed"})),
    )
    .await;

    // the failed send never surfaces on the status-update response
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Confirmed");

    // the failure lands on the record as a best-effort follow-up
    let uuid = id.parse().unwrap();
    for _ in 0..100 {
        let booking = store.get(uuid).await.unwrap();
        if booking.notification.confirmation_email_error.is_some() {
            assert!(!booking.notification.confirmation_email_sent);
            assert_eq!(booking.status, BookingStatus::Confirmed);
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("notification outcome was never recorded");
}

#[tokio::test]
async fn test_notifier_records_successful_send() {
    let (state, store) = test_state();

    let payload: CreateBookingPayload =
        serde_json::from_value(booking_body(2, "sarah.johnson@email.com")).unwrap();
    let booking = Booking::from_payload(payload).unwrap();
    store.insert(&booking).await.unwrap();

    notifier::spawn_confirmation_email(state, booking.clone())
        .await
        .unwrap();

    let stored = store.get(booking.id).await.unwrap();
    assert!(stored.notification.confirmation_email_sent);
    assert!(stored.notification.confirmation_email_at.is_some());
    assert!(stored.notification.confirmation_email_error.is_none());
}

// ── Health and email endpoints ─────────────────────────────────

#[tokio::test]
async fn test_health_reports_database_state() {
    let (state, _) = test_state();
    let (status, body) = request(app(state), "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["database"], "Connected");
}

#[tokio::test]
async fn test_send_email_requires_fields() {
    let (state, _) = test_state();
    let (status, body) = request(
        app(state),
        "POST",
        "/api/emails/send",
        Some(json!({"to": "a@b.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: to, name, template");
}

#[tokio::test]
async fn test_send_welcome_email() {
    let (state, _) = test_state();
    let (status, body) = request(
        app(state),
        "POST",
        "/api/emails/send",
        Some(json!({
            "to": "emma.davis@email.com",
            "name": "Emma Davis",
            "template": "welcome"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");
    assert!(body["messageId"].as_str().unwrap().contains("@tarangtravel.com"));
}

#[tokio::test]
async fn test_bulk_send_reports_per_recipient_results() {
    let (state, _) = test_state();
    let (status, body) = request(
        app(state),
        "POST",
        "/api/emails/send-bulk",
        Some(json!({
            "template": "travelTips",
            "recipients": [
                {"email": "david.garcia@email.com", "name": "David Garcia"},
                {"email": "not-an-address", "name": "Nobody"}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sent 1 out of 2 emails");
    assert_eq!(body["results"][0]["success"], true);
    assert_eq!(body["results"][1]["success"], false);
    assert!(body["results"][1]["error"].is_string());
}

#[tokio::test]
async fn test_template_catalog() {
    let (state, _) = test_state();
    let (status, body) = request(app(state), "GET", "/api/emails/templates", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["welcome", "bookingConfirmation", "travelTips", "custom"]);
}
