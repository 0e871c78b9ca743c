use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use tarang_core::booking::{Booking, BookingStatus, CreateBookingPayload};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// The booking backend as seen from the storefront and the admin dashboard.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, payload: &CreateBookingPayload)
        -> Result<Booking, ApiClientError>;
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiClientError>;
    async fn get_booking(&self, id: Uuid) -> Result<Booking, ApiClientError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, ApiClientError>;
    async fn delete_booking(&self, id: Uuid) -> Result<Booking, ApiClientError>;
    async fn clear_all(&self) -> Result<u64, ApiClientError>;
    async fn health(&self) -> Result<bool, ApiClientError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
    #[allow(dead_code)]
    count: Option<u64>,
    deleted_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    success: bool,
}

/// reqwest-backed client speaking the `{success, message, data}` envelope.
pub struct HttpBookingApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn unwrap_envelope<T>(response: reqwest::Response) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;

        match envelope.data {
            Some(data) if envelope.success => Ok(data),
            _ => Err(ApiClientError::Rejected {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            }),
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn create_booking(
        &self,
        payload: &CreateBookingPayload,
    ) -> Result<Booking, ApiClientError> {
        let response = self
            .http
            .post(self.url("/api/bookings"))
            .json(payload)
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiClientError> {
        let response = self.http.get(self.url("/api/bookings")).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn get_booking(&self, id: Uuid) -> Result<Booking, ApiClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/bookings/{id}")))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, ApiClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/bookings/{id}/status")))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn delete_booking(&self, id: Uuid) -> Result<Booking, ApiClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/bookings/{id}")))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    async fn clear_all(&self) -> Result<u64, ApiClientError> {
        let response = self
            .http
            .delete(self.url("/api/bookings/clear-all"))
            .send()
            .await?;

        let status = response.status();
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        match envelope.deleted_count {
            Some(count) if envelope.success => Ok(count),
            _ => Err(ApiClientError::Rejected {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            }),
        }
    }

    async fn health(&self) -> Result<bool, ApiClientError> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        let body: HealthBody = response.json().await?;
        Ok(body.success)
    }
}
