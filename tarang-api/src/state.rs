use std::sync::Arc;

use tarang_core::repository::{BookingStore, StoreError};
use tarang_mailer::{MailError, Mailer};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub mailer: Arc<dyn Mailer>,
    /// Echo internal error detail in responses (non-production only).
    pub expose_errors: bool,
}

impl AppState {
    /// Map a store failure onto the API taxonomy, keeping detail out of the
    /// response unless this deployment opted in.
    pub fn store_error(&self, message: &str, err: StoreError) -> ApiError {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Booking not found".to_string()),
            other => ApiError::Internal {
                message: message.to_string(),
                detail: self.expose_errors.then(|| other.to_string()),
            },
        }
    }

    pub fn mail_error(&self, message: &str, err: MailError) -> ApiError {
        ApiError::Internal {
            message: message.to_string(),
            detail: self.expose_errors.then(|| err.to_string()),
        }
    }
}
