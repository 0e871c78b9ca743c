use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tarang_core::booking::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    BadRequest(String),
    NotFound(String),
    Internal {
        message: String,
        /// Underlying detail, present only when `expose_errors` is on.
        detail: Option<String>,
    },
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal { message, detail } => {
                tracing::error!("Internal Server Error: {} ({:?})", message, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, message, detail)
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
        });
        if let Some(detail) = detail {
            body["error"] = json!(detail);
        }

        (status, Json(body)).into_response()
    }
}
