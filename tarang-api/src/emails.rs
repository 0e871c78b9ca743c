use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tarang_mailer::templates::{self, BookingEmailDetails, TemplateInfo};
use tarang_mailer::{EmailTemplate, OutgoingEmail};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub name: Option<String>,
    pub template: Option<String>,
    pub custom_subject: Option<String>,
    pub custom_message: Option<String>,
    pub booking_details: Option<BookingEmailDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkRecipient {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBulkRequest {
    pub recipients: Option<Vec<BulkRecipient>>,
    pub template: Option<String>,
    pub custom_subject: Option<String>,
    pub custom_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendResult {
    pub email: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendBulkResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<BulkSendResult>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub success: bool,
    pub templates: Vec<TemplateInfo>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/emails/send", post(send_email))
        .route("/api/emails/send-bulk", post(send_bulk))
        .route("/api/emails/templates", get(list_templates))
}

fn resolve_template(
    template: &str,
    custom_subject: Option<String>,
    custom_message: Option<String>,
    booking_details: Option<BookingEmailDetails>,
) -> Result<EmailTemplate, ApiError> {
    match template {
        "welcome" => Ok(EmailTemplate::Welcome),
        "travelTips" => Ok(EmailTemplate::TravelTips),
        "custom" => Ok(EmailTemplate::Custom {
            subject: custom_subject,
            message: custom_message.unwrap_or_default(),
        }),
        "bookingConfirmation" => booking_details
            .map(EmailTemplate::BookingConfirmation)
            .ok_or_else(|| {
                ApiError::BadRequest(
                    "bookingDetails is required for the bookingConfirmation template".to_string(),
                )
            }),
        other => Err(ApiError::BadRequest(format!("Unknown template: {other}"))),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/emails/send
async fn send_email(
    State(state): State<AppState>,
    Json(req): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let (to, name, template) = match (req.to, req.name, req.template) {
        (Some(to), Some(name), Some(template)) => (to, name, template),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: to, name, template".to_string(),
            ))
        }
    };

    let template = resolve_template(
        &template,
        req.custom_subject,
        req.custom_message,
        req.booking_details,
    )?;
    let rendered = template.render(&name);

    let receipt = state
        .mailer
        .send(OutgoingEmail {
            to: to.clone(),
            subject: rendered.subject,
            html: rendered.html,
        })
        .await
        .map_err(|e| state.mail_error("Failed to send email", e))?;

    tracing::info!("Email sent to {}: {}", to, receipt.message_id);

    Ok(Json(SendEmailResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        message_id: receipt.message_id,
    }))
}

/// POST /api/emails/send-bulk
///
/// Sends sequentially; one bad recipient never fails the batch.
async fn send_bulk(
    State(state): State<AppState>,
    Json(req): Json<SendBulkRequest>,
) -> Result<Json<SendBulkResponse>, ApiError> {
    let recipients = match req.recipients {
        Some(recipients) if !recipients.is_empty() => recipients,
        _ => {
            return Err(ApiError::BadRequest(
                "Recipients array is required".to_string(),
            ))
        }
    };
    let template_id = req
        .template
        .ok_or_else(|| ApiError::BadRequest("Missing required field: template".to_string()))?;

    let template = resolve_template(&template_id, req.custom_subject, req.custom_message, None)?;

    let mut results = Vec::with_capacity(recipients.len());
    for recipient in &recipients {
        let rendered = template.render(&recipient.name);

        let result = state
            .mailer
            .send(OutgoingEmail {
                to: recipient.email.clone(),
                subject: rendered.subject,
                html: rendered.html,
            })
            .await;

        results.push(match result {
            Ok(receipt) => BulkSendResult {
                email: recipient.email.clone(),
                success: true,
                message_id: Some(receipt.message_id),
                error: None,
            },
            Err(err) => BulkSendResult {
                email: recipient.email.clone(),
                success: false,
                message_id: None,
                error: Some(err.to_string()),
            },
        });
    }

    let success_count = results.iter().filter(|r| r.success).count();
    tracing::info!(
        "Bulk email: {}/{} sent successfully",
        success_count,
        recipients.len()
    );

    Ok(Json(SendBulkResponse {
        success: true,
        message: format!("Sent {} out of {} emails", success_count, recipients.len()),
        results,
    }))
}

/// GET /api/emails/templates
async fn list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        success: true,
        templates: templates::catalog(),
    })
}
