use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

pub mod templates;

pub use templates::{BookingEmailDetails, EmailTemplate, RenderedEmail};

/// A rendered message ready for transmission.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub message_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail seam. Send failures are the caller's to log or record;
/// implementations never retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<SendReceipt, MailError>;
}

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
}

/// Relay-backed mailer (STARTTLS, authenticated).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Result<Self, MailError> {
        let from: Mailbox =
            format!("{} <{}>", settings.from_name, settings.from_address).parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .build();

        Ok(Self { transport, from })
    }
}

fn new_message_id() -> String {
    format!("<{}@tarangtravel.com>", Uuid::new_v4())
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<SendReceipt, MailError> {
        let message_id = new_message_id();

        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(&email.subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(email.html)?;

        self.transport.send(message).await?;
        info!("Email sent to {}: {}", email.to, message_id);

        Ok(SendReceipt { message_id })
    }
}

/// Stand-in used when no SMTP credentials are configured. Issues a valid
/// receipt without transmitting anything, so callers behave the same in
/// non-production environments.
#[derive(Default)]
pub struct SandboxMailer;

impl SandboxMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for SandboxMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<SendReceipt, MailError> {
        // Address must still parse, so bad recipients fail the same way
        // they would against a real relay.
        let _: Mailbox = email.to.parse()?;

        let message_id = new_message_id();
        debug!(
            "Sandbox mail to {} (subject: {}): {} bytes of html",
            email.to,
            email.subject,
            email.html.len()
        );
        info!("Sandbox email receipt for {}: {}", email.to, message_id);

        Ok(SendReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sandbox_issues_receipt_without_credentials() {
        let mailer = SandboxMailer::new();
        let receipt = mailer
            .send(OutgoingEmail {
                to: "john.smith@email.com".to_string(),
                subject: "Your Booking is Confirmed! ✅".to_string(),
                html: "<p>ok</p>".to_string(),
            })
            .await
            .unwrap();

        assert!(receipt.message_id.contains("@tarangtravel.com"));
    }

    #[tokio::test]
    async fn test_sandbox_rejects_invalid_recipient() {
        let mailer = SandboxMailer::new();
        let result = mailer
            .send(OutgoingEmail {
                to: "not-an-address".to_string(),
                subject: "x".to_string(),
                html: "x".to_string(),
            })
            .await;

        assert!(matches!(result, Err(MailError::Address(_))));
    }
}
