use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("delivery rejected: {0}")]
    Rejected(String),

    #[error("credentials not configured: {0}")]
    CredentialsMissing(String),

    #[error("delivery error: {0}")]
    Other(String),
}

impl DeliveryError {
    /// Configuration absence is permanent for the duration of a dispatch;
    /// retrying cannot help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DeliveryError::CredentialsMissing(_))
    }
}

/// Push payload for the LINE Messaging API: plain text, or a Flex card
/// (used for reservation reminders, which carry a call-to-action button
/// into the mini-app).
#[derive(Debug, Clone, PartialEq)]
pub enum LineMessage {
    Text(String),
    Flex {
        alt_text: String,
        contents: serde_json::Value,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineSender: Send + Sync {
    /// Push to one LINE user using the store's channel credentials.
    async fn push(
        &self,
        store_id: &Uuid,
        to: &str,
        message: &LineMessage,
    ) -> Result<(), DeliveryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver plain text plus optional HTML from the fixed sender address.
    async fn send<'a>(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&'a str>,
    ) -> Result<(), DeliveryError>;
}
