use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;

/// Channel a notification was actually delivered through. `App` is not a
/// push channel: it marks a log row that is only visible if the client app
/// surfaces notification history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Line,
    Email,
    App,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Line => "line",
            DeliveryChannel::Email => "email",
            DeliveryChannel::App => "app",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "line" => Some(DeliveryChannel::Line),
            "email" => Some(DeliveryChannel::Email),
            "app" => Some(DeliveryChannel::App),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Pending,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(DeliveryStatus::Sent),
            "pending" => Some(DeliveryStatus::Pending),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }
}

/// Immutable audit record, one per dispatch attempt.
///
/// Invariants: `status = sent` implies `sent_via` and `sent_at` are set;
/// `status = pending` means the app fallback was recorded without a
/// confirmed provider delivery; `status = failed` means an error occurred
/// before any channel attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    pub id: Uuid,
    pub store_id: Uuid,
    pub owner_id: Uuid,
    pub notification_type: NotificationCategory,
    pub title: String,
    pub message: String,
    pub sent_via: Option<DeliveryChannel>,
    pub status: DeliveryStatus,
    pub error_message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationLog {
    pub fn sent(
        store_id: Uuid,
        owner_id: Uuid,
        notification_type: NotificationCategory,
        title: String,
        message: String,
        channel: DeliveryChannel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            store_id,
            owner_id,
            notification_type,
            title,
            message,
            sent_via: Some(channel),
            status: DeliveryStatus::Sent,
            error_message: None,
            sent_at: Some(now),
            created_at: now,
        }
    }

    /// App fallback: no channel delivered, kept as a visible trace.
    pub fn app_pending(
        store_id: Uuid,
        owner_id: Uuid,
        notification_type: NotificationCategory,
        title: String,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_id,
            owner_id,
            notification_type,
            title,
            message,
            sent_via: Some(DeliveryChannel::App),
            status: DeliveryStatus::Pending,
            error_message: None,
            sent_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn failed(
        store_id: Uuid,
        owner_id: Uuid,
        notification_type: NotificationCategory,
        title: String,
        message: String,
        error_message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_id,
            owner_id,
            notification_type,
            title,
            message,
            sent_via: None,
            status: DeliveryStatus::Failed,
            error_message: Some(error_message),
            sent_at: None,
            created_at: Utc::now(),
        }
    }
}
