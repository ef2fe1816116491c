use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::entity::notification_log::{DeliveryChannel, NotificationLog};
use crate::domain::entity::notification_settings::NotificationSettings;
use crate::domain::entity::owner_contact::OwnerContact;
use crate::domain::repository::NotificationLogRepository;
use crate::domain::repository::NotificationSettingsRepository;
use crate::domain::repository::OwnerContactRepository;
use crate::domain::service::{EmailSender, LineMessage, LineSender};

#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub store_id: Uuid,
    pub owner_id: Uuid,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    /// Overrides the LINE payload; `None` pushes `message` as plain text.
    pub line_message: Option<LineMessage>,
    /// Optional HTML alternative for the email channel.
    pub email_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Category disabled or no settings row. Nothing is logged.
    Skipped,
    /// A provider confirmed delivery; logged as `sent`.
    Delivered(DeliveryChannel),
    /// No channel delivered; logged as the `app`/`pending` fallback.
    Recorded,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// Bounded per-channel retry. Credential absence short-circuits.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

/// The one dispatch path shared by sweeps, the ad hoc send endpoint and any
/// in-process caller: settings gate, channel attempts in preference order
/// (LINE, then email, then the app-only record), and exactly one audit row
/// per dispatched call.
pub struct DispatchNotificationUseCase {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
    contact_repo: Arc<dyn OwnerContactRepository>,
    log_repo: Arc<dyn NotificationLogRepository>,
    line: Arc<dyn LineSender>,
    email: Arc<dyn EmailSender>,
    retry: RetryPolicy,
}

impl DispatchNotificationUseCase {
    pub fn new(
        settings_repo: Arc<dyn NotificationSettingsRepository>,
        contact_repo: Arc<dyn OwnerContactRepository>,
        log_repo: Arc<dyn NotificationLogRepository>,
        line: Arc<dyn LineSender>,
        email: Arc<dyn EmailSender>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            settings_repo,
            contact_repo,
            log_repo,
            line,
            email,
            retry,
        }
    }

    /// Single-send path: fetches settings and the owner's contact itself.
    /// Fetch errors write a `failed` audit row and propagate to the caller.
    pub async fn execute(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let settings = match self.settings_repo.find_by_store(&request.store_id).await {
            Ok(settings) => settings,
            Err(e) => {
                self.write_failed_log(request, &e.to_string()).await;
                return Err(DispatchError::Internal(e.to_string()));
            }
        };
        let Some(settings) = settings else {
            debug!(store_id = %request.store_id, "no notification settings, skipping dispatch");
            return Ok(DispatchOutcome::Skipped);
        };
        if !settings.category_enabled(request.category) {
            return Ok(DispatchOutcome::Skipped);
        }

        let contact = match self.contact_repo.resolve(&[request.owner_id]).await {
            Ok(mut contacts) => contacts.remove(&request.owner_id).unwrap_or_default(),
            Err(e) => {
                self.write_failed_log(request, &e.to_string()).await;
                return Err(DispatchError::Internal(e.to_string()));
            }
        };

        self.execute_with(&settings, &contact, request).await
    }

    /// Sweep path: settings and contacts were fetched once per store batch.
    pub async fn execute_with(
        &self,
        settings: &NotificationSettings,
        contact: &OwnerContact,
        request: &DispatchRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        if !settings.category_enabled(request.category) {
            return Ok(DispatchOutcome::Skipped);
        }

        if settings.line_notification_enabled {
            if let Some(to) = contact.line_user_id.as_deref() {
                let message = request
                    .line_message
                    .clone()
                    .unwrap_or_else(|| LineMessage::Text(request.message.clone()));
                if self.attempt_line(&request.store_id, to, &message).await {
                    self.write_log(NotificationLog::sent(
                        request.store_id,
                        request.owner_id,
                        request.category,
                        request.title.clone(),
                        request.message.clone(),
                        DeliveryChannel::Line,
                    ))
                    .await?;
                    return Ok(DispatchOutcome::Delivered(DeliveryChannel::Line));
                }
            }
        }

        if settings.email_notification_enabled {
            if let Some(to) = contact.email.as_deref() {
                if self
                    .attempt_email(to, &request.title, &request.message, request.email_html.as_deref())
                    .await
                {
                    self.write_log(NotificationLog::sent(
                        request.store_id,
                        request.owner_id,
                        request.category,
                        request.title.clone(),
                        request.message.clone(),
                        DeliveryChannel::Email,
                    ))
                    .await?;
                    return Ok(DispatchOutcome::Delivered(DeliveryChannel::Email));
                }
            }
        }

        self.write_log(NotificationLog::app_pending(
            request.store_id,
            request.owner_id,
            request.category,
            request.title.clone(),
            request.message.clone(),
        ))
        .await?;
        Ok(DispatchOutcome::Recorded)
    }

    async fn attempt_line(&self, store_id: &Uuid, to: &str, message: &LineMessage) -> bool {
        let mut delay = self.retry.initial_delay;
        let max_attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.line.push(store_id, to, message).await {
                Ok(()) => return true,
                Err(e) => {
                    warn!(%store_id, attempt, error = %e, "line push failed");
                    if !e.is_retryable() {
                        return false;
                    }
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(self.retry.max_delay);
            }
        }
        false
    }

    async fn attempt_email(&self, to: &str, subject: &str, text: &str, html: Option<&str>) -> bool {
        let mut delay = self.retry.initial_delay;
        let max_attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.email.send(to, subject, text, html).await {
                Ok(()) => return true,
                Err(e) => {
                    warn!(attempt, error = %e, "email send failed");
                    if !e.is_retryable() {
                        return false;
                    }
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(self.retry.max_delay);
            }
        }
        false
    }

    async fn write_log(&self, log: NotificationLog) -> Result<(), DispatchError> {
        self.log_repo
            .create(&log)
            .await
            .map_err(|e| DispatchError::Internal(e.to_string()))
    }

    /// Best effort: a broken audit store must not mask the original error.
    async fn write_failed_log(&self, request: &DispatchRequest, error_message: &str) {
        let log = NotificationLog::failed(
            request.store_id,
            request.owner_id,
            request.category,
            request.title.clone(),
            request.message.clone(),
            error_message.to_string(),
        );
        if let Err(e) = self.log_repo.create(&log).await {
            error!(error = %e, "failed to write failure audit row");
        }
    }
}
