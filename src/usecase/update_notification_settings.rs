use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entity::notification_settings::NotificationSettings;
use crate::domain::repository::NotificationSettingsRepository;

/// Full settings shape as accepted by `PUT …/notifications/settings`.
#[derive(Debug, Clone)]
pub struct UpdateNotificationSettingsInput {
    pub store_id: Uuid,
    pub reminder_before_visit: bool,
    pub reminder_before_visit_days: i32,
    pub journal_notification: bool,
    pub vaccine_alert: bool,
    pub vaccine_alert_days: i32,
    pub line_notification_enabled: bool,
    pub email_notification_enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateNotificationSettingsError {
    #[error("invalid lead days: {0}")]
    InvalidLeadDays(i32),

    #[error("internal error: {0}")]
    Internal(String),
}

pub struct UpdateNotificationSettingsUseCase {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
}

impl UpdateNotificationSettingsUseCase {
    pub fn new(settings_repo: Arc<dyn NotificationSettingsRepository>) -> Self {
        Self { settings_repo }
    }

    pub async fn execute(
        &self,
        input: &UpdateNotificationSettingsInput,
    ) -> Result<NotificationSettings, UpdateNotificationSettingsError> {
        if input.reminder_before_visit_days < 0 {
            return Err(UpdateNotificationSettingsError::InvalidLeadDays(
                input.reminder_before_visit_days,
            ));
        }
        if input.vaccine_alert_days < 0 {
            return Err(UpdateNotificationSettingsError::InvalidLeadDays(
                input.vaccine_alert_days,
            ));
        }

        let existing = self
            .settings_repo
            .find_by_store(&input.store_id)
            .await
            .map_err(|e| UpdateNotificationSettingsError::Internal(e.to_string()))?;

        let created_at = existing
            .map(|s| s.created_at)
            .unwrap_or_else(Utc::now);
        let settings = NotificationSettings {
            store_id: input.store_id,
            reminder_before_visit: input.reminder_before_visit,
            reminder_before_visit_days: input.reminder_before_visit_days,
            journal_notification: input.journal_notification,
            vaccine_alert: input.vaccine_alert,
            vaccine_alert_days: input.vaccine_alert_days,
            line_notification_enabled: input.line_notification_enabled,
            email_notification_enabled: input.email_notification_enabled,
            created_at,
            updated_at: Utc::now(),
        };

        self.settings_repo
            .upsert(&settings)
            .await
            .map_err(|e| UpdateNotificationSettingsError::Internal(e.to_string()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::notification_settings_repository::MockNotificationSettingsRepository;

    fn input(store_id: Uuid) -> UpdateNotificationSettingsInput {
        UpdateNotificationSettingsInput {
            store_id,
            reminder_before_visit: true,
            reminder_before_visit_days: 2,
            journal_notification: false,
            vaccine_alert: true,
            vaccine_alert_days: 30,
            line_notification_enabled: true,
            email_notification_enabled: false,
        }
    }

    #[tokio::test]
    async fn upserts_full_shape() {
        let store_id = Uuid::new_v4();
        let mut settings_mock = MockNotificationSettingsRepository::new();
        settings_mock.expect_find_by_store().returning(|_| Ok(None));
        settings_mock
            .expect_upsert()
            .withf(move |s| {
                s.store_id == store_id
                    && s.reminder_before_visit_days == 2
                    && !s.journal_notification
                    && s.vaccine_alert_days == 30
                    && !s.email_notification_enabled
            })
            .times(1)
            .returning(|_| Ok(()));

        let uc = UpdateNotificationSettingsUseCase::new(Arc::new(settings_mock));
        let settings = uc.execute(&input(store_id)).await.expect("updated");
        assert_eq!(settings.vaccine_alert_days, 30);
    }

    #[tokio::test]
    async fn rejects_negative_lead_days() {
        let settings_mock = MockNotificationSettingsRepository::new();
        let uc = UpdateNotificationSettingsUseCase::new(Arc::new(settings_mock));

        let mut bad = input(Uuid::new_v4());
        bad.reminder_before_visit_days = -1;
        let result = uc.execute(&bad).await;
        assert!(matches!(
            result,
            Err(UpdateNotificationSettingsError::InvalidLeadDays(-1))
        ));
    }
}
