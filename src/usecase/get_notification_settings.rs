use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::notification_settings::NotificationSettings;
use crate::domain::repository::NotificationSettingsRepository;

#[derive(Debug, thiserror::Error)]
pub enum GetNotificationSettingsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// Settings read with lazy creation: a store without a row gets defaults
/// persisted on first read.
pub struct GetNotificationSettingsUseCase {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
}

impl GetNotificationSettingsUseCase {
    pub fn new(settings_repo: Arc<dyn NotificationSettingsRepository>) -> Self {
        Self { settings_repo }
    }

    pub async fn execute(
        &self,
        store_id: &Uuid,
    ) -> Result<NotificationSettings, GetNotificationSettingsError> {
        let existing = self
            .settings_repo
            .find_by_store(store_id)
            .await
            .map_err(|e| GetNotificationSettingsError::Internal(e.to_string()))?;

        if let Some(settings) = existing {
            return Ok(settings);
        }

        let defaults = NotificationSettings::default_for_store(*store_id);
        self.settings_repo
            .upsert(&defaults)
            .await
            .map_err(|e| GetNotificationSettingsError::Internal(e.to_string()))?;
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::notification_settings_repository::MockNotificationSettingsRepository;

    #[tokio::test]
    async fn returns_existing_row() {
        let store_id = Uuid::new_v4();
        let mut settings_mock = MockNotificationSettingsRepository::new();
        let mut stored = NotificationSettings::default_for_store(store_id);
        stored.vaccine_alert_days = 30;
        settings_mock
            .expect_find_by_store()
            .returning(move |_| Ok(Some(stored.clone())));
        settings_mock.expect_upsert().times(0);

        let uc = GetNotificationSettingsUseCase::new(Arc::new(settings_mock));
        let settings = uc.execute(&store_id).await.expect("found");
        assert_eq!(settings.vaccine_alert_days, 30);
    }

    #[tokio::test]
    async fn first_read_creates_defaults() {
        let store_id = Uuid::new_v4();
        let mut settings_mock = MockNotificationSettingsRepository::new();
        settings_mock.expect_find_by_store().returning(|_| Ok(None));
        settings_mock
            .expect_upsert()
            .withf(move |s| s.store_id == store_id && s.reminder_before_visit)
            .times(1)
            .returning(|_| Ok(()));

        let uc = GetNotificationSettingsUseCase::new(Arc::new(settings_mock));
        let settings = uc.execute(&store_id).await.expect("created");
        assert_eq!(settings.store_id, store_id);
        assert_eq!(settings.reminder_before_visit_days, 1);
    }
}
