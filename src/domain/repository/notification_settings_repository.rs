use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::notification_settings::NotificationSettings;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    async fn find_by_store(&self, store_id: &Uuid) -> anyhow::Result<Option<NotificationSettings>>;
    async fn upsert(&self, settings: &NotificationSettings) -> anyhow::Result<()>;
    /// Stores whose reminder toggle is on, for the reminder sweep.
    async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<NotificationSettings>>;
    /// Stores whose vaccine alert toggle is on, for the vaccine sweep.
    async fn find_vaccine_alert_enabled(&self) -> anyhow::Result<Vec<NotificationSettings>>;
}
