use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::entity::notification_log::{DeliveryStatus, NotificationLog};

/// Optional filters for the log listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct NotificationLogFilter {
    pub notification_type: Option<NotificationCategory>,
    pub status: Option<DeliveryStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationLogRepository: Send + Sync {
    async fn create(&self, log: &NotificationLog) -> anyhow::Result<()>;
    async fn find_by_store(
        &self,
        store_id: &Uuid,
        filter: &NotificationLogFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<NotificationLog>>;
    async fn count_by_store(
        &self,
        store_id: &Uuid,
        filter: &NotificationLogFilter,
    ) -> anyhow::Result<i64>;
}
