use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::notification_log::NotificationLog;
use crate::domain::repository::notification_log_repository::NotificationLogFilter;
use crate::domain::repository::NotificationLogRepository;

const MAX_PER_PAGE: i64 = 100;
const DEFAULT_PER_PAGE: i64 = 20;

#[derive(Debug, Clone)]
pub struct ListNotificationLogsInput {
    pub store_id: Uuid,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub filter: NotificationLogFilter,
}

#[derive(Debug)]
pub struct ListNotificationLogsOutput {
    pub logs: Vec<NotificationLog>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListNotificationLogsError {
    #[error("internal error: {0}")]
    Internal(String),
}

pub struct ListNotificationLogsUseCase {
    log_repo: Arc<dyn NotificationLogRepository>,
}

impl ListNotificationLogsUseCase {
    pub fn new(log_repo: Arc<dyn NotificationLogRepository>) -> Self {
        Self { log_repo }
    }

    pub async fn execute(
        &self,
        input: &ListNotificationLogsInput,
    ) -> Result<ListNotificationLogsOutput, ListNotificationLogsError> {
        let page = input.page.unwrap_or(1).max(1);
        let per_page = input
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        // page is caller-supplied; keep the offset arithmetic from wrapping.
        let offset = page.saturating_sub(1).saturating_mul(per_page);

        let logs = self
            .log_repo
            .find_by_store(&input.store_id, &input.filter, per_page, offset)
            .await
            .map_err(|e| ListNotificationLogsError::Internal(e.to_string()))?;
        let total = self
            .log_repo
            .count_by_store(&input.store_id, &input.filter)
            .await
            .map_err(|e| ListNotificationLogsError::Internal(e.to_string()))?;

        Ok(ListNotificationLogsOutput {
            logs,
            total,
            page,
            per_page,
        })
    }
}
