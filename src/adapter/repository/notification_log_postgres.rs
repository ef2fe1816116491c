use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::entity::notification_log::{DeliveryChannel, DeliveryStatus, NotificationLog};
use crate::domain::repository::notification_log_repository::NotificationLogFilter;
use crate::domain::repository::NotificationLogRepository;

pub struct NotificationLogPostgresRepository {
    pool: Arc<PgPool>,
}

impl NotificationLogPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    store_id: Uuid,
    owner_id: Uuid,
    notification_type: String,
    title: String,
    message: String,
    sent_via: Option<String>,
    status: String,
    error_message: Option<String>,
    sent_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for NotificationLog {
    type Error = anyhow::Error;

    fn try_from(r: LogRow) -> Result<Self, Self::Error> {
        let notification_type = NotificationCategory::parse(&r.notification_type)
            .ok_or_else(|| anyhow!("unknown notification_type: {}", r.notification_type))?;
        let status = DeliveryStatus::parse(&r.status)
            .ok_or_else(|| anyhow!("unknown status: {}", r.status))?;
        let sent_via = r
            .sent_via
            .as_deref()
            .map(|s| DeliveryChannel::parse(s).ok_or_else(|| anyhow!("unknown sent_via: {}", s)))
            .transpose()?;

        Ok(NotificationLog {
            id: r.id,
            store_id: r.store_id,
            owner_id: r.owner_id,
            notification_type,
            title: r.title,
            message: r.message,
            sent_via,
            status,
            error_message: r.error_message,
            sent_at: r.sent_at,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl NotificationLogRepository for NotificationLogPostgresRepository {
    async fn create(&self, log: &NotificationLog) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO notification_logs \
             (id, store_id, owner_id, notification_type, title, message, \
              sent_via, status, error_message, sent_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(log.id)
        .bind(log.store_id)
        .bind(log.owner_id)
        .bind(log.notification_type.as_str())
        .bind(&log.title)
        .bind(&log.message)
        .bind(log.sent_via.map(|c| c.as_str()))
        .bind(log.status.as_str())
        .bind(&log.error_message)
        .bind(log.sent_at)
        .bind(log.created_at)
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }

    async fn find_by_store(
        &self,
        store_id: &Uuid,
        filter: &NotificationLogFilter,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<NotificationLog>> {
        let rows: Vec<LogRow> = sqlx::query_as(
            "SELECT id, store_id, owner_id, notification_type, title, message, \
                    sent_via, status, error_message, sent_at, created_at \
             FROM notification_logs \
             WHERE store_id = $1 \
               AND ($2::text IS NULL OR notification_type = $2) \
               AND ($3::text IS NULL OR status = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5",
        )
        .bind(store_id)
        .bind(filter.notification_type.map(|c| c.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count_by_store(
        &self,
        store_id: &Uuid,
        filter: &NotificationLogFilter,
    ) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notification_logs \
             WHERE store_id = $1 \
               AND ($2::text IS NULL OR notification_type = $2) \
               AND ($3::text IS NULL OR status = $3)",
        )
        .bind(store_id)
        .bind(filter.notification_type.map(|c| c.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(count)
    }
}
