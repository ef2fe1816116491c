use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::notification_settings::NotificationSettings;
use crate::domain::repository::NotificationSettingsRepository;

pub struct SettingsPostgresRepository {
    pool: Arc<PgPool>,
}

impl SettingsPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    store_id: Uuid,
    reminder_before_visit: bool,
    reminder_before_visit_days: i32,
    journal_notification: bool,
    vaccine_alert: bool,
    vaccine_alert_days: i32,
    line_notification_enabled: bool,
    email_notification_enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for NotificationSettings {
    fn from(r: SettingsRow) -> Self {
        NotificationSettings {
            store_id: r.store_id,
            reminder_before_visit: r.reminder_before_visit,
            reminder_before_visit_days: r.reminder_before_visit_days,
            journal_notification: r.journal_notification,
            vaccine_alert: r.vaccine_alert,
            vaccine_alert_days: r.vaccine_alert_days,
            line_notification_enabled: r.line_notification_enabled,
            email_notification_enabled: r.email_notification_enabled,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const SETTINGS_COLUMNS: &str = "store_id, reminder_before_visit, reminder_before_visit_days, \
     journal_notification, vaccine_alert, vaccine_alert_days, \
     line_notification_enabled, email_notification_enabled, created_at, updated_at";

#[async_trait]
impl NotificationSettingsRepository for SettingsPostgresRepository {
    async fn find_by_store(&self, store_id: &Uuid) -> anyhow::Result<Option<NotificationSettings>> {
        let row: Option<SettingsRow> = sqlx::query_as(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM notification_settings WHERE store_id = $1",
        ))
        .bind(store_id)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(row.map(Into::into))
    }

    async fn upsert(&self, settings: &NotificationSettings) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO notification_settings \
             (store_id, reminder_before_visit, reminder_before_visit_days, \
              journal_notification, vaccine_alert, vaccine_alert_days, \
              line_notification_enabled, email_notification_enabled, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (store_id) DO UPDATE SET \
              reminder_before_visit = EXCLUDED.reminder_before_visit, \
              reminder_before_visit_days = EXCLUDED.reminder_before_visit_days, \
              journal_notification = EXCLUDED.journal_notification, \
              vaccine_alert = EXCLUDED.vaccine_alert, \
              vaccine_alert_days = EXCLUDED.vaccine_alert_days, \
              line_notification_enabled = EXCLUDED.line_notification_enabled, \
              email_notification_enabled = EXCLUDED.email_notification_enabled, \
              updated_at = EXCLUDED.updated_at",
        )
        .bind(settings.store_id)
        .bind(settings.reminder_before_visit)
        .bind(settings.reminder_before_visit_days)
        .bind(settings.journal_notification)
        .bind(settings.vaccine_alert)
        .bind(settings.vaccine_alert_days)
        .bind(settings.line_notification_enabled)
        .bind(settings.email_notification_enabled)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }

    async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<NotificationSettings>> {
        let rows: Vec<SettingsRow> = sqlx::query_as(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM notification_settings WHERE reminder_before_visit",
        ))
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_vaccine_alert_enabled(&self) -> anyhow::Result<Vec<NotificationSettings>> {
        let rows: Vec<SettingsRow> = sqlx::query_as(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM notification_settings WHERE vaccine_alert",
        ))
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
