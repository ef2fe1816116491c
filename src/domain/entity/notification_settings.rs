use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;

/// Per-store notification toggles and lead times. One row per store,
/// upserted, never deleted. Created lazily with defaults on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub store_id: Uuid,
    pub reminder_before_visit: bool,
    pub reminder_before_visit_days: i32,
    pub journal_notification: bool,
    pub vaccine_alert: bool,
    pub vaccine_alert_days: i32,
    pub line_notification_enabled: bool,
    pub email_notification_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSettings {
    pub fn default_for_store(store_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            store_id,
            reminder_before_visit: true,
            reminder_before_visit_days: 1,
            journal_notification: true,
            vaccine_alert: true,
            vaccine_alert_days: 14,
            line_notification_enabled: true,
            email_notification_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Settings gate: whether a category may dispatch at all for this store.
    /// Categories without a dedicated toggle (shared records, payment
    /// failures) pass whenever a settings row exists.
    pub fn category_enabled(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::Reminder => self.reminder_before_visit,
            NotificationCategory::Journal => self.journal_notification,
            NotificationCategory::VaccineAlert => self.vaccine_alert,
            NotificationCategory::RecordShared | NotificationCategory::PaymentFailed => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let settings = NotificationSettings::default_for_store(Uuid::new_v4());
        assert!(settings.reminder_before_visit);
        assert_eq!(settings.reminder_before_visit_days, 1);
        assert!(settings.vaccine_alert);
        assert_eq!(settings.vaccine_alert_days, 14);
        assert!(settings.line_notification_enabled);
        assert!(settings.email_notification_enabled);
    }

    #[test]
    fn category_gate_follows_toggles() {
        let mut settings = NotificationSettings::default_for_store(Uuid::new_v4());
        settings.reminder_before_visit = false;
        settings.vaccine_alert = false;

        assert!(!settings.category_enabled(NotificationCategory::Reminder));
        assert!(!settings.category_enabled(NotificationCategory::VaccineAlert));
        assert!(settings.category_enabled(NotificationCategory::Journal));
    }

    #[test]
    fn untoggled_categories_always_pass() {
        let mut settings = NotificationSettings::default_for_store(Uuid::new_v4());
        settings.reminder_before_visit = false;
        settings.journal_notification = false;
        settings.vaccine_alert = false;

        assert!(settings.category_enabled(NotificationCategory::RecordShared));
        assert!(settings.category_enabled(NotificationCategory::PaymentFailed));
    }
}
