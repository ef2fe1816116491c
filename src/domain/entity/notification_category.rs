use serde::{Deserialize, Serialize};

/// Notification categories understood by the dispatcher. Stored as text in
/// `notification_logs.notification_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Reminder,
    Journal,
    VaccineAlert,
    RecordShared,
    PaymentFailed,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Reminder => "reminder",
            NotificationCategory::Journal => "journal",
            NotificationCategory::VaccineAlert => "vaccine_alert",
            NotificationCategory::RecordShared => "record_shared",
            NotificationCategory::PaymentFailed => "payment_failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reminder" => Some(NotificationCategory::Reminder),
            "journal" => Some(NotificationCategory::Journal),
            "vaccine_alert" => Some(NotificationCategory::VaccineAlert),
            "record_shared" => Some(NotificationCategory::RecordShared),
            "payment_failed" => Some(NotificationCategory::PaymentFailed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for category in [
            NotificationCategory::Reminder,
            NotificationCategory::Journal,
            NotificationCategory::VaccineAlert,
            NotificationCategory::RecordShared,
            NotificationCategory::PaymentFailed,
        ] {
            assert_eq!(NotificationCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(NotificationCategory::parse("push"), None);
    }
}
