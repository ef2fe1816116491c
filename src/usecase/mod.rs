pub mod dispatch_notification;
pub mod get_notification_settings;
pub mod list_notification_logs;
pub mod reservation_reminder_sweep;
pub mod send_test_push;
pub mod update_notification_settings;
pub mod vaccine_alert_sweep;

pub use dispatch_notification::DispatchNotificationUseCase;
pub use get_notification_settings::GetNotificationSettingsUseCase;
pub use list_notification_logs::ListNotificationLogsUseCase;
pub use reservation_reminder_sweep::ReservationReminderSweep;
pub use send_test_push::SendTestPushUseCase;
pub use update_notification_settings::UpdateNotificationSettingsUseCase;
pub use vaccine_alert_sweep::VaccineAlertSweep;

/// Result counters for one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub stores: usize,
    pub dispatched: usize,
    pub failed: usize,
}
