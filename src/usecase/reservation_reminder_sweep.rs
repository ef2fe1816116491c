use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::entity::reservation::ReservationDue;
use crate::domain::repository::NotificationSettingsRepository;
use crate::domain::repository::OwnerContactRepository;
use crate::domain::repository::ReservationRepository;
use crate::domain::service::LineMessage;
use crate::usecase::dispatch_notification::{DispatchNotificationUseCase, DispatchRequest};
use crate::usecase::SweepSummary;

/// Nightly reminder sweep: for every store with reminders enabled, find
/// reservations dated `today + lead days`, resolve contacts in one batch,
/// and dispatch one reminder per reservation through the shared dispatcher.
pub struct ReservationReminderSweep {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
    contact_repo: Arc<dyn OwnerContactRepository>,
    dispatcher: Arc<DispatchNotificationUseCase>,
    liff_url: String,
}

impl ReservationReminderSweep {
    pub fn new(
        settings_repo: Arc<dyn NotificationSettingsRepository>,
        reservation_repo: Arc<dyn ReservationRepository>,
        contact_repo: Arc<dyn OwnerContactRepository>,
        dispatcher: Arc<DispatchNotificationUseCase>,
        liff_url: String,
    ) -> Self {
        Self {
            settings_repo,
            reservation_repo,
            contact_repo,
            dispatcher,
            liff_url,
        }
    }

    /// Runs to completion; store- and row-level failures are logged and
    /// counted, never propagated, so one bad store cannot abort the sweep.
    pub async fn execute(&self, today: NaiveDate) -> anyhow::Result<SweepSummary> {
        let stores = self.settings_repo.find_reminder_enabled().await?;
        let mut summary = SweepSummary::default();

        for settings in stores {
            let target_date =
                today + chrono::Duration::days(i64::from(settings.reminder_before_visit_days));
            let reservations = match self
                .reservation_repo
                .find_scheduled_on(&settings.store_id, target_date)
                .await
            {
                Ok(reservations) => reservations,
                Err(e) => {
                    warn!(store_id = %settings.store_id, error = %e, "failed to fetch reservations, skipping store");
                    summary.failed += 1;
                    continue;
                }
            };
            if reservations.is_empty() {
                continue;
            }

            let mut owner_ids: Vec<Uuid> = reservations.iter().map(|r| r.owner_id).collect();
            owner_ids.sort_unstable();
            owner_ids.dedup();
            let contacts = match self.contact_repo.resolve(&owner_ids).await {
                Ok(contacts) => contacts,
                Err(e) => {
                    warn!(store_id = %settings.store_id, error = %e, "failed to resolve contacts, skipping store");
                    summary.failed += 1;
                    continue;
                }
            };

            summary.stores += 1;
            for reservation in reservations {
                let contact = contacts.get(&reservation.owner_id).cloned().unwrap_or_default();
                let request = DispatchRequest {
                    store_id: settings.store_id,
                    owner_id: reservation.owner_id,
                    category: NotificationCategory::Reminder,
                    title: "ご予約のリマインド".to_string(),
                    message: reminder_text(&reservation),
                    line_message: Some(reminder_flex(&reservation, &self.liff_url)),
                    email_html: Some(reminder_html(&reservation)),
                };
                match self.dispatcher.execute_with(&settings, &contact, &request).await {
                    Ok(_) => summary.dispatched += 1,
                    Err(e) => {
                        warn!(store_id = %settings.store_id, reservation_id = %reservation.id, error = %e, "reminder dispatch failed");
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            stores = summary.stores,
            dispatched = summary.dispatched,
            failed = summary.failed,
            "reservation reminder sweep finished"
        );
        Ok(summary)
    }
}

fn schedule_text(reservation: &ReservationDue) -> String {
    let date = reservation.reservation_date.format("%m月%d日");
    match reservation.start_time {
        Some(time) => format!("{} {}", date, time.format("%H:%M")),
        None => date.to_string(),
    }
}

fn reminder_text(reservation: &ReservationDue) -> String {
    let schedule = schedule_text(reservation);
    match reservation.course_name.as_deref() {
        Some(course) => format!(
            "{}に{}ちゃんのご予約（{}）があります。",
            schedule, reservation.dog_name, course
        ),
        None => format!("{}に{}ちゃんのご予約があります。", schedule, reservation.dog_name),
    }
}

fn reminder_html(reservation: &ReservationDue) -> String {
    format!(
        "<p>{}</p><p>変更やキャンセルは店舗までご連絡ください。</p>",
        reminder_text(reservation)
    )
}

/// Flex card with the reservation details and a call-to-action button that
/// opens the mini-app.
fn reminder_flex(reservation: &ReservationDue, liff_url: &str) -> LineMessage {
    LineMessage::Flex {
        alt_text: "ご予約のリマインド".to_string(),
        contents: json!({
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "text",
                        "text": "ご予約のリマインド",
                        "weight": "bold",
                        "size": "lg"
                    },
                    {
                        "type": "text",
                        "text": reminder_text(reservation),
                        "wrap": true,
                        "margin": "md",
                        "size": "sm"
                    }
                ]
            },
            "footer": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "button",
                        "style": "primary",
                        "action": {
                            "type": "uri",
                            "label": "予約を確認する",
                            "uri": liff_url
                        }
                    }
                ]
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::NaiveTime;

    use crate::domain::entity::notification_log::{DeliveryChannel, DeliveryStatus};
    use crate::domain::entity::notification_settings::NotificationSettings;
    use crate::domain::entity::owner_contact::OwnerContact;
    use crate::domain::repository::notification_log_repository::MockNotificationLogRepository;
    use crate::domain::repository::notification_settings_repository::MockNotificationSettingsRepository;
    use crate::domain::repository::owner_contact_repository::MockOwnerContactRepository;
    use crate::domain::repository::reservation_repository::MockReservationRepository;
    use crate::domain::service::channel_sender::{MockEmailSender, MockLineSender};
    use crate::usecase::dispatch_notification::RetryPolicy;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).expect("valid date")
    }

    fn reservation(owner_id: Uuid) -> ReservationDue {
        ReservationDue {
            id: Uuid::new_v4(),
            owner_id,
            dog_name: "ポチ".to_string(),
            reservation_date: NaiveDate::from_ymd_opt(2026, 8, 24).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(10, 0, 0),
            course_name: Some("トリミング".to_string()),
        }
    }

    fn dispatcher(
        logs: MockNotificationLogRepository,
        line: MockLineSender,
        email: MockEmailSender,
    ) -> Arc<DispatchNotificationUseCase> {
        Arc::new(DispatchNotificationUseCase::new(
            Arc::new(MockNotificationSettingsRepository::new()),
            Arc::new(MockOwnerContactRepository::new()),
            Arc::new(logs),
            Arc::new(line),
            Arc::new(email),
            RetryPolicy::single_attempt(),
        ))
    }

    #[tokio::test]
    async fn dispatches_flex_reminder_per_reservation_with_one_contact_batch() {
        let store_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let mut settings_mock = MockNotificationSettingsRepository::new();
        let mut store_settings = NotificationSettings::default_for_store(store_id);
        store_settings.reminder_before_visit_days = 1;
        settings_mock
            .expect_find_reminder_enabled()
            .returning(move || Ok(vec![store_settings.clone()]));

        let mut reservation_mock = MockReservationRepository::new();
        reservation_mock
            .expect_find_scheduled_on()
            .withf(move |id, date| {
                *id == store_id && *date == NaiveDate::from_ymd_opt(2026, 8, 24).expect("valid date")
            })
            .times(1)
            .returning(move |_, _| Ok(vec![reservation(owner_id), reservation(owner_id)]));

        // Two reservations for the same owner must resolve in one query.
        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock
            .expect_resolve()
            .withf(move |ids| ids == [owner_id])
            .times(1)
            .returning(move |_| {
                let mut map = HashMap::new();
                map.insert(
                    owner_id,
                    OwnerContact {
                        line_user_id: Some("U123".to_string()),
                        email: None,
                    },
                );
                Ok(map)
            });

        let mut line_mock = MockLineSender::new();
        line_mock
            .expect_push()
            .withf(|_, to, message| {
                to == "U123" && matches!(message, LineMessage::Flex { .. })
            })
            .times(2)
            .returning(|_, _, _| Ok(()));

        let mut log_mock = MockNotificationLogRepository::new();
        log_mock
            .expect_create()
            .withf(|log| {
                log.notification_type == NotificationCategory::Reminder
                    && log.sent_via == Some(DeliveryChannel::Line)
                    && log.status == DeliveryStatus::Sent
            })
            .times(2)
            .returning(|_| Ok(()));

        let sweep = ReservationReminderSweep::new(
            Arc::new(settings_mock),
            Arc::new(reservation_mock),
            Arc::new(contact_mock),
            dispatcher(log_mock, line_mock, MockEmailSender::new()),
            "https://liff.line.me/xxxx".to_string(),
        );
        let summary = sweep.execute(today()).await.expect("sweep runs");
        assert_eq!(summary.stores, 1);
        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn store_without_reservations_issues_no_contact_query() {
        let store_id = Uuid::new_v4();

        let mut settings_mock = MockNotificationSettingsRepository::new();
        let store_settings = NotificationSettings::default_for_store(store_id);
        settings_mock
            .expect_find_reminder_enabled()
            .returning(move || Ok(vec![store_settings.clone()]));

        let mut reservation_mock = MockReservationRepository::new();
        reservation_mock
            .expect_find_scheduled_on()
            .returning(|_, _| Ok(vec![]));

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_resolve().times(0);

        let sweep = ReservationReminderSweep::new(
            Arc::new(settings_mock),
            Arc::new(reservation_mock),
            Arc::new(contact_mock),
            dispatcher(
                MockNotificationLogRepository::new(),
                MockLineSender::new(),
                MockEmailSender::new(),
            ),
            "https://liff.line.me/xxxx".to_string(),
        );
        let summary = sweep.execute(today()).await.expect("sweep runs");
        assert_eq!(summary.stores, 0);
        assert_eq!(summary.dispatched, 0);
    }

    #[tokio::test]
    async fn row_failure_does_not_block_following_rows() {
        let store_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let mut settings_mock = MockNotificationSettingsRepository::new();
        let store_settings = NotificationSettings::default_for_store(store_id);
        settings_mock
            .expect_find_reminder_enabled()
            .returning(move || Ok(vec![store_settings.clone()]));

        let mut reservation_mock = MockReservationRepository::new();
        reservation_mock
            .expect_find_scheduled_on()
            .returning(move |_, _| Ok(vec![reservation(owner_id), reservation(owner_id)]));

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_resolve().returning(move |_| {
            let mut map = HashMap::new();
            map.insert(
                owner_id,
                OwnerContact {
                    line_user_id: Some("U123".to_string()),
                    email: None,
                },
            );
            Ok(map)
        });

        let mut line_mock = MockLineSender::new();
        line_mock.expect_push().times(2).returning(|_, _, _| Ok(()));

        // First audit write fails, second succeeds.
        let mut log_mock = MockNotificationLogRepository::new();
        log_mock
            .expect_create()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("insert failed")));
        log_mock.expect_create().times(1).returning(|_| Ok(()));

        let sweep = ReservationReminderSweep::new(
            Arc::new(settings_mock),
            Arc::new(reservation_mock),
            Arc::new(contact_mock),
            dispatcher(log_mock, line_mock, MockEmailSender::new()),
            "https://liff.line.me/xxxx".to_string(),
        );
        let summary = sweep.execute(today()).await.expect("sweep runs");
        assert_eq!(summary.dispatched, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn flex_card_links_into_the_mini_app() {
        let message = reminder_flex(&reservation(Uuid::new_v4()), "https://liff.line.me/xxxx");
        match message {
            LineMessage::Flex { alt_text, contents } => {
                assert_eq!(alt_text, "ご予約のリマインド");
                assert_eq!(
                    contents["footer"]["contents"][0]["action"]["uri"],
                    "https://liff.line.me/xxxx"
                );
            }
            LineMessage::Text(_) => unreachable!("reminder must be a flex card"),
        }
    }

    #[test]
    fn reminder_text_includes_schedule_and_dog() {
        let text = reminder_text(&reservation(Uuid::new_v4()));
        assert!(text.contains("08月24日 10:00"));
        assert!(text.contains("ポチ"));
        assert!(text.contains("トリミング"));
    }
}
