use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entity::dog::DogVaccineDue;
use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::repository::DogRepository;
use crate::domain::repository::NotificationSettingsRepository;
use crate::domain::repository::OwnerContactRepository;
use crate::usecase::dispatch_notification::{DispatchNotificationUseCase, DispatchRequest};
use crate::usecase::SweepSummary;

/// Vaccine alert sweep: for every store with the alert enabled, find dogs
/// whose combined or rabies vaccination date falls within `today +
/// configured alert days` and dispatch one alert per dog.
///
/// No dedup key is kept: re-running the sweep re-sends, which doubles as
/// the recovery path for a failed run.
pub struct VaccineAlertSweep {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
    dog_repo: Arc<dyn DogRepository>,
    contact_repo: Arc<dyn OwnerContactRepository>,
    dispatcher: Arc<DispatchNotificationUseCase>,
}

impl VaccineAlertSweep {
    pub fn new(
        settings_repo: Arc<dyn NotificationSettingsRepository>,
        dog_repo: Arc<dyn DogRepository>,
        contact_repo: Arc<dyn OwnerContactRepository>,
        dispatcher: Arc<DispatchNotificationUseCase>,
    ) -> Self {
        Self {
            settings_repo,
            dog_repo,
            contact_repo,
            dispatcher,
        }
    }

    pub async fn execute(&self, today: NaiveDate) -> anyhow::Result<SweepSummary> {
        let stores = self.settings_repo.find_vaccine_alert_enabled().await?;
        let mut summary = SweepSummary::default();

        for settings in stores {
            let horizon = today + chrono::Duration::days(i64::from(settings.vaccine_alert_days));
            let dogs = match self.dog_repo.find_vaccine_due(&settings.store_id, horizon).await {
                Ok(dogs) => dogs,
                Err(e) => {
                    warn!(store_id = %settings.store_id, error = %e, "failed to fetch vaccine-due dogs, skipping store");
                    summary.failed += 1;
                    continue;
                }
            };
            if dogs.is_empty() {
                continue;
            }

            let mut owner_ids: Vec<Uuid> = dogs.iter().map(|d| d.owner_id).collect();
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
            for dog in dogs {
                let contact = contacts.get(&dog.owner_id).cloned().unwrap_or_default();
                let request = DispatchRequest {
                    store_id: settings.store_id,
                    owner_id: dog.owner_id,
                    category: NotificationCategory::VaccineAlert,
                    title: "ワクチン接種時期のお知らせ".to_string(),
                    message: alert_text(&dog, horizon),
                    line_message: None,
                    email_html: None,
                };
                match self.dispatcher.execute_with(&settings, &contact, &request).await {
                    Ok(_) => summary.dispatched += 1,
                    Err(e) => {
                        warn!(store_id = %settings.store_id, dog_id = %dog.id, error = %e, "vaccine alert dispatch failed");
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            stores = summary.stores,
            dispatched = summary.dispatched,
            failed = summary.failed,
            "vaccine alert sweep finished"
        );
        Ok(summary)
    }
}

fn alert_text(dog: &DogVaccineDue, horizon: NaiveDate) -> String {
    match dog.due_on(horizon) {
        Some(due) => format!(
            "{}ちゃんのワクチン接種時期（{}）が近づいています。接種のご予定をご確認ください。",
            dog.name,
            due.format("%Y年%m月%d日")
        ),
        None => format!(
            "{}ちゃんのワクチン接種時期が近づいています。接種のご予定をご確認ください。",
            dog.name
        ),
    }
}
