use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entity::dog::DogVaccineDue;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Dogs of a store whose combined or rabies vaccination date is on or
    /// before the horizon.
    async fn find_vaccine_due(
        &self,
        store_id: &Uuid,
        horizon: NaiveDate,
    ) -> anyhow::Result<Vec<DogVaccineDue>>;
}
