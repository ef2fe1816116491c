use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entity::reservation::ReservationDue;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Non-cancelled reservations of a store on the given date.
    async fn find_scheduled_on(
        &self,
        store_id: &Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<ReservationDue>>;
}
