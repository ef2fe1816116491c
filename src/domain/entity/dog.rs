use chrono::NaiveDate;
use uuid::Uuid;

/// Dog whose combined or rabies vaccination date falls on or before the
/// sweep's alert horizon.
#[derive(Debug, Clone)]
pub struct DogVaccineDue {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub combined_vaccine_date: Option<NaiveDate>,
    pub rabies_vaccine_date: Option<NaiveDate>,
}

impl DogVaccineDue {
    /// Earliest vaccination date at or before the horizon, used in the
    /// alert body. Rows returned by the repository always have at least one
    /// date within the horizon.
    pub fn due_on(&self, horizon: NaiveDate) -> Option<NaiveDate> {
        [self.combined_vaccine_date, self.rabies_vaccine_date]
            .into_iter()
            .flatten()
            .filter(|d| *d <= horizon)
            .min()
    }
}
