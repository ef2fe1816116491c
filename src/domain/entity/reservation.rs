use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Reservation row eligible for a visit reminder: non-cancelled and dated
/// on the sweep's target date.
#[derive(Debug, Clone)]
pub struct ReservationDue {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub dog_name: String,
    pub reservation_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub course_name: Option<String>,
}
