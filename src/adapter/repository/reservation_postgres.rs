use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::reservation::ReservationDue;
use crate::domain::repository::ReservationRepository;

pub struct ReservationPostgresRepository {
    pool: Arc<PgPool>,
}

impl ReservationPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    owner_id: Uuid,
    dog_name: String,
    reservation_date: NaiveDate,
    start_time: Option<NaiveTime>,
    course_name: Option<String>,
}

impl From<ReservationRow> for ReservationDue {
    fn from(r: ReservationRow) -> Self {
        ReservationDue {
            id: r.id,
            owner_id: r.owner_id,
            dog_name: r.dog_name,
            reservation_date: r.reservation_date,
            start_time: r.start_time,
            course_name: r.course_name,
        }
    }
}

#[async_trait]
impl ReservationRepository for ReservationPostgresRepository {
    async fn find_scheduled_on(
        &self,
        store_id: &Uuid,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<ReservationDue>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            "SELECT r.id, r.owner_id, d.name AS dog_name, \
                    r.reservation_date, r.start_time, r.course_name \
             FROM reservations r \
             JOIN dogs d ON d.id = r.dog_id \
             WHERE r.store_id = $1 \
               AND r.reservation_date = $2 \
               AND r.status <> 'cancelled' \
             ORDER BY r.start_time",
        )
        .bind(store_id)
        .bind(date)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
