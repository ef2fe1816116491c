use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::dog::DogVaccineDue;
use crate::domain::repository::DogRepository;

pub struct DogPostgresRepository {
    pool: Arc<PgPool>,
}

impl DogPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DogRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    combined_vaccine_date: Option<NaiveDate>,
    rabies_vaccine_date: Option<NaiveDate>,
}

impl From<DogRow> for DogVaccineDue {
    fn from(r: DogRow) -> Self {
        DogVaccineDue {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name,
            combined_vaccine_date: r.combined_vaccine_date,
            rabies_vaccine_date: r.rabies_vaccine_date,
        }
    }
}

#[async_trait]
impl DogRepository for DogPostgresRepository {
    async fn find_vaccine_due(
        &self,
        store_id: &Uuid,
        horizon: NaiveDate,
    ) -> anyhow::Result<Vec<DogVaccineDue>> {
        let rows: Vec<DogRow> = sqlx::query_as(
            "SELECT d.id, d.owner_id, d.name, \
                    d.combined_vaccine_date, d.rabies_vaccine_date \
             FROM dogs d \
             JOIN owners o ON o.id = d.owner_id \
             WHERE o.store_id = $1 \
               AND (d.combined_vaccine_date <= $2 OR d.rabies_vaccine_date <= $2)",
        )
        .bind(store_id)
        .bind(horizon)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
