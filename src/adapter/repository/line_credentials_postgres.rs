use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repository::line_credentials_repository::EncryptedLineCredentials;
use crate::domain::repository::LineCredentialsRepository;

pub struct LineCredentialsPostgresRepository {
    pool: Arc<PgPool>,
}

impl LineCredentialsPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    store_id: Uuid,
    channel_id: String,
    channel_secret_encrypted: String,
    access_token_encrypted: String,
}

impl From<CredentialsRow> for EncryptedLineCredentials {
    fn from(r: CredentialsRow) -> Self {
        EncryptedLineCredentials {
            store_id: r.store_id,
            channel_id: r.channel_id,
            channel_secret_encrypted: r.channel_secret_encrypted,
            access_token_encrypted: r.access_token_encrypted,
        }
    }
}

#[async_trait]
impl LineCredentialsRepository for LineCredentialsPostgresRepository {
    async fn find_by_store(
        &self,
        store_id: &Uuid,
    ) -> anyhow::Result<Option<EncryptedLineCredentials>> {
        let row: Option<CredentialsRow> = sqlx::query_as(
            "SELECT store_id, channel_id, channel_secret_encrypted, access_token_encrypted \
             FROM store_line_credentials WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(row.map(Into::into))
    }
}
