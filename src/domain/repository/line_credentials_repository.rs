use async_trait::async_trait;
use uuid::Uuid;

/// Per-store LINE messaging channel credentials as stored: the access token
/// is AES-256-GCM encrypted at rest and decrypted on demand by the sender.
#[derive(Debug, Clone)]
pub struct EncryptedLineCredentials {
    pub store_id: Uuid,
    pub channel_id: String,
    pub channel_secret_encrypted: String,
    pub access_token_encrypted: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineCredentialsRepository: Send + Sync {
    async fn find_by_store(
        &self,
        store_id: &Uuid,
    ) -> anyhow::Result<Option<EncryptedLineCredentials>>;
}
