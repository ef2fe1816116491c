use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::LineCredentialsRepository;
use crate::domain::service::{DeliveryError, LineMessage, LineSender};
use crate::infrastructure::encryption::CredentialCipher;

/// LINE Messaging API push client. Channel credentials are per store,
/// fetched and decrypted on each push rather than cached, so credential
/// rotation takes effect immediately.
pub struct LineApiClient {
    credentials_repo: Arc<dyn LineCredentialsRepository>,
    cipher: Arc<CredentialCipher>,
    client: Client,
    endpoint: String,
}

impl LineApiClient {
    pub fn new(
        credentials_repo: Arc<dyn LineCredentialsRepository>,
        cipher: Arc<CredentialCipher>,
        endpoint: String,
    ) -> Self {
        Self {
            credentials_repo,
            cipher,
            client: Client::new(),
            endpoint,
        }
    }
}

fn message_payload(message: &LineMessage) -> serde_json::Value {
    match message {
        LineMessage::Text(text) => json!({ "type": "text", "text": text }),
        LineMessage::Flex { alt_text, contents } => json!({
            "type": "flex",
            "altText": alt_text,
            "contents": contents,
        }),
    }
}

#[async_trait]
impl LineSender for LineApiClient {
    async fn push(
        &self,
        store_id: &Uuid,
        to: &str,
        message: &LineMessage,
    ) -> Result<(), DeliveryError> {
        let credentials = self
            .credentials_repo
            .find_by_store(store_id)
            .await
            .map_err(|e| DeliveryError::Other(e.to_string()))?
            .ok_or_else(|| {
                DeliveryError::CredentialsMissing("line channel access token".to_string())
            })?;

        let access_token = self
            .cipher
            .decrypt_string(&credentials.access_token_encrypted)
            .map_err(|e| {
                DeliveryError::AuthenticationFailed(format!("access token decryption failed: {e}"))
            })?;

        let payload = json!({
            "to": to,
            "messages": [message_payload(message)],
        });

        let response = self
            .client
            .post(format!("{}/v2/bot/message/push", self.endpoint))
            .bearer_auth(access_token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DeliveryError::AuthenticationFailed(
                "LINE rejected the channel access token".to_string(),
            ));
        }
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(DeliveryError::Rejected(format!(
                "LINE returned {}: {}",
                status, body_text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::line_credentials_repository::MockLineCredentialsRepository;

    fn cipher() -> Arc<CredentialCipher> {
        Arc::new(CredentialCipher::new([7u8; 32]))
    }

    #[test]
    fn text_payload_shape() {
        let payload = message_payload(&LineMessage::Text("こんにちは".to_string()));
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["text"], "こんにちは");
    }

    #[test]
    fn flex_payload_shape() {
        let payload = message_payload(&LineMessage::Flex {
            alt_text: "ご予約のリマインド".to_string(),
            contents: json!({ "type": "bubble" }),
        });
        assert_eq!(payload["type"], "flex");
        assert_eq!(payload["altText"], "ご予約のリマインド");
        assert_eq!(payload["contents"]["type"], "bubble");
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit() {
        let mut repo = MockLineCredentialsRepository::new();
        repo.expect_find_by_store().returning(|_| Ok(None));

        let client = LineApiClient::new(
            Arc::new(repo),
            cipher(),
            "https://api.line.me".to_string(),
        );
        let result = client
            .push(
                &Uuid::new_v4(),
                "U123",
                &LineMessage::Text("test".to_string()),
            )
            .await;
        assert!(matches!(result, Err(DeliveryError::CredentialsMissing(_))));
    }

    #[tokio::test]
    async fn undecryptable_token_is_an_auth_failure() {
        let mut repo = MockLineCredentialsRepository::new();
        repo.expect_find_by_store().returning(|store_id| {
            Ok(Some(
                crate::domain::repository::line_credentials_repository::EncryptedLineCredentials {
                    store_id: *store_id,
                    channel_id: "1234567890".to_string(),
                    channel_secret_encrypted: "xxxx".to_string(),
                    access_token_encrypted: "not-a-valid-ciphertext".to_string(),
                },
            ))
        });

        let client = LineApiClient::new(
            Arc::new(repo),
            cipher(),
            "https://api.line.me".to_string(),
        );
        let result = client
            .push(
                &Uuid::new_v4(),
                "U123",
                &LineMessage::Text("test".to_string()),
            )
            .await;
        assert!(matches!(result, Err(DeliveryError::AuthenticationFailed(_))));
    }
}
