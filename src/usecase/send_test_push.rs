use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::OwnerContactRepository;
use crate::domain::service::{DeliveryError, LineMessage, LineSender};

#[derive(Debug, Clone)]
pub struct SendTestPushInput {
    pub store_id: Uuid,
    /// Target owner; when absent, the first LINE-linked owner of the store
    /// is used.
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SendTestPushOutput {
    pub owner_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum SendTestPushError {
    #[error("no LINE-linked owner found for store {0}")]
    NoLinkedOwner(Uuid),

    #[error("owner {0} has no linked LINE account")]
    OwnerNotLinked(Uuid),

    #[error("credentials not configured: {0}")]
    CredentialsMissing(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// One-off test push so operators can verify a store's LINE channel
/// configuration end to end. Does not write an audit row.
pub struct SendTestPushUseCase {
    contact_repo: Arc<dyn OwnerContactRepository>,
    line: Arc<dyn LineSender>,
}

impl SendTestPushUseCase {
    pub fn new(contact_repo: Arc<dyn OwnerContactRepository>, line: Arc<dyn LineSender>) -> Self {
        Self { contact_repo, line }
    }

    pub async fn execute(
        &self,
        input: &SendTestPushInput,
    ) -> Result<SendTestPushOutput, SendTestPushError> {
        let (owner_id, line_user_id) = match input.owner_id {
            Some(owner_id) => {
                let contact = self
                    .contact_repo
                    .resolve(&[owner_id])
                    .await
                    .map_err(|e| SendTestPushError::Internal(e.to_string()))?
                    .remove(&owner_id)
                    .unwrap_or_default();
                let line_user_id = contact
                    .line_user_id
                    .ok_or(SendTestPushError::OwnerNotLinked(owner_id))?;
                (owner_id, line_user_id)
            }
            None => {
                let linked = self
                    .contact_repo
                    .find_line_linked(&input.store_id)
                    .await
                    .map_err(|e| SendTestPushError::Internal(e.to_string()))?
                    .ok_or(SendTestPushError::NoLinkedOwner(input.store_id))?;
                (linked.owner_id, linked.line_user_id)
            }
        };

        let message = LineMessage::Text(
            "Blinkからのテスト通知です。この通知が届いていれば設定は完了しています。".to_string(),
        );
        self.line
            .push(&input.store_id, &line_user_id, &message)
            .await
            .map_err(|e| match e {
                DeliveryError::CredentialsMissing(what) => {
                    SendTestPushError::CredentialsMissing(what)
                }
                other => SendTestPushError::PushFailed(other.to_string()),
            })?;

        Ok(SendTestPushOutput { owner_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::entity::owner_contact::OwnerContact;
    use crate::domain::repository::owner_contact_repository::{
        LineLinkedOwner, MockOwnerContactRepository,
    };
    use crate::domain::service::channel_sender::MockLineSender;

    #[tokio::test]
    async fn pushes_to_specified_owner() {
        let store_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_resolve().returning(move |_| {
            let mut map = HashMap::new();
            map.insert(
                owner_id,
                OwnerContact {
                    line_user_id: Some("U123".to_string()),
                    email: None,
                },
            );
            Ok(map)
        });

        let mut line_mock = MockLineSender::new();
        line_mock
            .expect_push()
            .withf(move |id, to, message| {
                *id == store_id && to == "U123" && matches!(message, LineMessage::Text(_))
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let uc = SendTestPushUseCase::new(Arc::new(contact_mock), Arc::new(line_mock));
        let output = uc
            .execute(&SendTestPushInput {
                store_id,
                owner_id: Some(owner_id),
            })
            .await
            .expect("pushed");
        assert_eq!(output.owner_id, owner_id);
    }

    #[tokio::test]
    async fn auto_selects_linked_owner() {
        let store_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_find_line_linked().returning(move |_| {
            Ok(Some(LineLinkedOwner {
                owner_id,
                line_user_id: "U999".to_string(),
            }))
        });

        let mut line_mock = MockLineSender::new();
        line_mock
            .expect_push()
            .withf(|_, to, _| to == "U999")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let uc = SendTestPushUseCase::new(Arc::new(contact_mock), Arc::new(line_mock));
        let output = uc
            .execute(&SendTestPushInput {
                store_id,
                owner_id: None,
            })
            .await
            .expect("pushed");
        assert_eq!(output.owner_id, owner_id);
    }

    #[tokio::test]
    async fn reports_missing_credentials_by_name() {
        let store_id = Uuid::new_v4();

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_find_line_linked().returning(move |_| {
            Ok(Some(LineLinkedOwner {
                owner_id: Uuid::new_v4(),
                line_user_id: "U1".to_string(),
            }))
        });

        let mut line_mock = MockLineSender::new();
        line_mock.expect_push().returning(|_, _, _| {
            Err(DeliveryError::CredentialsMissing(
                "line channel access token".to_string(),
            ))
        });

        let uc = SendTestPushUseCase::new(Arc::new(contact_mock), Arc::new(line_mock));
        let result = uc
            .execute(&SendTestPushInput {
                store_id,
                owner_id: None,
            })
            .await;
        match result {
            Err(SendTestPushError::CredentialsMissing(what)) => {
                assert_eq!(what, "line channel access token");
            }
            other => unreachable!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn owner_without_line_is_rejected() {
        let store_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock.expect_resolve().returning(move |ids| {
            Ok(ids
                .iter()
                .map(|id| {
                    (
                        *id,
                        OwnerContact {
                            line_user_id: None,
                            email: Some("owner@example.com".to_string()),
                        },
                    )
                })
                .collect())
        });

        let mut line_mock = MockLineSender::new();
        line_mock.expect_push().times(0);

        let uc = SendTestPushUseCase::new(Arc::new(contact_mock), Arc::new(line_mock));
        let result = uc
            .execute(&SendTestPushInput {
                store_id,
                owner_id: Some(owner_id),
            })
            .await;
        assert!(matches!(result, Err(SendTestPushError::OwnerNotLinked(id)) if id == owner_id));
    }

    #[tokio::test]
    async fn no_linked_owner_in_store() {
        let store_id = Uuid::new_v4();

        let mut contact_mock = MockOwnerContactRepository::new();
        contact_mock
            .expect_find_line_linked()
            .returning(|_| Ok(None));

        let uc = SendTestPushUseCase::new(Arc::new(contact_mock), Arc::new(MockLineSender::new()));
        let result = uc
            .execute(&SendTestPushInput {
                store_id,
                owner_id: None,
            })
            .await;
        assert!(matches!(result, Err(SendTestPushError::NoLinkedOwner(id)) if id == store_id));
    }
}
