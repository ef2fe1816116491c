use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::owner_contact::OwnerContact;

/// Owner already linked to LINE, used by the test-push endpoint when no
/// owner is specified.
#[derive(Debug, Clone)]
pub struct LineLinkedOwner {
    pub owner_id: Uuid,
    pub line_user_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerContactRepository: Send + Sync {
    /// Batch contact resolution. Every requested ID appears in the result
    /// map (owners without a row resolve to both fields null), so callers
    /// never need an existence check. Empty input returns an empty map
    /// without touching the database.
    async fn resolve(&self, owner_ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, OwnerContact>>;

    /// First LINE-linked owner of a store, if any.
    async fn find_line_linked(&self, store_id: &Uuid) -> anyhow::Result<Option<LineLinkedOwner>>;
}
