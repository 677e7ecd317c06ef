use async_trait::async_trait;
use cybermind_core::types::ContactId;

use crate::error::StoreError;
use crate::models::contact::{Contact, ContactChanges, NewContact};

/// Document-store primitives the contact endpoint is built on.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// Every record, most recently created first.
    async fn list(&self) -> Result<Vec<Contact>, StoreError>;

    /// Persist a validated record, assigning its identifier and timestamp.
    async fn create(&self, input: &NewContact) -> Result<Contact, StoreError>;

    /// Replace the provided fields. `None` when no record has `id`.
    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, StoreError>;

    /// Remove a record. Returns `true` if one was removed.
    async fn delete(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
