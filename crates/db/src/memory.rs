//! In-process [`ContactStore`] for local development and tests.

use std::cmp::Reverse;

use async_trait::async_trait;
use cybermind_core::types::ContactId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::contact::{Contact, ContactChanges, NewContact};
use crate::store::ContactStore;

/// Keeps every record in a vector behind an async lock. Contents are lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let mut contacts = self.contacts.read().await.clone();
        contacts.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(contacts)
    }

    async fn create(&self, input: &NewContact) -> Result<Contact, StoreError> {
        let contact = Contact {
            id: ContactId::generate(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            message: input.message.clone(),
            project_type: input.project_type,
            priority: input.priority,
            created_at: chrono::Utc::now(),
        };
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, StoreError> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|contact| {
            changes.apply_to(contact);
            contact.clone()
        }))
    }

    async fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        Ok(contacts.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
