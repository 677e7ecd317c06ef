//! State behind the contact form and the table of stored contacts.
//!
//! The form is in create mode until a record is loaded for editing. Every
//! mutation is followed by a full re-fetch of the list; local state is never
//! patched. Network failures are logged and otherwise ignored, leaving the
//! form as it was.

use cybermind_core::contact::{
    Priority, ProjectType, UnknownVariant, FIELD_EMAIL, FIELD_MESSAGE, FIELD_NAME, FIELD_PHONE,
    FIELD_PRIORITY, FIELD_PROJECT_TYPE,
};
use cybermind_core::types::ContactId;

use crate::api::{ContactPayload, ContactRecord, ContactsApi};

/// Question asked before a contact is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this contact?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    InvalidValue(#[from] UnknownVariant),
}

/// Values currently typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub project_type: ProjectType,
    pub priority: Priority,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            project_type: ProjectType::AiModel,
            priority: Priority::Medium,
        }
    }
}

impl FormData {
    /// Set one field by its wire name (`projectType`, not `project_type`).
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            FIELD_NAME => self.name = value.to_string(),
            FIELD_EMAIL => self.email = value.to_string(),
            FIELD_PHONE => self.phone = value.to_string(),
            FIELD_MESSAGE => self.message = value.to_string(),
            FIELD_PROJECT_TYPE => self.project_type = value.parse()?,
            FIELD_PRIORITY => self.priority = value.parse()?,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            project_type: self.project_type,
            priority: self.priority,
        }
    }
}

impl From<&ContactRecord> for FormData {
    fn from(record: &ContactRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            message: record.message.clone(),
            project_type: record.project_type,
            priority: record.priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ContactId),
}

pub struct ContactForm<A> {
    api: A,
    fields: FormData,
    contacts: Vec<ContactRecord>,
    editing_id: Option<ContactId>,
    is_loading: bool,
}

impl<A: ContactsApi> ContactForm<A> {
    /// An empty form in create mode. Call [`ContactForm::refresh`] to load
    /// the list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            fields: FormData::default(),
            contacts: Vec::new(),
            editing_id: None,
            is_loading: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn fields(&self) -> &FormData {
        &self.fields
    }

    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn editing_id(&self) -> Option<ContactId> {
        self.editing_id
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Add New Contact",
            FormMode::Edit(_) => "Edit Contact",
        }
    }

    /// Text of the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.is_loading {
            "Processing..."
        } else if self.editing_id.is_some() {
            "Update Contact"
        } else {
            "Add Contact"
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.fields.set(field, value)
    }

    /// Replace the list with the server's current contents.
    pub async fn refresh(&mut self) {
        self.is_loading = true;
        self.fetch_contacts().await;
        self.is_loading = false;
    }

    /// Create or update according to [`ContactForm::mode`]. On success the
    /// form is cleared, edit mode ends and the list is re-fetched.
    pub async fn submit(&mut self) {
        self.is_loading = true;

        let payload = self.fields.to_payload();
        let result = match self.editing_id {
            Some(id) => self.api.update(id, &payload).await,
            None => self.api.create(&payload).await,
        };

        match result {
            Ok(contact) => {
                tracing::debug!(id = %contact.id, "Contact saved");
                self.reset();
                self.fetch_contacts().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to save contact"),
        }

        self.is_loading = false;
    }

    /// Load a record into the form and switch to edit mode.
    pub fn edit(&mut self, contact: &ContactRecord) {
        self.fields = FormData::from(contact);
        self.editing_id = Some(contact.id);
    }

    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Delete after the user confirms, then re-fetch. Declining does nothing.
    pub async fn delete(&mut self, id: ContactId, confirm: &dyn Confirm) {
        if !confirm.confirm(DELETE_PROMPT) {
            return;
        }

        self.is_loading = true;
        match self.api.delete(id).await {
            Ok(()) => self.fetch_contacts().await,
            Err(e) => tracing::error!(%id, error = %e, "Failed to delete contact"),
        }
        self.is_loading = false;
    }

    fn reset(&mut self) {
        self.fields = FormData::default();
        self.editing_id = None;
    }

    async fn fetch_contacts(&mut self) {
        match self.api.list().await {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => tracing::error!(error = %e, "Failed to fetch contacts"),
        }
    }
}
