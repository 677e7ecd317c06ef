//! Contact entity model and DTOs.

use cybermind_core::contact::{
    normalize_phone, optional_email, optional_text, parse_variant, require_email, require_text,
    Priority, ProjectType, FIELD_ID, FIELD_MESSAGE, FIELD_NAME, FIELD_PRIORITY,
    FIELD_PROJECT_TYPE,
};
use cybermind_core::error::{CoreError, FieldErrors};
use cybermind_core::types::{ContactId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `contacts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    #[sqlx(try_from = "Uuid")]
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub created_at: Timestamp,
}

/// Request body for creating a contact.
///
/// Every field is optional at the wire level so that missing fields are
/// reported alongside invalid ones instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub project_type: Option<String>,
    pub priority: Option<String>,
}

/// A create request that passed validation. `priority` is already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub project_type: ProjectType,
    pub priority: Priority,
}

impl CreateContact {
    /// Check the whole record, collecting every failing field.
    pub fn validate(&self) -> Result<NewContact, CoreError> {
        let mut errors = FieldErrors::new();

        let name = require_text(&mut errors, FIELD_NAME, self.name.as_deref(), "Name is required");
        let email = require_email(&mut errors, self.email.as_deref());
        let message = require_text(
            &mut errors,
            FIELD_MESSAGE,
            self.message.as_deref(),
            "Message is required",
        );
        let project_type = if self.project_type.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            parse_variant(&mut errors, FIELD_PROJECT_TYPE, self.project_type.as_deref())
        } else {
            errors.add(FIELD_PROJECT_TYPE, "Project type is required");
            None
        };
        let priority = parse_variant(&mut errors, FIELD_PRIORITY, self.priority.as_deref());

        match (name, email, message, project_type) {
            (Some(name), Some(email), Some(message), Some(project_type)) if errors.is_empty() => {
                Ok(NewContact {
                    name,
                    email,
                    phone: normalize_phone(self.phone.as_deref()),
                    message,
                    project_type,
                    priority: priority.unwrap_or_default(),
                })
            }
            _ => Err(CoreError::Validation(errors)),
        }
    }
}

/// Request body for updating a contact: the identifier plus any fields to
/// replace. Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// An empty string clears the stored phone number.
    pub phone: Option<String>,
    pub message: Option<String>,
    pub project_type: Option<String>,
    pub priority: Option<String>,
}

/// Field replacements that passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the phone number.
    pub phone: Option<Option<String>>,
    pub message: Option<String>,
    pub project_type: Option<ProjectType>,
    pub priority: Option<Priority>,
}

impl UpdateContact {
    /// Check the identifier and every provided field.
    pub fn validate(&self) -> Result<(ContactId, ContactChanges), CoreError> {
        let mut errors = FieldErrors::new();

        let id = match self.id.as_deref() {
            None => {
                errors.add(FIELD_ID, "Contact id is required");
                None
            }
            Some(raw) => match raw.parse::<ContactId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add(FIELD_ID, format!("'{raw}' is not a valid contact id"));
                    None
                }
            },
        };

        let changes = ContactChanges {
            name: optional_text(&mut errors, FIELD_NAME, self.name.as_deref(), "Name is required"),
            email: optional_email(&mut errors, self.email.as_deref()),
            phone: self.phone.as_deref().map(|p| normalize_phone(Some(p))),
            message: optional_text(
                &mut errors,
                FIELD_MESSAGE,
                self.message.as_deref(),
                "Message is required",
            ),
            project_type: parse_variant(&mut errors, FIELD_PROJECT_TYPE, self.project_type.as_deref()),
            priority: parse_variant(&mut errors, FIELD_PRIORITY, self.priority.as_deref()),
        };

        match id {
            Some(id) if errors.is_empty() => Ok((id, changes)),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}

impl ContactChanges {
    /// Apply the replacements to an in-memory record.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(message) = &self.message {
            contact.message = message.clone();
        }
        if let Some(project_type) = self.project_type {
            contact.project_type = project_type;
        }
        if let Some(priority) = self.priority {
            contact.priority = priority;
        }
    }
}

/// Request body for deleting a contact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteContact {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

impl DeleteContact {
    /// The record to remove, if the body names a well-formed identifier.
    /// Anything else cannot match a stored record.
    pub fn target(&self) -> Option<ContactId> {
        self.id.as_deref()?.parse().ok()
    }
}
