//! Handlers for the `/contacts` resource.
//!
//! The identifier travels in the JSON body on update and delete, so every
//! verb shares one path.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cybermind_core::contact::ENTITY_CONTACT;
use cybermind_core::error::CoreError;
use cybermind_db::models::contact::{Contact, CreateContact, DeleteContact, UpdateContact};

use crate::error::{AppError, AppResult, ResultExt};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Body returned by every delete, whether or not a record existed.
pub const DELETED_MESSAGE: &str = "Contact deleted successfully";

/// GET /api/contacts
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    let contacts = state.store.list().await.context("Failed to fetch contacts")?;
    tracing::debug!(count = contacts.len(), "Listed contacts");
    Ok(Json(contacts))
}

/// POST /api/contacts
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateContact>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    const FAILED: &str = "Failed to create contact";

    let Json(input) = payload.context(FAILED)?;
    let new = input.validate().context(FAILED)?;
    let contact = state.store.create(&new).await.context(FAILED)?;

    tracing::info!(id = %contact.id, subject = ?user.subject, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts
///
/// Replaces the provided fields of the record named by `_id`. Last write
/// wins; there is no version check.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateContact>, JsonRejection>,
) -> AppResult<Json<Contact>> {
    const FAILED: &str = "Failed to update contact";

    let Json(input) = payload.context(FAILED)?;
    let (id, changes) = input.validate().context(FAILED)?;
    let contact = state
        .store
        .update(id, &changes)
        .await
        .map_err(AppError::from)
        .and_then(|updated| {
            updated.ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: ENTITY_CONTACT,
                    id: id.to_string(),
                })
            })
        })
        .context(FAILED)?;

    tracing::info!(id = %contact.id, subject = ?user.subject, "Contact updated");
    Ok(Json(contact))
}

/// DELETE /api/contacts
///
/// Idempotent: an unknown or malformed `_id` still reports success.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<DeleteContact>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    const FAILED: &str = "Failed to delete contact";

    let Json(input) = payload.context(FAILED)?;
    match input.target() {
        Some(id) => {
            let removed = state.store.delete(id).await.context(FAILED)?;
            tracing::info!(%id, removed, subject = ?user.subject, "Contact deleted");
        }
        None => {
            tracing::debug!(raw_id = ?input.id, "Delete requested for an id that cannot exist");
        }
    }

    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
