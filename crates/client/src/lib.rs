//! Client side of the contact manager.
//!
//! - [`api`] talks to `/api/contacts` over HTTP.
//! - [`form`] is the state behind the contact form and the table under it.

pub mod api;
pub mod form;

pub use api::{ClientError, ContactPayload, ContactRecord, ContactsApi, HttpContactsApi};
pub use form::{Confirm, ContactForm, FormData, FormError, FormMode};
