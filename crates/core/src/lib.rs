//! Domain types shared by the contact server and its client.
//!
//! Nothing in this crate performs I/O. It owns the vocabulary of a contact
//! record (identifiers, enumerated fields, the email pattern) and the
//! validation helpers both sides rely on.

pub mod contact;
pub mod error;
pub mod types;
