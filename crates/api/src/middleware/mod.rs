//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the signed-in user from a Bearer token.

pub mod auth;
