//! Identity-provider session tokens.
//!
//! - [`jwt`] -- Token verification against the provider's signing key.

pub mod jwt;
