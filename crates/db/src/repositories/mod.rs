//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`PgContactStore`] adapts
//! them to the [`ContactStore`](crate::ContactStore) trait.

pub mod contact_repo;

pub use contact_repo::{ContactRepo, PgContactStore};
