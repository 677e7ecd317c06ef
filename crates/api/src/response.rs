//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": ... }` body for operations that return no record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}
