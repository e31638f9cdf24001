//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` body returned by mutating endpoints that have no
/// resource to echo back.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
