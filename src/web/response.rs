//! Error response shape for failed scope checks.

use serde::Serialize;

use crate::config::StatusMode;
use crate::error::ScopeError;

/// Response body and status for a failed check.
///
/// Serializes to the common `{ "statusCode", "error", "message" }` JSON
/// shape. `message` is always the fixed message of the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase for `status_code`
    pub error: &'static str,
    /// Fixed error message
    pub message: &'static str,
}

impl ErrorResponse {
    /// Builds the response for `err` under the given status mapping.
    pub fn from_error(err: &ScopeError, mode: StatusMode) -> Self {
        let status_code = mode.status_for(err.kind());
        Self {
            status_code,
            error: reason_phrase(status_code),
            message: err.message(),
        }
    }

    /// Serializes the response body to JSON.
    pub fn to_json(&self) -> String {
        // Serializing a struct of integers and static strings cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        401 => "Unauthorized",
        403 => "Forbidden",
        _ => "Internal Server Error",
    }
}
