//! Standardized JSON envelope used by every API endpoint.

use serde::Serialize;

/// Every JSON answer of the API has the same shape: an optional human
/// readable `message` and a `data` payload that is always present, `null`
/// when there is nothing to return.
#[derive(Serialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: serde_json::Value,
}

impl ApiResponse {
    /// Envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: serde_json::Value::Null,
        }
    }
}
