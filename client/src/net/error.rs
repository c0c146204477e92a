//! Portal API error type and server-message extraction.
//!
//! ERROR HANDLING
//! ==============
//! Every API call resolves to `Result<T, ApiError>`. Views never inspect the
//! variant; they call [`ApiError::user_message`] with a per-action fallback and
//! log the full error to the console.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Errors produced by portal API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS).
    #[error("network request failed: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API response error: status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded.
    #[error("API response parse failed: {0}")]
    Decode(String),

    /// Called outside the browser (SSR or native tests).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a `Status` error from a response status and its (possibly empty) body.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body).ok().and_then(|v| extract_error_message(&v));
        Self::Status { status, message }
    }

    /// Server-provided message, when the API sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

/// Pick the most useful human-readable message from an API error body.
///
/// Order: `error`, `detail`, `message`, then the first field error (a string
/// or the first string of an array), scanning keys in map order.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    for key in ["error", "detail", "message"] {
        if let Some(text) = object.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()) {
            return Some(text.to_owned());
        }
    }
    object.values().find_map(first_string)
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}
