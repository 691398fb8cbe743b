//! Error types for the target-group API client.
//!
//! # Design
//! A 404 on read is not an error at all (see `Lookup`), so there is no
//! `NotFound` variant. Every other non-2xx response lands in `HttpError` with
//! the status code and whatever message the server offered.

use thiserror::Error;

/// Coarse classification used by callers that only care where a failure
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection failures, timeouts and cancellation.
    Transport,
    /// The server answered with a non-2xx status.
    Application,
    /// The response body was not the JSON we expected.
    Decode,
    /// The request payload could not be encoded.
    Encode,
}

/// Errors returned by the client and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The caller cancelled the call context.
    #[error("request cancelled")]
    Cancelled,

    /// The call context's deadline passed before a response arrived.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::HttpError { .. } => ErrorKind::Application,
            ApiError::DeserializationError(_) => ErrorKind::Decode,
            ApiError::SerializationError(_) => ErrorKind::Encode,
            ApiError::TransportError(_) | ApiError::Cancelled | ApiError::DeadlineExceeded => {
                ErrorKind::Transport
            }
        }
    }

    /// HTTP status for application errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an `HttpError`, pulling a readable message out of the body.
    ///
    /// JSON bodies with a `message` or `error` string field yield that field;
    /// anything else is used verbatim (trimmed). An empty body falls back to
    /// a generic description.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("request failed with status {status}")
            } else {
                trimmed.to_string()
            }
        });
        ApiError::HttpError { status, message }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}
