//! Errors surfaced to the host engine.
//!
//! Client failures are wrapped with what the adapter was trying to do, so an
//! operator sees "failed to read target group: HTTP 500: ..." rather than a
//! bare status line.

use thiserror::Error;
use warpgate_core::ApiError;

use crate::schema::SchemaError;
use crate::state::StateError;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A call to the remote API failed.
    #[error("{action}: {source}")]
    Api {
        action: &'static str,
        #[source]
        source: ApiError,
    },

    /// Writing a field into state failed; aborts the whole operation.
    #[error("failed to set {key:?}: {source}")]
    State {
        key: String,
        #[source]
        source: StateError,
    },

    #[error("invalid configuration: {0}")]
    Schema(#[from] SchemaError),

    #[error("missing required attribute {0:?}")]
    MissingAttribute(String),

    #[error("resource has no id; it must be created or imported first")]
    MissingId,

    #[error("import id must not be empty")]
    EmptyImportId,

    #[error("resource type {0:?} does not support import")]
    NotImportable(String),

    #[error("unknown resource type {0:?}")]
    UnknownResource(String),
}

impl ProviderError {
    pub fn api(action: &'static str, source: ApiError) -> Self {
        ProviderError::Api { action, source }
    }

    /// The underlying client error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ProviderError::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}
