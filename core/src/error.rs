//! Error types for the student API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers treat
//! them differently from other failures: a missing record becomes a
//! "not found" screen, and a validation body is projected onto form fields.
//! All other non-2xx responses land in `Http` with the raw status code and
//! body for debugging.

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages as returned by the server in
/// `{"error": {"<field>": "<message>"}}`.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors returned by the adapter, the resource client and the transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404. `errors` is filled when the body carried a
    /// `{"error": {...}}` map, and is empty otherwise.
    #[error("resource not found")]
    NotFound { body: String, errors: FieldErrors },

    /// The server rejected the payload with a structured field error map.
    #[error("HTTP {status}: validation failed for {}", join_fields(.errors))]
    Validation { status: u16, errors: FieldErrors },

    /// The server returned a non-2xx status without a recognizable body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound {
            body: String::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { status, .. } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            ApiError::NotFound { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }
}

fn join_fields(errors: &FieldErrors) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
