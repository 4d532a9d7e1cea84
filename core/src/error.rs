//! Error types for the Qiita API client.
//!
//! # Design
//! Failures split into three groups. Pre-flight errors (`InvalidRequest`,
//! `InvalidParameter`) are raised before the transport is touched.
//! Exchange errors (`Transport`, `Decode`, `MalformedPagination`) describe a
//! round-trip that could not be completed or understood. Status errors
//! (`Authentication`, `NotFound`, `UnknownStatus`) come from the classifier
//! and carry the status code plus whatever identifies the requested resource.

use thiserror::Error;

use crate::response::ResourceKind;

/// Errors returned by every `QiitaClient` call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL and relative path could not be composed into a URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A pagination parameter is outside the documented bounds.
    #[error("{name} parameter should be between {min} and {max} (got {value})")]
    InvalidParameter {
        name: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    /// The transport failed, or the request context was cancelled or timed out.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// `Total-Count` or `Link` headers could not be interpreted.
    #[error("malformed pagination headers: {0}")]
    MalformedPagination(String),

    /// 401: the access token is missing or was rejected.
    #[error("unauthorized. you may have provided no/invalid access token (status = {status})")]
    Authentication { status: u16 },

    /// 404 for an identified resource.
    #[error("{kind} with id '{id}' not found (status = 404)")]
    NotFound { kind: ResourceKind, id: String },

    /// Any status the classifier has no dedicated variant for.
    #[error("unknown error (status = {status})")]
    UnknownStatus { status: u16 },
}

impl ApiError {
    /// HTTP status behind this error, if it was produced by the classifier.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status } | ApiError::UnknownStatus { status } => {
                Some(*status)
            }
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Failures raised by a `Transport` or by the request context around it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Connection, TLS or protocol failure reported by the HTTP stack.
    #[error("{0}")]
    Connection(String),
}
