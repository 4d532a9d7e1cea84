//! Status classification and body decoding.
//!
//! # Design
//! Every exchange is classified before its body is looked at. A 404 or 401
//! usually carries a JSON error envelope that would decode badly into a
//! resource type, so decoding an error response would hide the real failure
//! behind a `Decode` error. Accessors therefore call `classify` first and only
//! hand the response to `decode_body` on `Status::Ok`.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Kind of resource an accessor asked for, used in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Item,
    Tag,
    Comment,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Item => "item",
            ResourceKind::Tag => "tag",
            ResourceKind::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identified resource a request is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub kind: ResourceKind,
    pub id: String,
}

impl Subject {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Successful outcomes of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200: the body holds the requested representation.
    Ok,
    /// 204: success without a body.
    NoContent,
}

/// Map a status code to a success outcome or a typed error.
///
/// Calls scoped to the authenticated user pass no subject; a 404 for them is
/// reported as an unknown status since there is no identifier to name.
pub fn classify(status: u16, subject: Option<&Subject>) -> Result<Status, ApiError> {
    match (status, subject) {
        (200, _) => Ok(Status::Ok),
        (204, _) => Ok(Status::NoContent),
        (401, _) => Err(ApiError::Authentication { status }),
        (404, Some(subject)) => Err(ApiError::NotFound {
            kind: subject.kind,
            id: subject.id.clone(),
        }),
        _ => Err(ApiError::UnknownStatus { status }),
    }
}

/// Decode the body of `response` as JSON into `T`.
///
/// Takes the response by value; the body is dropped when this returns,
/// whether or not decoding succeeded.
pub fn decode_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}
