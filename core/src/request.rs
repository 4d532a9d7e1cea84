//! Request descriptors and their translation into fully qualified requests.
//!
//! # Design
//! An `ApiRequest` names what an accessor wants (method, path segments
//! relative to the API root, query, optional JSON body). `build_request`
//! binds it to a base URL and the client's identifying headers.
//!
//! Literal paths such as `"tags"` are split on `/`. Identifiers are passed as
//! whole segments through `ApiRequest::get_segments` and are percent-encoded
//! as one segment each, `/` included, so an id can never reach a different
//! endpoint. Query parameters live in a `BTreeMap`, so the encoded query
//! string is always in lexicographic key order.

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

/// What an accessor asks the pipeline to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the API root, one entry per segment, not yet encoded.
    pub segments: Vec<String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Request for a literal relative path. Empty segments are dropped.
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self::from_segments(method, split_path(path))
    }

    pub fn get(path: &str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Request whose path is exactly `segments`; each one is sent whole.
    pub fn with_segments(method: HttpMethod, segments: &[&str]) -> Self {
        Self::from_segments(method, segments.iter().map(|s| s.to_string()).collect())
    }

    pub fn get_segments(segments: &[&str]) -> Self {
        Self::with_segments(HttpMethod::Get, segments)
    }

    fn from_segments(method: HttpMethod, segments: Vec<String>) -> Self {
        Self {
            method,
            segments,
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// Set a query parameter, replacing any previous value for `key`.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append `path` to `base` with exactly one `/` between them.
///
/// Empty segments are dropped and each remaining segment is percent-encoded.
pub fn join_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    push_segments(base, &split_path(path))
}

/// Append each of `segments` to `base` as a single percent-encoded segment.
///
/// Empty, `.` and `..` segments are rejected: they would address another
/// resource than the one named.
pub fn push_segments(base: &Url, segments: &[String]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|()| {
            ApiError::InvalidRequest(format!("base URL '{base}' cannot carry a path"))
        })?;
        path.pop_if_empty();
        for segment in segments {
            match segment.as_str() {
                "" => {
                    return Err(ApiError::InvalidRequest(format!(
                        "empty path segment in '{}'",
                        segments.join("/")
                    )))
                }
                "." | ".." => {
                    return Err(ApiError::InvalidRequest(format!(
                        "path segment '{segment}' is not allowed in '{}'",
                        segments.join("/")
                    )))
                }
                _ => {
                    path.push(segment);
                }
            }
        }
    }
    Ok(url)
}

/// Compose the outgoing request for `request` against `base`.
pub fn build_request(
    base: &Url,
    user_agent: &str,
    access_token: Option<&str>,
    request: ApiRequest,
) -> Result<HttpRequest, ApiError> {
    let mut url = push_segments(base, &request.segments)?;
    if !request.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &request.query {
            pairs.append_pair(key, value);
        }
    }

    let mut headers = vec![
        ("User-Agent".to_string(), user_agent.to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ];
    if let Some(token) = access_token {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }

    let body = match request.body {
        Some(body) => {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            Some(
                serde_json::to_string(&body)
                    .map_err(|e| ApiError::InvalidRequest(format!("unserializable body: {e}")))?,
            )
        }
        None => None,
    };

    Ok(HttpRequest {
        method: request.method,
        url: url.into(),
        headers,
        body,
    })
}
