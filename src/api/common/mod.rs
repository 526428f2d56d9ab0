//
//  gitlab-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared pieces used by every endpoint group: the unified [`ApiError`]
//! type, the [`ProjectId`] addressing scheme, path-encoding helpers and
//! the pagination support (re-exported from [`pagination`]).
//!
//! # Error handling
//!
//! Failures split cleanly by cause, so callers can pattern-match:
//!
//! ```rust
//! use gitlab_api::ApiError;
//!
//! fn handle<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Configuration(reason)) => println!("Bad call: {reason}"),
//!         Err(ApiError::Request { status, message }) => {
//!             println!("GitLab said {status}: {message}")
//!         }
//!         Err(e) => println!("Error: {e}"),
//!     }
//! }
//! ```

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::ResultPager;

/// Unified error type for all GitLab API operations.
///
/// The variants separate *where* a failure came from:
///
/// | Variant | Origin | Retryable |
/// |---------|--------|-----------|
/// | `Configuration` | this process, before any network call | no — fix the call |
/// | `Request` | GitLab, as an HTTP 4xx/5xx | caller's decision; never retried here |
/// | `Transport` | the connection (DNS, TLS, timeout) | caller's decision |
/// | `Decode` | a response body that does not match the typed model | no |
///
/// No retry, backoff or caching happens at this layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The call itself was invalid: an unrecognized option, a wrongly
    /// typed option value, or a value outside the allowed set. Raised
    /// before any request is sent.
    #[error("invalid request options: {0}")]
    Configuration(String),

    /// GitLab answered with an HTTP error status.
    ///
    /// Carries the status code and a message flattened from the error
    /// payload's `message`/`error` fields.
    #[error("{message}")]
    Request {
        /// The HTTP status GitLab responded with.
        status: StatusCode,
        /// Human-readable message assembled from the response body.
        message: String,
    },

    /// A connection-level failure, passed through from the transport
    /// unchanged.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A URL could not be parsed (bad base URL, or a malformed link in a
    /// pagination header).
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body did not match the expected model shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Identifies a project by numeric id or by its `namespace/path` string.
///
/// GitLab addresses projects either way in the same path position; the
/// path form must be URL-encoded when it appears in a path segment, which
/// [`encoded`](ProjectId::encoded) takes care of.
///
/// # Example
///
/// ```rust
/// use gitlab_api::ProjectId;
///
/// let by_id: ProjectId = 42u64.into();
/// let by_path: ProjectId = "group/project".into();
/// assert_eq!(by_id.encoded(), "42");
/// assert_eq!(by_path.encoded(), "group%2Fproject");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectId {
    /// The numeric project id.
    Id(u64),
    /// The `namespace/project_path` form.
    Path(String),
}

impl ProjectId {
    /// The id rendered as a single URL path segment.
    pub fn encoded(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Path(path) => encode_path(path),
        }
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for ProjectId {
    fn from(id: i32) -> Self {
        Self::Id(id as u64)
    }
}

impl From<&str> for ProjectId {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

/// Percent-encodes a value for use as a single path segment.
///
/// On top of RFC 3986 encoding, `.` becomes `%2E` so that refs and file
/// paths like `v1.0.0` or `README.md` survive proxies that normalize
/// dot segments.
pub(crate) fn encode_path(segment: &str) -> String {
    crate::http::query::encode_value(segment).replace('.', "%2E")
}

/// Builds a `projects/{id}/...` path.
pub(crate) fn project_path(project: &ProjectId, tail: &str) -> String {
    format!("projects/{}/{}", project.encoded(), tail)
}

/// Builds a `groups/{id}/...` path.
pub(crate) fn group_path(group: u64, tail: &str) -> String {
    format!("groups/{group}/{tail}")
}
