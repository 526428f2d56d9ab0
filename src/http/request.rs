//
//  gitlab-api
//  http/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Immutable request values.
//!
//! A [`Request`] is a plain value: method, absolute URL, headers and an
//! optional body. Pipeline stages never mutate a request in place; each
//! stage that needs to change something produces a new value via the
//! `with_*` methods. This keeps every stage re-entrant and makes request
//! flow easy to assert in tests.

use std::path::PathBuf;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

/// An HTTP request travelling through the pipeline.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Body>,
}

/// Request payload shapes supported by the API.
///
/// GitLab write endpoints accept `application/x-www-form-urlencoded`
/// bodies using the same bracket notation as query strings; multipart is
/// used only when file uploads are involved.
#[derive(Debug, Clone)]
pub enum Body {
    /// A pre-encoded `application/x-www-form-urlencoded` payload.
    Form(String),
    /// A multipart form with plain text fields and file parts.
    Multipart {
        /// Name/value text fields, already in wire form.
        fields: Vec<(String, String)>,
        /// Files to stream as individual parts.
        files: Vec<FilePart>,
    },
}

/// A single file part of a multipart body.
///
/// The transport reads the file at send time, names the part after the
/// file's basename and attaches a best-effort MIME type guessed from the
/// extension (`application/octet-stream` when unknown).
#[derive(Debug, Clone)]
pub struct FilePart {
    /// The form field name for this part.
    pub name: String,
    /// Path of the file to upload.
    pub path: PathBuf,
}

impl Request {
    /// Creates a new request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Returns a copy of this request with a different URL.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Returns a copy of this request with the header set (replacing any
    /// existing value).
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns a copy of this request with the header set only when the
    /// caller has not already set it.
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        if !self.headers.contains_key(&name) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns a copy of this request carrying the given body.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        let url = Url::parse("https://gitlab.com/projects").unwrap();
        Request::new(Method::GET, url)
    }

    #[test]
    fn test_with_default_header_does_not_overwrite() {
        let req = request()
            .with_header(
                HeaderName::from_static("user-agent"),
                HeaderValue::from_static("custom"),
            )
            .with_default_header(
                HeaderName::from_static("user-agent"),
                HeaderValue::from_static("default"),
            );

        assert_eq!(req.headers()["user-agent"], "custom");
    }

    #[test]
    fn test_with_default_header_fills_missing() {
        let req = request().with_default_header(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static("default"),
        );

        assert_eq!(req.headers()["user-agent"], "default");
    }

    #[test]
    fn test_with_url_replaces_url() {
        let target = Url::parse("https://gitlab.example.com/api/v4/projects").unwrap();
        let req = request().with_url(target.clone());

        assert_eq!(req.url(), &target);
    }
}
