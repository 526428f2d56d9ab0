//
//  gitlab-api
//  http/mediator.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Response body decoding and `Link` header parsing.
//!
//! Both helpers here are pure functions over a [`Response`]; they never
//! perform I/O and never fail. Malformed JSON under a JSON content type
//! deliberately degrades to the raw text instead of raising — several
//! GitLab endpoints (raw files, job traces, archives) return plain bodies
//! and callers are expected to handle both shapes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::http::response::Response;

/// `<url>; rel="name"` segments of a `Link` header.
static LINK_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<(.*)>; rel="(.*)""#).expect("link header pattern"));

/// A decoded response body.
///
/// JSON when the content type says so and the body parses; the raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Body decoded from `application/json`.
    Json(Value),
    /// Raw body text (non-JSON content type, or JSON that failed to parse).
    Text(String),
}

impl Content {
    /// The decoded JSON value, if this content is JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Content::Json(value) => Some(value),
            Content::Text(_) => None,
        }
    }

    /// Consumes the content, returning the decoded JSON value if present.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Content::Json(value) => Some(value),
            Content::Text(_) => None,
        }
    }

    /// The raw text, if this content is not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Json(_) => None,
            Content::Text(text) => Some(text),
        }
    }
}

/// Decodes a response body.
///
/// The body is parsed as JSON only when the `Content-Type` header begins
/// with `application/json`; a parse failure falls back to the raw string
/// rather than raising.
pub fn content(response: &Response) -> Content {
    let body = response.text();

    let is_json = response
        .header("Content-Type")
        .map_or(false, |value| value.starts_with("application/json"));
    if is_json {
        if let Ok(value) = serde_json::from_str(&body) {
            return Content::Json(value);
        }
    }

    Content::Text(body)
}

/// Extracts pagination URLs from the `Link` header.
///
/// Returns `None` when the header is absent — callers must be able to
/// distinguish "no pagination info" from "no further pages". Each
/// comma-separated segment matching `<url>; rel="name"` contributes a
/// `name -> url` entry; segments that do not match are silently skipped,
/// and a repeated relation name keeps the last occurrence.
pub fn pagination(response: &Response) -> Option<indexmap::IndexMap<String, String>> {
    let header = response.header("Link")?;

    let mut links = indexmap::IndexMap::new();
    for segment in header.split(',') {
        if let Some(captures) = LINK_SEGMENT.captures(segment.trim().trim_matches(',')) {
            links.insert(captures[2].to_string(), captures[1].to_string());
        }
    }

    Some(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(content_type: Option<&'static str>, body: &'static str) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(value) = content_type {
            headers.insert(
                HeaderName::from_static("content-type"),
                HeaderValue::from_static(value),
            );
        }
        Response::new(StatusCode::OK, headers, Bytes::from_static(body.as_bytes()))
    }

    fn response_with_link(link: &str) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("link"),
            HeaderValue::from_str(link).unwrap(),
        );
        Response::new(StatusCode::OK, headers, Bytes::from_static(b"[]"))
    }

    #[test]
    fn test_json_content_is_decoded() {
        let decoded = content(&response(Some("application/json"), r#"{"id":1}"#));
        assert_eq!(decoded, Content::Json(json!({"id": 1})));
    }

    #[test]
    fn test_json_content_type_with_charset_is_decoded() {
        let decoded = content(&response(
            Some("application/json; charset=utf-8"),
            r#"[1,2]"#,
        ));
        assert_eq!(decoded, Content::Json(json!([1, 2])));
    }

    #[test]
    fn test_malformed_json_falls_back_to_text() {
        let decoded = content(&response(Some("application/json"), "{not json"));
        assert_eq!(decoded, Content::Text("{not json".to_string()));
    }

    #[test]
    fn test_non_json_content_type_returns_text() {
        let decoded = content(&response(Some("text/plain"), r#"{"id":1}"#));
        assert_eq!(decoded, Content::Text(r#"{"id":1}"#.to_string()));
    }

    #[test]
    fn test_missing_link_header_returns_none() {
        assert!(pagination(&response(None, "[]")).is_none());
    }

    #[test]
    fn test_all_four_relations_in_any_order() {
        let links = pagination(&response_with_link(
            "<https://example.com/p?page=3>; rel=\"last\", \
             <https://example.com/p?page=1>; rel=\"first\", \
             <https://example.com/p?page=2>; rel=\"next\", \
             <https://example.com/p?page=1>; rel=\"prev\"",
        ))
        .unwrap();

        assert_eq!(links.len(), 4);
        assert_eq!(links["next"], "https://example.com/p?page=2");
        assert_eq!(links["prev"], "https://example.com/p?page=1");
        assert_eq!(links["first"], "https://example.com/p?page=1");
        assert_eq!(links["last"], "https://example.com/p?page=3");
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let links = pagination(&response_with_link(
            "garbage, <https://example.com/p?page=2>; rel=\"next\"",
        ))
        .unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links["next"], "https://example.com/p?page=2");
    }

    #[test]
    fn test_duplicate_relation_keeps_last() {
        let links = pagination(&response_with_link(
            "<https://example.com/a>; rel=\"next\", <https://example.com/b>; rel=\"next\"",
        ))
        .unwrap();

        assert_eq!(links["next"], "https://example.com/b");
    }
}
