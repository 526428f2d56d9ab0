//
//  gitlab-api
//  http/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The transport seam.
//!
//! The pipeline terminates in a [`Transport`]: something that can turn a
//! [`Request`] into a [`Response`] over the network. The default
//! implementation wraps a shared `reqwest::Client`; tests inject stubs to
//! exercise the pipeline without sockets.
//!
//! Connection-level concerns live entirely below this seam: TLS, timeouts
//! and redirect following are reqwest's job. Errors surfacing from the
//! transport are connection failures, not HTTP error statuses, and the
//! pipeline passes them through untranslated.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::api::common::ApiError;
use crate::http::request::{Body, Request};
use crate::http::response::Response;

/// Sends a request and produces a completed, fully-buffered response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one HTTP round-trip.
    ///
    /// # Errors
    ///
    /// Returns an error for connection-level failures (DNS, TLS,
    /// timeouts, I/O). An HTTP error status is *not* an error at this
    /// level; it comes back as a normal [`Response`].
    async fn send(&self, request: Request) -> Result<Response, ApiError>;
}

/// The default transport, backed by a pooled `reqwest::Client`.
///
/// Redirects are followed according to reqwest's default policy; the
/// pipeline composes with that rather than reimplementing it.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
        })
    }

    /// Wraps an existing reqwest client (custom TLS, proxy or redirect
    /// configuration).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let mut builder = self
            .http
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        match request.body() {
            Some(Body::Form(encoded)) => {
                builder = builder
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(encoded.clone());
            }
            Some(Body::Multipart { fields, files }) => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                for file in files {
                    let data = tokio::fs::read(&file.path).await.map_err(|err| {
                        ApiError::Configuration(format!(
                            "could not read upload file {}: {err}",
                            file.path.display()
                        ))
                    })?;
                    let filename = file
                        .path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let part = reqwest::multipart::Part::bytes(data)
                        .file_name(filename.clone())
                        .mime_str(guess_content_type(&filename))?;
                    form = form.part(file.name.clone(), part);
                }
                builder = builder.multipart(form);
            }
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body))
    }
}

/// Best-effort MIME type from a filename extension.
///
/// Covers the types users actually upload to GitLab (avatars, attachment
/// images, archives, text); anything else falls back to
/// `application/octet-stream`.
fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type_known_extensions() {
        assert_eq!(guess_content_type("avatar.png"), "image/png");
        assert_eq!(guess_content_type("report.PDF"), "application/pdf");
        assert_eq!(guess_content_type("notes.md"), "text/markdown");
    }

    #[test]
    fn test_guess_content_type_falls_back_to_octet_stream() {
        assert_eq!(guess_content_type("binary.bin"), "application/octet-stream");
        assert_eq!(guess_content_type("no_extension"), "application/octet-stream");
    }
}
