//
//  gitlab-api
//  http/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The request pipeline.
//!
//! Every API call flows through an ordered chain of [`Stage`]s ending in
//! the injected [`Transport`]. The chain is assembled once, at client
//! construction, as an explicit list — there is no runtime discovery and
//! no way to reorder stages after the fact. Order is significant:
//!
//! 1. [`TranslateErrors`] — outermost, so it sees the final response and
//!    can turn any 4xx/5xx into an [`ApiError::Request`]
//! 2. [`RecordHistory`] — records every completed response (including
//!    error statuses) before translation raises; transport failures skip it
//! 3. [`DefaultHeaders`] — fills in the client signature without
//!    overwriting caller-set headers
//! 4. redirect following — delegated to the transport (reqwest policy),
//!    composed with rather than reimplemented here
//! 5. [`PrefixApiVersion`] — rewrites the URL path under `/api/v4`
//! 6. [`ApplyAuthentication`] — innermost, so credentials land on the
//!    exact request the transport sends
//!
//! Requests are immutable values; stages produce new requests instead of
//! mutating shared state, which keeps the chain re-entrant under
//! concurrent use. The two intentional exceptions are the history slot
//! (see [`ResponseHistory`]) and the version stage's redirect flag, both
//! scoped to one client instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::api::common::ApiError;
use crate::auth::Authentication;
use crate::http::history::ResponseHistory;
use crate::http::mediator::{self, Content};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport::Transport;

/// Path prefix of the versioned API.
pub const API_PREFIX: &str = "/api/v4/";

/// One middleware stage of the request pipeline.
///
/// A stage receives the request and a [`Next`] continuation; it may
/// rewrite the request before delegating and inspect the response on the
/// way back out.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Handles one request, delegating to the rest of the chain.
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError>;
}

/// The remainder of the chain after the current stage.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Stage>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Runs the remaining stages, ending in the transport send.
    pub async fn run(self, request: Request) -> Result<Response, ApiError> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                let next = Next {
                    stages: rest,
                    transport: self.transport,
                };
                stage.handle(request, next).await
            }
            None => self.transport.send(request).await,
        }
    }
}

/// An ordered stage list terminating in a transport.
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    /// Composes the given stages (outermost first) over a transport.
    pub fn new(stages: Vec<Arc<dyn Stage>>, transport: Arc<dyn Transport>) -> Self {
        Self { stages, transport }
    }

    /// Executes one request through every stage.
    pub async fn execute(&self, request: Request) -> Result<Response, ApiError> {
        debug!(method = %request.method(), url = %request.url(), "executing request");
        let next = Next {
            stages: &self.stages,
            transport: &*self.transport,
        };
        let result = next.run(request).await;
        match &result {
            Ok(response) => debug!(status = %response.status(), "request completed"),
            Err(err) => debug!(error = %err, "request failed"),
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Stage 1: error translation
// ---------------------------------------------------------------------------

/// Turns HTTP error statuses into [`ApiError::Request`].
///
/// Any completed response with a status in `[400, 600)` becomes an error
/// carrying the status and a human-readable message assembled from the
/// body. Transport-level failures pass through untouched — they were
/// never HTTP responses to begin with.
pub struct TranslateErrors;

#[async_trait]
impl Stage for TranslateErrors {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError> {
        let response = next.run(request).await?;
        let status = response.status();

        if status.as_u16() >= 400 && status.as_u16() < 600 {
            return Err(ApiError::Request {
                status,
                message: error_message(status, &mediator::content(&response)),
            });
        }

        Ok(response)
    }
}

/// Builds the error message for a failed response.
///
/// A 400 whose body carries a `message` field reports the flattened
/// message alone. Otherwise the message comes from, in priority order:
/// an `error` field (sequences joined with newlines), a flattened
/// `message` field, or the raw body.
fn error_message(status: StatusCode, content: &Content) -> String {
    if let Content::Json(json) = content {
        if status == StatusCode::BAD_REQUEST {
            if let Some(message) = json.get("message") {
                return flatten_message(message);
            }
        }

        if let Some(error) = json.get("error") {
            return match error {
                Value::Array(items) => items
                    .iter()
                    .map(scalar_text)
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => scalar_text(other),
            };
        }
        if let Some(message) = json.get("message") {
            return flatten_message(message);
        }
        return scalar_text(json);
    }

    match content {
        Content::Text(text) => text.clone(),
        Content::Json(json) => json.to_string(),
    }
}

/// Flattens a `message` error payload into one line.
///
/// GitLab reports validation failures as a map from field name to a list
/// of messages. Each field contributes one `"field" text` entry per
/// distinct message; plain lists contribute their values without a field
/// prefix; scalars pass through. Entries join with `", "`.
pub(crate) fn flatten_message(message: &Value) -> String {
    match message {
        Value::Object(fields) => {
            let mut entries = Vec::new();
            for (field, messages) in fields {
                match messages {
                    Value::Array(items) => {
                        let mut distinct: Vec<String> = Vec::new();
                        for item in items {
                            let text = scalar_text(item);
                            if !distinct.contains(&text) {
                                distinct.push(text);
                            }
                        }
                        for text in distinct {
                            entries.push(format!("\"{field}\" {text}"));
                        }
                    }
                    other => entries.push(format!("\"{field}\" {}", scalar_text(other))),
                }
            }
            entries.join(", ")
        }
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Stage 2: history capture
// ---------------------------------------------------------------------------

/// Records every completed response into the client's history slot.
///
/// Sits inside [`TranslateErrors`], so even responses about to be turned
/// into errors are recorded first. Transport failures short-circuit past
/// the recording.
pub struct RecordHistory {
    history: ResponseHistory,
}

impl RecordHistory {
    /// Creates the stage over a shared history slot.
    pub fn new(history: ResponseHistory) -> Self {
        Self { history }
    }
}

#[async_trait]
impl Stage for RecordHistory {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError> {
        let response = next.run(request).await?;
        self.history.record(response.clone());
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Stage 3: default headers
// ---------------------------------------------------------------------------

/// Merges the client signature into requests that lack one.
///
/// Headers the caller set explicitly always win.
pub struct DefaultHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl DefaultHeaders {
    /// The standard default set: a `User-Agent` identifying this client.
    pub fn standard() -> Self {
        let signature = format!(
            "gitlab-api/{} (https://github.com/iamngoni/gitlab-api)",
            crate::VERSION
        );
        let value = HeaderValue::from_str(&signature)
            .unwrap_or_else(|_| HeaderValue::from_static("gitlab-api"));
        Self {
            headers: vec![(USER_AGENT, value)],
        }
    }
}

#[async_trait]
impl Stage for DefaultHeaders {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError> {
        let mut request = request;
        for (name, value) in &self.headers {
            request = request.with_default_header(name.clone(), value.clone());
        }
        next.run(request).await
    }
}

// ---------------------------------------------------------------------------
// Stage 5: API version prefixing
// ---------------------------------------------------------------------------

/// Rewrites request paths under the versioned API prefix.
///
/// A path already starting with `/api/v4/` is left alone, as is any
/// request issued immediately after a `302` response — a redirect target
/// is an absolute URL that must not be rewritten. The redirect flag is a
/// single boolean scoped to this pipeline instance, refreshed from every
/// observed response.
pub struct PrefixApiVersion {
    redirected: AtomicBool,
}

impl PrefixApiVersion {
    /// Creates the stage with the redirect flag cleared.
    pub fn new() -> Self {
        Self {
            redirected: AtomicBool::new(false),
        }
    }
}

impl Default for PrefixApiVersion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage for PrefixApiVersion {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError> {
        let mut request = request;

        let path = request.url().path().to_string();
        if !path.starts_with(API_PREFIX) && !self.redirected.load(Ordering::Relaxed) {
            let mut url = request.url().clone();
            url.set_path(&format!("/api/v4{path}"));
            request = request.with_url(url);
        }

        let response = next.run(request).await?;
        self.redirected
            .store(response.status() == StatusCode::FOUND, Ordering::Relaxed);

        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Stage 6: authentication
// ---------------------------------------------------------------------------

/// Applies the client's single active [`Authentication`] mode.
///
/// The client rebuilds its pipeline when authentication changes, so at
/// most one of these stages exists in a chain at any time.
pub struct ApplyAuthentication {
    auth: Authentication,
}

impl ApplyAuthentication {
    /// Creates the stage for the given mode.
    pub fn new(auth: Authentication) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Stage for ApplyAuthentication {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, ApiError> {
        let request = self.auth.apply(request)?;
        next.run(request).await
    }
}
