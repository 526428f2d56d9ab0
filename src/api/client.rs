//
//  gitlab-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # GitLab API Client
//!
//! [`GitlabClient`] is the entry point of the crate. It owns the request
//! pipeline, the last-response history slot and the base URL, and hands
//! out lightweight per-resource endpoint groups
//! ([`projects()`](GitlabClient::projects),
//! [`issues()`](GitlabClient::issues), …) that borrow it.
//!
//! # Creating a Client
//!
//! ```rust,no_run
//! use gitlab_api::{Authentication, GitlabClient};
//!
//! # fn example() -> Result<(), gitlab_api::ApiError> {
//! // gitlab.com
//! let client = GitlabClient::new()?
//!     .authenticate(Authentication::http_token("glpat-secret"));
//!
//! // self-hosted
//! let client = GitlabClient::with_url("https://gitlab.example.com")?
//!     .authenticate(Authentication::http_token("glpat-secret"));
//! # Ok(())
//! # }
//! ```
//!
//! # Request flow
//!
//! Endpoint methods build a relative path plus validated parameters and
//! call the verb helpers here. The helpers construct an immutable
//! [`Request`] and run it through the pipeline, which in order translates
//! error statuses, records history, merges default headers, prefixes
//! `/api/v4` and applies authentication before the transport sends it.
//! Responses decode through [`mediator`](crate::http::mediator) into
//! typed models.

use std::sync::Arc;

use indexmap::IndexMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::common::{ApiError, ResultPager};
use crate::api::deployments::Deployments;
use crate::api::environments::Environments;
use crate::api::groups::Groups;
use crate::api::issues::Issues;
use crate::api::jobs::Jobs;
use crate::api::keys::Keys;
use crate::api::merge_requests::MergeRequests;
use crate::api::milestones::Milestones;
use crate::api::namespaces::Namespaces;
use crate::api::projects::Projects;
use crate::api::repositories::Repositories;
use crate::api::repository_files::RepositoryFiles;
use crate::api::schedules::Schedules;
use crate::api::snippets::Snippets;
use crate::api::system_hooks::SystemHooks;
use crate::api::tags::Tags;
use crate::api::users::Users;
use crate::api::version::Version;
use crate::auth::Authentication;
use crate::http::history::ResponseHistory;
use crate::http::mediator::{self, Content};
use crate::http::pipeline::{
    ApplyAuthentication, DefaultHeaders, Pipeline, PrefixApiVersion, RecordHistory, Stage,
    TranslateErrors,
};
use crate::http::query;
use crate::http::request::{Body, FilePart, Request};
use crate::http::response::Response;
use crate::http::transport::{ReqwestTransport, Transport};

/// Default instance URL.
const DEFAULT_URL: &str = "https://gitlab.com";

/// The GitLab API client.
///
/// Cheap to share by reference; endpoint groups borrow it. The pipeline
/// is rebuilt whenever authentication changes, which guarantees at most
/// one authentication stage is active at any time.
pub struct GitlabClient {
    base_url: Url,
    history: ResponseHistory,
    auth: Option<Authentication>,
    transport: Arc<dyn Transport>,
    pipeline: Pipeline,
}

impl GitlabClient {
    /// Creates an unauthenticated client for `https://gitlab.com`.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_url(DEFAULT_URL)
    }

    /// Creates an unauthenticated client for a self-hosted instance.
    pub fn with_url(url: &str) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Self::with_transport(url, transport)
    }

    /// Creates a client over an explicitly injected transport.
    ///
    /// The transport is the only pluggable piece of the pipeline; tests
    /// use this to run the full stage chain against a stub.
    pub fn with_transport(url: &str, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        let base_url = Url::parse(url)?;
        let history = ResponseHistory::new();
        let pipeline = Self::build_pipeline(&history, None, transport.clone());

        Ok(Self {
            base_url,
            history,
            auth: None,
            transport,
            pipeline,
        })
    }

    /// Sets the authentication used for all following requests.
    ///
    /// Replaces any previously configured mode wholesale — the pipeline
    /// is rebuilt with a single fresh authentication stage, so a request
    /// can never carry artifacts of two modes.
    pub fn authenticate(mut self, auth: Authentication) -> Self {
        self.auth = Some(auth);
        self.pipeline =
            Self::build_pipeline(&self.history, self.auth.as_ref(), self.transport.clone());
        self
    }

    fn build_pipeline(
        history: &ResponseHistory,
        auth: Option<&Authentication>,
        transport: Arc<dyn Transport>,
    ) -> Pipeline {
        // Order is significant; see the pipeline module docs.
        let mut stages: Vec<Arc<dyn Stage>> = vec![
            Arc::new(TranslateErrors),
            Arc::new(RecordHistory::new(history.clone())),
            Arc::new(DefaultHeaders::standard()),
            Arc::new(PrefixApiVersion::new()),
        ];
        if let Some(auth) = auth {
            stages.push(Arc::new(ApplyAuthentication::new(auth.clone())));
        }
        Pipeline::new(stages, transport)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The most recently completed response, if any.
    ///
    /// This is the single-slot history the pager reads pagination links
    /// from; see [`ResponseHistory`] for the concurrency caveat.
    pub fn last_response(&self) -> Option<Response> {
        self.history.last_response()
    }

    /// A pager over this client's response history.
    pub fn pager(&self) -> ResultPager<'_> {
        ResultPager::new(self)
    }

    // -- endpoint groups ----------------------------------------------------

    /// Project endpoints.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    /// Group endpoints.
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    /// Issue endpoints.
    pub fn issues(&self) -> Issues<'_> {
        Issues::new(self)
    }

    /// Merge request endpoints.
    pub fn merge_requests(&self) -> MergeRequests<'_> {
        MergeRequests::new(self)
    }

    /// Repository endpoints (branches, commits, tree, compare).
    pub fn repositories(&self) -> Repositories<'_> {
        Repositories::new(self)
    }

    /// Repository file endpoints.
    pub fn repository_files(&self) -> RepositoryFiles<'_> {
        RepositoryFiles::new(self)
    }

    /// User endpoints.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Project milestone endpoints.
    pub fn milestones(&self) -> Milestones<'_> {
        Milestones::new(self)
    }

    /// Project snippet endpoints.
    pub fn snippets(&self) -> Snippets<'_> {
        Snippets::new(self)
    }

    /// Environment endpoints.
    pub fn environments(&self) -> Environments<'_> {
        Environments::new(self)
    }

    /// Deployment endpoints.
    pub fn deployments(&self) -> Deployments<'_> {
        Deployments::new(self)
    }

    /// CI job endpoints.
    pub fn jobs(&self) -> Jobs<'_> {
        Jobs::new(self)
    }

    /// SSH key lookup endpoints.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Repository tag and release endpoints.
    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    /// Pipeline schedule endpoints.
    pub fn schedules(&self) -> Schedules<'_> {
        Schedules::new(self)
    }

    /// System hook endpoints.
    pub fn system_hooks(&self) -> SystemHooks<'_> {
        SystemHooks::new(self)
    }

    /// Instance version endpoint.
    pub fn version(&self) -> Version<'_> {
        Version::new(self)
    }

    /// Namespace endpoints.
    pub fn namespaces(&self) -> Namespaces<'_> {
        Namespaces::new(self)
    }

    // -- verb helpers -------------------------------------------------------

    /// GET a path and decode the JSON body into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<T, ApiError> {
        let response = self.get_response(path, params).await?;
        decode_typed(&response)
    }

    /// GET a path and hand back the decoded-or-raw content.
    ///
    /// For endpoints whose bodies are not JSON (raw files, job traces,
    /// archives).
    pub(crate) async fn get_content(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<Content, ApiError> {
        let response = self.get_response(path, params).await?;
        Ok(mediator::content(&response))
    }

    pub(crate) async fn get_response(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<Response, ApiError> {
        let mut url = self.endpoint_url(path);
        if !params.is_empty() {
            url.set_query(Some(&query::build(&params)));
        }
        self.pipeline.execute(Request::new(Method::GET, url)).await
    }

    /// GET an absolute URL (a pagination link) and decode into `T`.
    pub(crate) async fn get_absolute<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.pipeline.execute(Request::new(Method::GET, url)).await?;
        decode_typed(&response)
    }

    /// POST a form-encoded body and decode the JSON response into `T`.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<T, ApiError> {
        let mut request = Request::new(Method::POST, self.endpoint_url(path));
        if !params.is_empty() {
            request = request.with_body(Body::Form(query::build(&params)));
        }
        let response = self.pipeline.execute(request).await?;
        decode_typed(&response)
    }

    /// POST a multipart body (text fields plus file uploads).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
        files: Vec<FilePart>,
    ) -> Result<T, ApiError> {
        let fields = params
            .iter()
            .map(|(name, value)| (name.clone(), wire_text(value)))
            .collect();
        let request = Request::new(Method::POST, self.endpoint_url(path))
            .with_body(Body::Multipart { fields, files });
        let response = self.pipeline.execute(request).await?;
        decode_typed(&response)
    }

    /// PUT a form-encoded body and decode the JSON response into `T`.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<T, ApiError> {
        let mut request = Request::new(Method::PUT, self.endpoint_url(path));
        if !params.is_empty() {
            request = request.with_body(Body::Form(query::build(&params)));
        }
        let response = self.pipeline.execute(request).await?;
        decode_typed(&response)
    }

    /// DELETE a path; parameters travel in the query string.
    pub(crate) async fn delete(
        &self,
        path: &str,
        params: IndexMap<String, Value>,
    ) -> Result<(), ApiError> {
        let mut url = self.endpoint_url(path);
        if !params.is_empty() {
            url.set_query(Some(&query::build(&params)));
        }
        self.pipeline
            .execute(Request::new(Method::DELETE, url))
            .await?;
        Ok(())
    }

    /// Resolves a relative API path against the configured instance.
    ///
    /// Only scheme/host/port come from the base URL; the version prefix
    /// is the pipeline's job.
    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/{path}"));
        url.set_query(None);
        url
    }
}

/// Decodes a response into a typed model.
///
/// JSON bodies deserialize directly. Non-JSON bodies surface as their
/// raw text, which still satisfies `String` targets; a structured target
/// fed a raw body reports [`ApiError::Decode`].
fn decode_typed<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
    let value = match mediator::content(response) {
        Content::Json(value) => value,
        Content::Text(text) => Value::String(text),
    };
    Ok(serde_json::from_value(value)?)
}

fn wire_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::options::Options;
    use mockito::Matcher;
    use serde_json::json;

    fn empty_params() -> IndexMap<String, Value> {
        IndexMap::new()
    }

    #[tokio::test]
    async fn test_get_prefixes_api_version_and_decodes_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/version")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"version":"17.9.0","revision":"abc123"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let value: Value = client.get("version", empty_params()).await.unwrap();

        assert_eq!(value["version"], "17.9.0");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_token_authentication_sends_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/user")
            .match_header("PRIVATE-TOKEN", "glpat-secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"username":"dev"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url())
            .unwrap()
            .authenticate(Authentication::http_token("glpat-secret"));
        let _: Value = client.get("user", empty_params()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_switching_auth_modes_leaves_no_stale_artifacts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/user")
            .match_header("PRIVATE-TOKEN", Matcher::Missing)
            .match_query(Matcher::UrlEncoded(
                "private_token".to_string(),
                "query-token".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url())
            .unwrap()
            .authenticate(Authentication::http_token("header-token"))
            .authenticate(Authentication::url_token("query-token"));
        let _: Value = client.get("user", empty_params()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_translates_to_request_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects/999")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"404 Project Not Found"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let err = client
            .get::<Value>("projects/999", empty_params())
            .await
            .unwrap_err();

        match err {
            ApiError::Request { status, message } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(message, "404 Project Not Found");
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_sends_form_encoded_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("name=demo&visibility=private")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":10,"name":"demo","path":"demo"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let params = Options::new()
            .set("name", "demo")
            .set("visibility", "private")
            .to_wire();
        let created: Value = client.post("projects", params).await.unwrap();

        assert_eq!(created["id"], 10);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_validation_failure_never_hits_the_network() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .projects()
            .all(Options::new().set("nonsense", 1))
            .await
            .unwrap_err();

        match err {
            ApiError::Configuration(message) => assert!(message.contains("nonsense")),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(client.last_response().is_none());
    }

    #[test]
    fn test_endpoint_url_keeps_host_and_replaces_path() {
        let client = GitlabClient::with_url("https://gitlab.example.com").unwrap();
        let url = client.endpoint_url("projects/group%2Fapp/issues");

        assert_eq!(url.host_str(), Some("gitlab.example.com"));
        assert_eq!(url.path(), "/projects/group%2Fapp/issues");
    }
}
