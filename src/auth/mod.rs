//
//  gitlab-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication
//!
//! GitLab accepts a personal/impersonation token in three mutually
//! exclusive ways, and exactly one of them is active on a client at any
//! time:
//!
//! | Mode | Wire form |
//! |------|-----------|
//! | [`Authentication::http_token`] | `PRIVATE-TOKEN` request header |
//! | [`Authentication::url_token`] | `private_token` query parameter |
//! | [`Authentication::oauth_token`] | `Authorization: Bearer` header |
//!
//! Every mode supports impersonation of another user via
//! [`with_sudo`](Authentication::with_sudo), which adds a `SUDO` header
//! (header/bearer modes) or a `sudo` query parameter (query mode).
//!
//! The query-parameter mode predates the header forms and GitLab has
//! deprecated it server-side; it remains the default here so that an
//! unconfigured client behaves exactly like the clients this one
//! replaces. Prefer [`Authentication::http_token`] in new code.
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_api::{Authentication, GitlabClient};
//!
//! # fn example() -> Result<(), gitlab_api::ApiError> {
//! let client = GitlabClient::new()?
//!     .authenticate(Authentication::http_token("glpat-secret").with_sudo("deploy-bot"));
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};

use crate::api::common::ApiError;
use crate::http::request::Request;

/// `PRIVATE-TOKEN` header name.
const PRIVATE_TOKEN: HeaderName = HeaderName::from_static("private-token");

/// `SUDO` impersonation header name.
const SUDO: HeaderName = HeaderName::from_static("sudo");

/// An authentication mode plus its token and optional impersonation
/// subject.
///
/// Values are plain data; the pipeline's authentication stage calls
/// [`apply`](Authentication::apply) on each outgoing request. Replacing
/// the client's authentication replaces the stage wholesale, so a request
/// never carries artifacts of two modes at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// Token sent as the `PRIVATE-TOKEN` header.
    HttpToken {
        /// The private or personal access token.
        token: String,
        /// Optional username to impersonate.
        sudo: Option<String>,
    },
    /// Token appended to the query string as `private_token`.
    ///
    /// Deprecated server-side but kept as the default mode for
    /// compatibility with existing deployments.
    UrlToken {
        /// The private or personal access token.
        token: String,
        /// Optional username to impersonate.
        sudo: Option<String>,
    },
    /// OAuth2 access token sent as `Authorization: Bearer`.
    OauthToken {
        /// The OAuth2 access token.
        token: String,
        /// Optional username to impersonate.
        sudo: Option<String>,
    },
}

impl Authentication {
    /// Header-token authentication (`PRIVATE-TOKEN`).
    pub fn http_token(token: impl Into<String>) -> Self {
        Self::HttpToken {
            token: token.into(),
            sudo: None,
        }
    }

    /// Query-parameter authentication (`private_token=...`).
    pub fn url_token(token: impl Into<String>) -> Self {
        Self::UrlToken {
            token: token.into(),
            sudo: None,
        }
    }

    /// Bearer-token authentication (`Authorization: Bearer ...`).
    pub fn oauth_token(token: impl Into<String>) -> Self {
        Self::OauthToken {
            token: token.into(),
            sudo: None,
        }
    }

    /// Sets the user to impersonate on every request.
    ///
    /// Requires a token with admin rights on the GitLab instance.
    pub fn with_sudo(mut self, subject: impl Into<String>) -> Self {
        match &mut self {
            Self::HttpToken { sudo, .. }
            | Self::UrlToken { sudo, .. }
            | Self::OauthToken { sudo, .. } => *sudo = Some(subject.into()),
        }
        self
    }

    /// Applies this mode's credentials to an outgoing request.
    ///
    /// Header modes set their headers; the query mode appends to the
    /// existing query string without disturbing parameters already
    /// present.
    pub(crate) fn apply(&self, request: Request) -> Result<Request, ApiError> {
        match self {
            Self::HttpToken { token, sudo } => {
                let mut request = request.with_header(PRIVATE_TOKEN, header_value(token)?);
                if let Some(subject) = sudo {
                    request = request.with_header(SUDO, header_value(subject)?);
                }
                Ok(request)
            }
            Self::UrlToken { token, sudo } => {
                let mut url = request.url().clone();
                {
                    let mut pairs = url.query_pairs_mut();
                    pairs.append_pair("private_token", token);
                    if let Some(subject) = sudo {
                        pairs.append_pair("sudo", subject);
                    }
                }
                Ok(request.with_url(url))
            }
            Self::OauthToken { token, sudo } => {
                let mut request =
                    request.with_header(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
                if let Some(subject) = sudo {
                    request = request.with_header(SUDO, header_value(subject)?);
                }
                Ok(request)
            }
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|_| {
        ApiError::Configuration(
            "token contains characters not valid in an HTTP header".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn request(url: &str) -> Request {
        Request::new(Method::GET, Url::parse(url).unwrap())
    }

    #[test]
    fn test_http_token_sets_private_token_header() {
        let auth = Authentication::http_token("secret");
        let req = auth.apply(request("https://gitlab.com/api/v4/user")).unwrap();

        assert_eq!(req.headers()["PRIVATE-TOKEN"], "secret");
        assert!(!req.headers().contains_key("SUDO"));
    }

    #[test]
    fn test_http_token_with_sudo_sets_both_headers() {
        let auth = Authentication::http_token("secret").with_sudo("other-user");
        let req = auth.apply(request("https://gitlab.com/api/v4/user")).unwrap();

        assert_eq!(req.headers()["PRIVATE-TOKEN"], "secret");
        assert_eq!(req.headers()["SUDO"], "other-user");
    }

    #[test]
    fn test_url_token_appends_to_existing_query() {
        let auth = Authentication::url_token("secret").with_sudo("other");
        let req = auth
            .apply(request("https://gitlab.com/api/v4/projects?page=2"))
            .unwrap();

        assert_eq!(
            req.url().query(),
            Some("page=2&private_token=secret&sudo=other")
        );
        assert!(!req.headers().contains_key("PRIVATE-TOKEN"));
    }

    #[test]
    fn test_url_token_encodes_token_safely() {
        let auth = Authentication::url_token("s3cr/et+");
        let req = auth.apply(request("https://gitlab.com/api/v4/user")).unwrap();

        let query = req.url().query().unwrap();
        assert!(query.starts_with("private_token="));
        assert!(!query.contains('/'));
    }

    #[test]
    fn test_oauth_token_sets_bearer_header() {
        let auth = Authentication::oauth_token("abc123");
        let req = auth.apply(request("https://gitlab.com/api/v4/user")).unwrap();

        assert_eq!(req.headers()["Authorization"], "Bearer abc123");
    }
}
