//
//  gitlab-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # GitLab API Client Library
//!
//! A typed, async client for the GitLab REST API (v4), for gitlab.com and
//! self-hosted instances alike.
//!
//! ## Overview
//!
//! The crate is a thin, predictable layer over the HTTP API: one method
//! per endpoint, building its path and validated parameters from typed
//! arguments, sent through a fixed middleware pipeline that handles
//! authentication, the `/api/v4` prefix, default headers and
//! error-status translation. Responses come back as plain serde models.
//!
//! ## Features
//!
//! - **Three authentication modes**: `PRIVATE-TOKEN` header, legacy query
//!   token, OAuth bearer — plus `sudo` impersonation
//! - **Validated options**: unknown or ill-typed parameters fail fast
//!   with an [`ApiError::Configuration`] before any network call
//! - **Link-header pagination**: [`ResultPager`] follows the server's
//!   own `next`/`prev`/`first`/`last` links
//! - **Explicit errors**: configuration, HTTP and transport failures are
//!   distinct enum variants, ready for pattern matching
//! - **Injectable transport**: the pipeline ends in a [`Transport`]
//!   trait, so tests run against stubs instead of sockets
//!
//! ## Module Structure
//!
//! - [`api`]: The client, endpoint groups, models, options and pagination
//! - [`auth`]: Authentication modes
//! - [`http`]: The request pipeline, transport seam, query encoding and
//!   response mediation
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_api::{Authentication, GitlabClient, Options};
//!
//! # async fn example() -> Result<(), gitlab_api::ApiError> {
//! let client = GitlabClient::new()?
//!     .authenticate(Authentication::http_token("glpat-secret"));
//!
//! // One page of projects.
//! let projects = client
//!     .projects()
//!     .all(Options::new().set("membership", true).set("per_page", 20))
//!     .await?;
//!
//! // Every page, following Link headers.
//! let everything = client
//!     .pager()
//!     .fetch_all(|| async { client.projects().all(Options::new()).await })
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// API client, endpoint groups, models, option validation and pagination.
pub mod api;

/// Authentication modes and their wire application.
pub mod auth;

/// The HTTP pipeline: requests, responses, middleware stages, transport,
/// query encoding and response mediation.
pub mod http;

pub use api::client::GitlabClient;
pub use api::common::{ApiError, ProjectId, ResultPager};
pub use api::options::{OptionValue, Options, OptionsResolver, ValueKind};
pub use auth::Authentication;
pub use http::mediator::Content;
pub use http::transport::{ReqwestTransport, Transport};

/// Crate version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
