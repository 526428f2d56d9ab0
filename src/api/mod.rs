//
//  gitlab-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Layer
//!
//! The typed surface of the crate: the [`GitlabClient`](client::GitlabClient)
//! entry point, per-resource endpoint groups, the option-validation
//! machinery and the pagination helper.
//!
//! ## Architecture
//!
//! - [`client`]: The client itself — pipeline assembly and verb helpers
//! - [`common`]: Shared types ([`ApiError`](common::ApiError),
//!   [`ProjectId`](common::ProjectId)) and the
//!   [`ResultPager`](common::ResultPager)
//! - [`options`]: Option bags and per-endpoint validation schemas
//! - one module per endpoint group, each holding its serde models and an
//!   endpoint struct that borrows the client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_api::{Authentication, GitlabClient, Options};
//!
//! # async fn example() -> Result<(), gitlab_api::ApiError> {
//! let client = GitlabClient::new()?
//!     .authenticate(Authentication::http_token("glpat-secret"));
//!
//! let issues = client
//!     .issues()
//!     .all_for_project(42u64.into(), Options::new().set("state", "opened"))
//!     .await?;
//! for issue in issues {
//!     println!("#{} {}", issue.iid, issue.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod options;

pub mod deployments;
pub mod environments;
pub mod groups;
pub mod issues;
pub mod jobs;
pub mod keys;
pub mod merge_requests;
pub mod milestones;
pub mod namespaces;
pub mod projects;
pub mod repositories;
pub mod repository_files;
pub mod schedules;
pub mod snippets;
pub mod system_hooks;
pub mod tags;
pub mod users;
pub mod version;

pub use client::GitlabClient;
pub use common::{ApiError, ProjectId, ResultPager};
pub use options::{Options, OptionsResolver};
