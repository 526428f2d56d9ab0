//
//  gitlab-api
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project endpoints and models.
//!
//! Projects are the central resource of GitLab; this group covers the
//! project lifecycle (list/show/create/update/remove, archive, fork,
//! transfer), project pipelines, members, hooks, CI variables, detected
//! languages and file uploads.
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_api::{GitlabClient, Options};
//!
//! # async fn example(client: GitlabClient) -> Result<(), gitlab_api::ApiError> {
//! let mine = client
//!     .projects()
//!     .all(Options::new().set("owned", true).set("order_by", "last_activity_at"))
//!     .await?;
//! let detail = client.projects().show("group/app".into(), Options::new()).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::issues::Issue;
use crate::api::options::{Options, OptionsResolver};
use crate::http::request::FilePart;

/// Project endpoint group.
pub struct Projects<'a> {
    client: &'a GitlabClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    fn list_resolver() -> OptionsResolver {
        OptionsResolver::base()
            .boolean("archived")
            .values("visibility", &["public", "internal", "private"])
            .values(
                "order_by",
                &["id", "name", "path", "created_at", "updated_at", "last_activity_at"],
            )
            .values("sort", &["asc", "desc"])
            .defined("search")
            .boolean("simple")
            .boolean("owned")
            .boolean("membership")
            .boolean("starred")
            .boolean("statistics")
            .boolean("with_issues_enabled")
            .boolean("with_merge_requests_enabled")
            .int_values("min_access_level", &[10, 20, 30, 40, 50])
    }

    /// Lists projects visible to the authenticated user.
    pub async fn all(&self, options: Options) -> Result<Vec<Project>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client.get("projects", params).await
    }

    /// Fetches a single project.
    pub async fn show(&self, project: ProjectId, options: Options) -> Result<Project, ApiError> {
        let params = OptionsResolver::base()
            .boolean("statistics")
            .boolean("with_custom_attributes")
            .resolve(options)?;
        self.client
            .get(&format!("projects/{}", project.encoded()), params)
            .await
    }

    /// Creates a project owned by the authenticated user.
    pub async fn create(&self, name: &str, options: Options) -> Result<Project, ApiError> {
        let params = options.set("name", name).to_wire();
        self.client.post("projects", params).await
    }

    /// Creates a project owned by another user (admin only).
    pub async fn create_for_user(
        &self,
        user_id: u64,
        name: &str,
        options: Options,
    ) -> Result<Project, ApiError> {
        let params = options.set("name", name).to_wire();
        self.client
            .post(&format!("projects/user/{user_id}"), params)
            .await
    }

    /// Updates project settings.
    pub async fn update(&self, project: ProjectId, options: Options) -> Result<Project, ApiError> {
        self.client
            .put(&format!("projects/{}", project.encoded()), options.to_wire())
            .await
    }

    /// Deletes a project.
    pub async fn remove(&self, project: ProjectId) -> Result<(), ApiError> {
        self.client
            .delete(&format!("projects/{}", project.encoded()), Default::default())
            .await
    }

    /// Archives a project.
    pub async fn archive(&self, project: ProjectId) -> Result<Project, ApiError> {
        self.client
            .post(&project_path(&project, "archive"), Default::default())
            .await
    }

    /// Unarchives a project.
    pub async fn unarchive(&self, project: ProjectId) -> Result<Project, ApiError> {
        self.client
            .post(&project_path(&project, "unarchive"), Default::default())
            .await
    }

    /// Forks a project into the authenticated user's namespace (or the
    /// namespace given in the options).
    pub async fn fork(&self, project: ProjectId, options: Options) -> Result<Project, ApiError> {
        self.client
            .post(&project_path(&project, "fork"), options.to_wire())
            .await
    }

    /// Transfers a project to a new namespace.
    pub async fn transfer(
        &self,
        project: ProjectId,
        namespace: &str,
    ) -> Result<Project, ApiError> {
        let params = Options::new().set("namespace", namespace).to_wire();
        self.client
            .put(&project_path(&project, "transfer"), params)
            .await
    }

    // -- pipelines ---------------------------------------------------------

    /// Lists CI pipelines of a project.
    pub async fn pipelines(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Pipeline>, ApiError> {
        let params = OptionsResolver::base()
            .values("scope", &["running", "pending", "finished", "branches", "tags"])
            .values(
                "status",
                &["running", "pending", "success", "failed", "canceled", "skipped"],
            )
            .defined("ref")
            .defined("sha")
            .boolean("yaml_errors")
            .defined("name")
            .defined("username")
            .values("order_by", &["id", "status", "ref", "user_id"])
            .values("sort", &["asc", "desc"])
            .resolve(options)?;
        self.client
            .get(&project_path(&project, "pipelines"), params)
            .await
    }

    /// Fetches a single pipeline.
    pub async fn pipeline(
        &self,
        project: ProjectId,
        pipeline_id: u64,
    ) -> Result<Pipeline, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("pipelines/{pipeline_id}")),
                Default::default(),
            )
            .await
    }

    /// Triggers a pipeline for the given ref.
    pub async fn create_pipeline(
        &self,
        project: ProjectId,
        commit_ref: &str,
    ) -> Result<Pipeline, ApiError> {
        let params = Options::new().set("ref", commit_ref).to_wire();
        self.client
            .post(&project_path(&project, "pipeline"), params)
            .await
    }

    /// Retries the failed jobs of a pipeline.
    pub async fn retry_pipeline(
        &self,
        project: ProjectId,
        pipeline_id: u64,
    ) -> Result<Pipeline, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("pipelines/{pipeline_id}/retry")),
                Default::default(),
            )
            .await
    }

    /// Cancels a running pipeline.
    pub async fn cancel_pipeline(
        &self,
        project: ProjectId,
        pipeline_id: u64,
    ) -> Result<Pipeline, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("pipelines/{pipeline_id}/cancel")),
                Default::default(),
            )
            .await
    }

    /// Deletes a pipeline.
    pub async fn delete_pipeline(
        &self,
        project: ProjectId,
        pipeline_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("pipelines/{pipeline_id}")),
                Default::default(),
            )
            .await
    }

    // -- members -----------------------------------------------------------

    /// Lists direct members of a project.
    pub async fn members(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Member>, ApiError> {
        let params = OptionsResolver::base().defined("query").resolve(options)?;
        self.client
            .get(&project_path(&project, "members"), params)
            .await
    }

    /// Fetches a single member.
    pub async fn member(&self, project: ProjectId, user_id: u64) -> Result<Member, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("members/{user_id}")),
                Default::default(),
            )
            .await
    }

    /// Adds a user to a project with the given access level.
    pub async fn add_member(
        &self,
        project: ProjectId,
        user_id: u64,
        access_level: u64,
    ) -> Result<Member, ApiError> {
        let params = Options::new()
            .set("user_id", user_id)
            .set("access_level", access_level)
            .to_wire();
        self.client
            .post(&project_path(&project, "members"), params)
            .await
    }

    /// Changes a member's access level.
    pub async fn edit_member(
        &self,
        project: ProjectId,
        user_id: u64,
        access_level: u64,
    ) -> Result<Member, ApiError> {
        let params = Options::new().set("access_level", access_level).to_wire();
        self.client
            .put(&project_path(&project, &format!("members/{user_id}")), params)
            .await
    }

    /// Removes a member from a project.
    pub async fn remove_member(&self, project: ProjectId, user_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("members/{user_id}")),
                Default::default(),
            )
            .await
    }

    // -- hooks -------------------------------------------------------------

    /// Lists project webhooks.
    pub async fn hooks(&self, project: ProjectId, options: Options) -> Result<Vec<ProjectHook>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(&project_path(&project, "hooks"), params)
            .await
    }

    /// Fetches a single webhook.
    pub async fn hook(&self, project: ProjectId, hook_id: u64) -> Result<ProjectHook, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("hooks/{hook_id}")),
                Default::default(),
            )
            .await
    }

    /// Registers a webhook on a project.
    pub async fn add_hook(
        &self,
        project: ProjectId,
        url: &str,
        options: Options,
    ) -> Result<ProjectHook, ApiError> {
        let params = options.set("url", url).to_wire();
        self.client
            .post(&project_path(&project, "hooks"), params)
            .await
    }

    /// Updates a webhook.
    pub async fn update_hook(
        &self,
        project: ProjectId,
        hook_id: u64,
        options: Options,
    ) -> Result<ProjectHook, ApiError> {
        self.client
            .put(
                &project_path(&project, &format!("hooks/{hook_id}")),
                options.to_wire(),
            )
            .await
    }

    /// Removes a webhook.
    pub async fn remove_hook(&self, project: ProjectId, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("hooks/{hook_id}")),
                Default::default(),
            )
            .await
    }

    // -- CI variables ------------------------------------------------------

    /// Lists CI variables.
    pub async fn variables(&self, project: ProjectId) -> Result<Vec<Variable>, ApiError> {
        self.client
            .get(&project_path(&project, "variables"), Default::default())
            .await
    }

    /// Fetches a single CI variable.
    pub async fn variable(&self, project: ProjectId, key: &str) -> Result<Variable, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("variables/{}", crate::api::common::encode_path(key))),
                Default::default(),
            )
            .await
    }

    /// Creates a CI variable.
    pub async fn add_variable(
        &self,
        project: ProjectId,
        key: &str,
        value: &str,
    ) -> Result<Variable, ApiError> {
        let params = Options::new().set("key", key).set("value", value).to_wire();
        self.client
            .post(&project_path(&project, "variables"), params)
            .await
    }

    /// Updates a CI variable's value.
    pub async fn update_variable(
        &self,
        project: ProjectId,
        key: &str,
        value: &str,
    ) -> Result<Variable, ApiError> {
        let params = Options::new().set("value", value).to_wire();
        self.client
            .put(
                &project_path(&project, &format!("variables/{}", crate::api::common::encode_path(key))),
                params,
            )
            .await
    }

    /// Removes a CI variable.
    pub async fn remove_variable(&self, project: ProjectId, key: &str) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("variables/{}", crate::api::common::encode_path(key))),
                Default::default(),
            )
            .await
    }

    // -- misc --------------------------------------------------------------

    /// Per-language share of the repository, as reported by GitLab.
    pub async fn languages(&self, project: ProjectId) -> Result<Value, ApiError> {
        self.client
            .get(&project_path(&project, "languages"), Default::default())
            .await
    }

    /// Uploads a file for use in issue or merge request descriptions.
    ///
    /// The file goes up as a multipart part named `file`, with its
    /// basename and a best-effort MIME type.
    pub async fn upload_file(
        &self,
        project: ProjectId,
        file: impl Into<PathBuf>,
    ) -> Result<FileUpload, ApiError> {
        let files = vec![FilePart {
            name: "file".to_string(),
            path: file.into(),
        }];
        self.client
            .post_multipart(&project_path(&project, "uploads"), Default::default(), files)
            .await
    }
}

/// A GitLab project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project id.
    pub id: u64,
    /// Project name.
    pub name: String,
    /// URL-safe path component.
    #[serde(default)]
    pub path: Option<String>,
    /// Full `namespace/path` form.
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Default branch name.
    #[serde(default)]
    pub default_branch: Option<String>,
    /// `public`, `internal` or `private`.
    #[serde(default)]
    pub visibility: Option<String>,
    /// SSH clone URL.
    #[serde(default)]
    pub ssh_url_to_repo: Option<String>,
    /// HTTP clone URL.
    #[serde(default)]
    pub http_url_to_repo: Option<String>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Whether the issue tracker is enabled.
    #[serde(default)]
    pub issues_enabled: Option<bool>,
    /// Whether merge requests are enabled.
    #[serde(default)]
    pub merge_requests_enabled: Option<bool>,
    /// Open issue count (present when requested with statistics).
    #[serde(default)]
    pub open_issues_count: Option<u64>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last activity timestamp.
    #[serde(default)]
    pub last_activity_at: Option<String>,
    /// Whether the project is archived.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Star count.
    #[serde(default)]
    pub star_count: Option<u64>,
    /// Fork count.
    #[serde(default)]
    pub forks_count: Option<u64>,
}

impl Project {
    /// Lists this project's issues by re-invoking the API.
    pub async fn issues(
        &self,
        client: &GitlabClient,
        options: Options,
    ) -> Result<Vec<Issue>, ApiError> {
        client.issues().all_for_project(self.id.into(), options).await
    }

    /// Lists this project's pipelines by re-invoking the API.
    pub async fn pipelines(
        &self,
        client: &GitlabClient,
        options: Options,
    ) -> Result<Vec<Pipeline>, ApiError> {
        client.projects().pipelines(self.id.into(), options).await
    }
}

/// A CI pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Numeric pipeline id.
    pub id: u64,
    /// Pipeline status (`running`, `success`, `failed`, …).
    #[serde(default)]
    pub status: Option<String>,
    /// Git ref the pipeline ran for.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Commit SHA.
    #[serde(default)]
    pub sha: Option<String>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A project or group member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// The member's user id.
    pub id: u64,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Membership state.
    #[serde(default)]
    pub state: Option<String>,
    /// Access level (10 guest … 50 owner).
    #[serde(default)]
    pub access_level: Option<u64>,
}

/// A project webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHook {
    /// Numeric hook id.
    pub id: u64,
    /// Target URL.
    pub url: String,
    /// Owning project id.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Whether push events trigger the hook.
    #[serde(default)]
    pub push_events: Option<bool>,
    /// Whether issue events trigger the hook.
    #[serde(default)]
    pub issues_events: Option<bool>,
    /// Whether merge request events trigger the hook.
    #[serde(default)]
    pub merge_requests_events: Option<bool>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A CI variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub key: String,
    /// Variable value.
    pub value: String,
    /// Whether the variable is protected.
    #[serde(default)]
    pub protected: Option<bool>,
}

/// The result of a project file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    /// Markdown-relative URL of the uploaded file.
    pub url: String,
    /// Ready-to-paste Markdown snippet.
    #[serde(default)]
    pub markdown: Option<String>,
    /// Original file name.
    #[serde(default)]
    pub alt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::GitlabClient;

    #[tokio::test]
    async fn test_all_rejects_unknown_option() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .projects()
            .all(Options::new().set("visibilty", "public"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_all_rejects_disallowed_visibility() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .projects()
            .all(Options::new().set("visibility", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_all_serializes_normalized_booleans() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects?archived=true&order_by=name")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"name":"a"}]"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let projects = client
            .projects()
            .all(Options::new().set("archived", true).set("order_by", "name"))
            .await
            .unwrap();

        assert_eq!(projects.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_show_encodes_namespaced_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/group%2Fapp")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":5,"name":"app","path":"app"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let project = client
            .projects()
            .show("group/app".into(), Options::new())
            .await
            .unwrap();

        assert_eq!(project.id, 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_file_posts_multipart() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"\x89PNG fake")
            .unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects/7/uploads")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url":"/uploads/abc/diagram.png","markdown":"![diagram](/uploads/abc/diagram.png)"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let upload = client
            .projects()
            .upload_file(7u64.into(), &path)
            .await
            .unwrap();

        assert_eq!(upload.url, "/uploads/abc/diagram.png");
        mock.assert_async().await;
    }
}
