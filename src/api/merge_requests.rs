//
//  gitlab-api
//  api/merge_requests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Merge request endpoints and models.
//!
//! Covers the merge request lifecycle (list/show/create/update/merge),
//! notes, the diff and commit views, closing-issue lookup and the
//! approval operations. Merge requests are addressed by project plus
//! iid, like issues.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::issues::{Issue, Note};
use crate::api::options::{Options, OptionsResolver};
use crate::api::repositories::Commit;
use crate::api::users::User;

/// Merge request endpoint group.
pub struct MergeRequests<'a> {
    client: &'a GitlabClient,
}

impl<'a> MergeRequests<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    fn list_resolver() -> OptionsResolver {
        OptionsResolver::base()
            .values("state", &["all", "merged", "opened", "closed"])
            .values("order_by", &["created_at", "updated_at"])
            .values("sort", &["asc", "desc"])
            .defined("iids")
            .defined("labels")
            .defined("milestone")
            .defined("search")
            .datetime("created_after")
            .datetime("created_before")
            .datetime("updated_after")
            .datetime("updated_before")
    }

    /// Lists a project's merge requests.
    pub async fn all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<MergeRequest>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client
            .get(&project_path(&project, "merge_requests"), params)
            .await
    }

    /// Fetches a single merge request.
    pub async fn show(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<MergeRequest, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}")),
                Default::default(),
            )
            .await
    }

    /// Opens a merge request.
    pub async fn create(
        &self,
        project: ProjectId,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        options: Options,
    ) -> Result<MergeRequest, ApiError> {
        let params = options
            .set("source_branch", source_branch)
            .set("target_branch", target_branch)
            .set("title", title)
            .to_wire();
        self.client
            .post(&project_path(&project, "merge_requests"), params)
            .await
    }

    /// Updates a merge request.
    pub async fn update(
        &self,
        project: ProjectId,
        mr_iid: u64,
        options: Options,
    ) -> Result<MergeRequest, ApiError> {
        self.client
            .put(
                &project_path(&project, &format!("merge_requests/{mr_iid}")),
                options.to_wire(),
            )
            .await
    }

    /// Accepts (merges) a merge request.
    pub async fn merge(
        &self,
        project: ProjectId,
        mr_iid: u64,
        options: Options,
    ) -> Result<MergeRequest, ApiError> {
        self.client
            .put(
                &project_path(&project, &format!("merge_requests/{mr_iid}/merge")),
                options.to_wire(),
            )
            .await
    }

    /// Lists a merge request's notes.
    pub async fn show_notes(
        &self,
        project: ProjectId,
        mr_iid: u64,
        options: Options,
    ) -> Result<Vec<Note>, ApiError> {
        let params = OptionsResolver::base()
            .values("order_by", &["created_at", "updated_at"])
            .values("sort", &["asc", "desc"])
            .resolve(options)?;
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/notes")),
                params,
            )
            .await
    }

    /// Adds a note.
    pub async fn add_note(
        &self,
        project: ProjectId,
        mr_iid: u64,
        body: &str,
    ) -> Result<Note, ApiError> {
        let params = Options::new().set("body", body).to_wire();
        self.client
            .post(
                &project_path(&project, &format!("merge_requests/{mr_iid}/notes")),
                params,
            )
            .await
    }

    /// Removes a note.
    pub async fn remove_note(
        &self,
        project: ProjectId,
        mr_iid: u64,
        note_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(
                    &project,
                    &format!("merge_requests/{mr_iid}/notes/{note_id}"),
                ),
                Default::default(),
            )
            .await
    }

    /// The merge request with its change list.
    pub async fn changes(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<MergeRequest, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/changes")),
                Default::default(),
            )
            .await
    }

    /// Commits contained in a merge request.
    pub async fn commits(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Vec<Commit>, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/commits")),
                Default::default(),
            )
            .await
    }

    /// Issues that will close when this merge request merges.
    pub async fn closes_issues(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Vec<Issue>, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/closes_issues")),
                Default::default(),
            )
            .await
    }

    /// Approval state of a merge request.
    pub async fn approvals(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Approvals, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/approvals")),
                Default::default(),
            )
            .await
    }

    /// Approves a merge request.
    pub async fn approve(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Approvals, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("merge_requests/{mr_iid}/approve")),
                Default::default(),
            )
            .await
    }

    /// Withdraws an approval.
    pub async fn unapprove(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Value, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("merge_requests/{mr_iid}/unapprove")),
                Default::default(),
            )
            .await
    }

    /// Award emoji on a merge request.
    pub async fn award_emoji(
        &self,
        project: ProjectId,
        mr_iid: u64,
    ) -> Result<Value, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("merge_requests/{mr_iid}/award_emoji")),
                Default::default(),
            )
            .await
    }
}

/// A merge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Global merge request id.
    pub id: u64,
    /// Per-project merge request number.
    pub iid: u64,
    /// Owning project id.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Title line.
    pub title: String,
    /// Description body (Markdown).
    #[serde(default)]
    pub description: Option<String>,
    /// `opened`, `closed`, `merged` or `locked`.
    #[serde(default)]
    pub state: Option<String>,
    /// Branch the changes come from.
    #[serde(default)]
    pub source_branch: Option<String>,
    /// Branch the changes merge into.
    #[serde(default)]
    pub target_branch: Option<String>,
    /// The opening user.
    #[serde(default)]
    pub author: Option<User>,
    /// The assigned user, if any.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Attached label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Merge status (`can_be_merged`, …).
    #[serde(default)]
    pub merge_status: Option<String>,
    /// SHA of the head commit.
    #[serde(default)]
    pub sha: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Per-file changes; present only on the `changes` view.
    #[serde(default)]
    pub changes: Option<Vec<Diff>>,
}

/// One file's diff within a merge request or comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diff {
    /// Path before the change.
    #[serde(default)]
    pub old_path: Option<String>,
    /// Path after the change.
    #[serde(default)]
    pub new_path: Option<String>,
    /// Unified diff hunk.
    #[serde(default)]
    pub diff: Option<String>,
    /// True when the file was added.
    #[serde(default)]
    pub new_file: Option<bool>,
    /// True when the file was renamed.
    #[serde(default)]
    pub renamed_file: Option<bool>,
    /// True when the file was deleted.
    #[serde(default)]
    pub deleted_file: Option<bool>,
}

/// Approval state of a merge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approvals {
    /// Approvals still required before merging.
    #[serde(default)]
    pub approvals_left: Option<u64>,
    /// Required approval count.
    #[serde(default)]
    pub approvals_required: Option<u64>,
    /// Users who already approved.
    #[serde(default)]
    pub approved_by: Vec<ApprovedBy>,
}

/// One entry of the approved-by list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedBy {
    /// The approving user.
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_rejects_unknown_state() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .merge_requests()
            .all(1u64.into(), Options::new().set("state", "draft"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_create_sends_branches_and_title() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects/4/merge_requests")
            .match_body("source_branch=feature&target_branch=main&title=Add%20pager")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":20,"iid":5,"title":"Add pager","state":"opened"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let mr = client
            .merge_requests()
            .create(4u64.into(), "feature", "main", "Add pager", Options::new())
            .await
            .unwrap();

        assert_eq!(mr.iid, 5);
        assert_eq!(mr.state.as_deref(), Some("opened"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_merge_puts_to_merge_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v4/projects/4/merge_requests/5/merge")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":20,"iid":5,"title":"Add pager","state":"merged"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let mr = client
            .merge_requests()
            .merge(4u64.into(), 5, Options::new())
            .await
            .unwrap();

        assert_eq!(mr.state.as_deref(), Some("merged"));
        mock.assert_async().await;
    }
}
