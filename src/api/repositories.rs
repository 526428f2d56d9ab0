//
//  gitlab-api
//  api/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Repository endpoints and models.
//!
//! The git-level view of a project: branches (including protection),
//! commits and their comments, the tree listing, ref comparison,
//! contributor statistics and merge-base lookup. Branch names and refs
//! are path-encoded before they land in a URL, so `feature/login` and
//! `v1.2.3` address correctly.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{encode_path, project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};

/// Repository endpoint group.
pub struct Repositories<'a> {
    client: &'a GitlabClient,
}

impl<'a> Repositories<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    // -- branches ----------------------------------------------------------

    /// Lists branches.
    pub async fn branches(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Branch>, ApiError> {
        let params = OptionsResolver::base().defined("search").resolve(options)?;
        self.client
            .get(&project_path(&project, "repository/branches"), params)
            .await
    }

    /// Fetches a single branch.
    pub async fn branch(&self, project: ProjectId, branch: &str) -> Result<Branch, ApiError> {
        self.client
            .get(
                &project_path(
                    &project,
                    &format!("repository/branches/{}", encode_path(branch)),
                ),
                Default::default(),
            )
            .await
    }

    /// Creates a branch pointing at the given ref.
    pub async fn create_branch(
        &self,
        project: ProjectId,
        branch: &str,
        from_ref: &str,
    ) -> Result<Branch, ApiError> {
        let params = Options::new()
            .set("branch", branch)
            .set("ref", from_ref)
            .to_wire();
        self.client
            .post(&project_path(&project, "repository/branches"), params)
            .await
    }

    /// Deletes a branch.
    pub async fn delete_branch(&self, project: ProjectId, branch: &str) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(
                    &project,
                    &format!("repository/branches/{}", encode_path(branch)),
                ),
                Default::default(),
            )
            .await
    }

    /// Protects a branch.
    pub async fn protect_branch(
        &self,
        project: ProjectId,
        branch: &str,
        options: Options,
    ) -> Result<Branch, ApiError> {
        self.client
            .put(
                &project_path(
                    &project,
                    &format!("repository/branches/{}/protect", encode_path(branch)),
                ),
                options.to_wire(),
            )
            .await
    }

    /// Removes protection from a branch.
    pub async fn unprotect_branch(
        &self,
        project: ProjectId,
        branch: &str,
    ) -> Result<Branch, ApiError> {
        self.client
            .put(
                &project_path(
                    &project,
                    &format!("repository/branches/{}/unprotect", encode_path(branch)),
                ),
                Default::default(),
            )
            .await
    }

    // -- commits -----------------------------------------------------------

    /// Lists commits, newest first.
    pub async fn commits(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Commit>, ApiError> {
        let params = OptionsResolver::base()
            .defined("ref_name")
            .defined("path")
            .datetime("since")
            .datetime("until")
            .boolean("all")
            .resolve(options)?;
        self.client
            .get(&project_path(&project, "repository/commits"), params)
            .await
    }

    /// Fetches a single commit by SHA or ref name.
    pub async fn commit(&self, project: ProjectId, sha: &str) -> Result<Commit, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("repository/commits/{}", encode_path(sha))),
                Default::default(),
            )
            .await
    }

    /// Lists comments on a commit.
    pub async fn commit_comments(
        &self,
        project: ProjectId,
        sha: &str,
        options: Options,
    ) -> Result<Vec<CommitComment>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(
                &project_path(
                    &project,
                    &format!("repository/commits/{}/comments", encode_path(sha)),
                ),
                params,
            )
            .await
    }

    /// Adds a comment to a commit.
    pub async fn create_commit_comment(
        &self,
        project: ProjectId,
        sha: &str,
        note: &str,
        options: Options,
    ) -> Result<CommitComment, ApiError> {
        let params = options.set("note", note).to_wire();
        self.client
            .post(
                &project_path(
                    &project,
                    &format!("repository/commits/{}/comments", encode_path(sha)),
                ),
                params,
            )
            .await
    }

    /// Build/CI status of a commit.
    pub async fn commit_build_status(
        &self,
        project: ProjectId,
        sha: &str,
        options: Options,
    ) -> Result<Vec<CommitStatus>, ApiError> {
        let params = OptionsResolver::base()
            .defined("ref")
            .defined("stage")
            .defined("name")
            .boolean("all")
            .resolve(options)?;
        self.client
            .get(
                &project_path(
                    &project,
                    &format!("repository/commits/{}/statuses", encode_path(sha)),
                ),
                params,
            )
            .await
    }

    // -- tree & comparison -------------------------------------------------

    /// Compares two refs.
    pub async fn compare(
        &self,
        project: ProjectId,
        from: &str,
        to: &str,
    ) -> Result<Comparison, ApiError> {
        let params = Options::new().set("from", from).set("to", to).to_wire();
        self.client
            .get(&project_path(&project, "repository/compare"), params)
            .await
    }

    /// Lists the repository tree.
    pub async fn tree(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<TreeNode>, ApiError> {
        let params = OptionsResolver::base()
            .defined("path")
            .defined("ref")
            .boolean("recursive")
            .resolve(options)?;
        self.client
            .get(&project_path(&project, "repository/tree"), params)
            .await
    }

    /// Contributor statistics.
    pub async fn contributors(&self, project: ProjectId) -> Result<Vec<Contributor>, ApiError> {
        self.client
            .get(
                &project_path(&project, "repository/contributors"),
                Default::default(),
            )
            .await
    }

    /// The common ancestor of the given refs.
    pub async fn merge_base(
        &self,
        project: ProjectId,
        refs: &[&str],
    ) -> Result<Commit, ApiError> {
        let params = Options::new()
            .set("refs", refs.iter().map(|r| r.to_string()).collect::<Vec<_>>())
            .to_wire();
        self.client
            .get(&project_path(&project, "repository/merge_base"), params)
            .await
    }
}

/// A repository branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Head commit of the branch.
    #[serde(default)]
    pub commit: Option<Commit>,
    /// Whether the branch is merged into the default branch.
    #[serde(default)]
    pub merged: Option<bool>,
    /// Whether the branch is protected.
    #[serde(default)]
    pub protected: Option<bool>,
    /// Whether force-push is allowed.
    #[serde(default)]
    pub developers_can_push: Option<bool>,
    /// Whether developers may merge.
    #[serde(default)]
    pub developers_can_merge: Option<bool>,
}

/// A commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Full SHA.
    pub id: String,
    /// Abbreviated SHA.
    #[serde(default)]
    pub short_id: Option<String>,
    /// First line of the message.
    #[serde(default)]
    pub title: Option<String>,
    /// Full commit message.
    #[serde(default)]
    pub message: Option<String>,
    /// Author name from the commit object.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Author email from the commit object.
    #[serde(default)]
    pub author_email: Option<String>,
    /// Authoring timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Parent SHAs.
    #[serde(default)]
    pub parent_ids: Vec<String>,
}

/// A comment on a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitComment {
    /// Comment text.
    pub note: String,
    /// Commented file path, when line-scoped.
    #[serde(default)]
    pub path: Option<String>,
    /// Commented line, when line-scoped.
    #[serde(default)]
    pub line: Option<u64>,
    /// `new` or `old` side of the diff.
    #[serde(default)]
    pub line_type: Option<String>,
}

/// One CI status attached to a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Status id.
    pub id: u64,
    /// Commit SHA.
    #[serde(default)]
    pub sha: Option<String>,
    /// Status (`pending`, `running`, `success`, `failed`, `canceled`).
    #[serde(default)]
    pub status: Option<String>,
    /// Status name (usually the job name).
    #[serde(default)]
    pub name: Option<String>,
    /// Ref the status belongs to.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

/// The result of comparing two refs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Head commit of the comparison.
    #[serde(default)]
    pub commit: Option<Commit>,
    /// Commits between the two refs.
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// File-level diffs.
    #[serde(default)]
    pub diffs: Vec<crate::api::merge_requests::Diff>,
    /// True when the comparison timed out server-side.
    #[serde(default)]
    pub compare_timeout: Option<bool>,
    /// True when comparing identical refs.
    #[serde(default)]
    pub compare_same_ref: Option<bool>,
}

/// A repository contributor with commit statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Contributor name.
    pub name: String,
    /// Contributor email.
    #[serde(default)]
    pub email: Option<String>,
    /// Number of commits.
    #[serde(default)]
    pub commits: Option<u64>,
    /// Lines added.
    #[serde(default)]
    pub additions: Option<u64>,
    /// Lines removed.
    #[serde(default)]
    pub deletions: Option<u64>,
}

/// One entry of a repository tree listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Object SHA.
    pub id: String,
    /// Entry name.
    pub name: String,
    /// `tree` or `blob`.
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    /// Full path within the repository.
    #[serde(default)]
    pub path: Option<String>,
    /// POSIX mode string.
    #[serde(default)]
    pub mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_branch_name_is_path_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/api/v4/projects/2/repository/branches/feature%2Flogin",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"feature/login","protected":false}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let branch = client
            .repositories()
            .branch(2u64.into(), "feature/login")
            .await
            .unwrap();

        assert_eq!(branch.name, "feature/login");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_compare_sends_from_and_to() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/2/repository/compare?from=main&to=develop")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"commits":[],"diffs":[],"compare_same_ref":false}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let comparison = client
            .repositories()
            .compare(2u64.into(), "main", "develop")
            .await
            .unwrap();

        assert_eq!(comparison.compare_same_ref, Some(false));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_merge_base_repeats_refs_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/api/v4/projects/2/repository/merge_base?refs[]=main&refs[]=feature",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"abc123","short_id":"abc"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let base = client
            .repositories()
            .merge_base(2u64.into(), &["main", "feature"])
            .await
            .unwrap();

        assert_eq!(base.id, "abc123");
        mock.assert_async().await;
    }
}
