//
//  gitlab-api
//  api/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Issue endpoints and models.
//!
//! Issues can be listed instance-wide or per project; the same filter
//! schema (state, labels, milestone, search, creation/update windows)
//! applies to both. Notes (comments), time tracking and the
//! closed-by-merge-requests lookup live here too, addressed by project
//! plus issue iid — the per-project number shown in the UI, not the
//! global id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::merge_requests::MergeRequest;
use crate::api::options::{Options, OptionsResolver};
use crate::api::users::User;

/// Issue endpoint group.
pub struct Issues<'a> {
    client: &'a GitlabClient,
}

impl<'a> Issues<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    fn list_resolver() -> OptionsResolver {
        OptionsResolver::base()
            .values("state", &["opened", "closed"])
            .defined("labels")
            .defined("milestone")
            .defined("iids")
            .values("order_by", &["created_at", "updated_at"])
            .values("sort", &["asc", "desc"])
            .defined("search")
            .datetime("created_after")
            .datetime("created_before")
            .datetime("updated_after")
            .datetime("updated_before")
    }

    /// Lists issues across all projects visible to the user.
    pub async fn all(&self, options: Options) -> Result<Vec<Issue>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client.get("issues", params).await
    }

    /// Lists issues of one project.
    pub async fn all_for_project(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Issue>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client
            .get(&project_path(&project, "issues"), params)
            .await
    }

    /// Fetches a single issue by its per-project iid.
    pub async fn show(&self, project: ProjectId, issue_iid: u64) -> Result<Issue, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}")),
                Default::default(),
            )
            .await
    }

    /// Opens a new issue.
    pub async fn create(
        &self,
        project: ProjectId,
        title: &str,
        options: Options,
    ) -> Result<Issue, ApiError> {
        let params = options.set("title", title).to_wire();
        self.client
            .post(&project_path(&project, "issues"), params)
            .await
    }

    /// Updates an issue (including closing it via `state_event`).
    pub async fn update(
        &self,
        project: ProjectId,
        issue_iid: u64,
        options: Options,
    ) -> Result<Issue, ApiError> {
        self.client
            .put(
                &project_path(&project, &format!("issues/{issue_iid}")),
                options.to_wire(),
            )
            .await
    }

    /// Moves an issue to another project.
    pub async fn move_to(
        &self,
        project: ProjectId,
        issue_iid: u64,
        to_project_id: u64,
    ) -> Result<Issue, ApiError> {
        let params = Options::new().set("to_project_id", to_project_id).to_wire();
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/move")),
                params,
            )
            .await
    }

    /// Deletes an issue.
    pub async fn remove(&self, project: ProjectId, issue_iid: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("issues/{issue_iid}")),
                Default::default(),
            )
            .await
    }

    // -- notes -------------------------------------------------------------

    /// Lists an issue's notes.
    pub async fn show_notes(
        &self,
        project: ProjectId,
        issue_iid: u64,
        options: Options,
    ) -> Result<Vec<Note>, ApiError> {
        let params = OptionsResolver::base()
            .values("order_by", &["created_at", "updated_at"])
            .values("sort", &["asc", "desc"])
            .resolve(options)?;
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}/notes")),
                params,
            )
            .await
    }

    /// Fetches a single note.
    pub async fn show_note(
        &self,
        project: ProjectId,
        issue_iid: u64,
        note_id: u64,
    ) -> Result<Note, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}/notes/{note_id}")),
                Default::default(),
            )
            .await
    }

    /// Adds a note to an issue.
    pub async fn add_note(
        &self,
        project: ProjectId,
        issue_iid: u64,
        body: &str,
    ) -> Result<Note, ApiError> {
        let params = Options::new().set("body", body).to_wire();
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/notes")),
                params,
            )
            .await
    }

    /// Edits a note.
    pub async fn update_note(
        &self,
        project: ProjectId,
        issue_iid: u64,
        note_id: u64,
        body: &str,
    ) -> Result<Note, ApiError> {
        let params = Options::new().set("body", body).to_wire();
        self.client
            .put(
                &project_path(&project, &format!("issues/{issue_iid}/notes/{note_id}")),
                params,
            )
            .await
    }

    /// Removes a note.
    pub async fn remove_note(
        &self,
        project: ProjectId,
        issue_iid: u64,
        note_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("issues/{issue_iid}/notes/{note_id}")),
                Default::default(),
            )
            .await
    }

    // -- time tracking -----------------------------------------------------

    /// Sets the time estimate (a duration string such as `3h30m`).
    pub async fn set_time_estimate(
        &self,
        project: ProjectId,
        issue_iid: u64,
        duration: &str,
    ) -> Result<TimeStats, ApiError> {
        let params = Options::new().set("duration", duration).to_wire();
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/time_estimate")),
                params,
            )
            .await
    }

    /// Clears the time estimate.
    pub async fn reset_time_estimate(
        &self,
        project: ProjectId,
        issue_iid: u64,
    ) -> Result<TimeStats, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/reset_time_estimate")),
                Default::default(),
            )
            .await
    }

    /// Adds spent time.
    pub async fn add_spent_time(
        &self,
        project: ProjectId,
        issue_iid: u64,
        duration: &str,
    ) -> Result<TimeStats, ApiError> {
        let params = Options::new().set("duration", duration).to_wire();
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/add_spent_time")),
                params,
            )
            .await
    }

    /// Clears spent time.
    pub async fn reset_spent_time(
        &self,
        project: ProjectId,
        issue_iid: u64,
    ) -> Result<TimeStats, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("issues/{issue_iid}/reset_spent_time")),
                Default::default(),
            )
            .await
    }

    /// Current time tracking figures.
    pub async fn time_stats(
        &self,
        project: ProjectId,
        issue_iid: u64,
    ) -> Result<TimeStats, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}/time_stats")),
                Default::default(),
            )
            .await
    }

    /// Merge requests that will close this issue when merged.
    pub async fn closed_by_merge_requests(
        &self,
        project: ProjectId,
        issue_iid: u64,
    ) -> Result<Vec<MergeRequest>, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}/closed_by")),
                Default::default(),
            )
            .await
    }

    /// Award emoji on an issue.
    pub async fn award_emoji(
        &self,
        project: ProjectId,
        issue_iid: u64,
    ) -> Result<Value, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("issues/{issue_iid}/award_emoji")),
                Default::default(),
            )
            .await
    }
}

/// A GitLab issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Global issue id.
    pub id: u64,
    /// Per-project issue number.
    pub iid: u64,
    /// Owning project id.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Title line.
    pub title: String,
    /// Description body (Markdown).
    #[serde(default)]
    pub description: Option<String>,
    /// `opened` or `closed`.
    #[serde(default)]
    pub state: Option<String>,
    /// Attached label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// The reporting user.
    #[serde(default)]
    pub author: Option<User>,
    /// The assigned user, if any.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
}

impl Issue {
    /// Lists this issue's notes by re-invoking the API.
    ///
    /// Only works for issues hydrated from a payload that includes
    /// `project_id`; reports a configuration error otherwise.
    pub async fn notes(&self, client: &GitlabClient) -> Result<Vec<Note>, ApiError> {
        let project_id = self.project_id.ok_or_else(|| {
            ApiError::Configuration("issue payload did not include a project id".to_string())
        })?;
        client
            .issues()
            .show_notes(project_id.into(), self.iid, Options::new())
            .await
    }
}

/// A note (comment) on an issue or merge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Numeric note id.
    pub id: u64,
    /// Note body (Markdown).
    pub body: String,
    /// The note's author.
    #[serde(default)]
    pub author: Option<User>,
    /// True for system-generated notes (state changes, etc.).
    #[serde(default)]
    pub system: Option<bool>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Time tracking figures for an issue or merge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeStats {
    /// Estimated seconds.
    #[serde(default)]
    pub time_estimate: Option<u64>,
    /// Spent seconds.
    #[serde(default)]
    pub total_time_spent: Option<u64>,
    /// Estimate as a human-readable duration.
    #[serde(default)]
    pub human_time_estimate: Option<String>,
    /// Spent time as a human-readable duration.
    #[serde(default)]
    pub human_total_time_spent: Option<String>,
}
