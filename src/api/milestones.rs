//
//  gitlab-api
//  api/milestones.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project milestone endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::issues::Issue;
use crate::api::options::{Options, OptionsResolver};

/// Milestone endpoint group.
pub struct Milestones<'a> {
    client: &'a GitlabClient,
}

impl<'a> Milestones<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's milestones.
    pub async fn all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Milestone>, ApiError> {
        let params = OptionsResolver::base()
            .defined("iids")
            .values("state", &["active", "closed"])
            .defined("search")
            .resolve(options)?;
        self.client
            .get(&project_path(&project, "milestones"), params)
            .await
    }

    /// Fetches a single milestone.
    pub async fn show(
        &self,
        project: ProjectId,
        milestone_id: u64,
    ) -> Result<Milestone, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("milestones/{milestone_id}")),
                Default::default(),
            )
            .await
    }

    /// Creates a milestone.
    ///
    /// `due_date` and `start_date` options take date-time values and are
    /// normalized to calendar dates on the wire.
    pub async fn create(
        &self,
        project: ProjectId,
        title: &str,
        options: Options,
    ) -> Result<Milestone, ApiError> {
        let params = OptionsResolver::new()
            .required("title")
            .defined("description")
            .date("due_date")
            .date("start_date")
            .resolve(options.set("title", title))?;
        self.client
            .post(&project_path(&project, "milestones"), params)
            .await
    }

    /// Updates a milestone (including closing via `state_event`).
    pub async fn update(
        &self,
        project: ProjectId,
        milestone_id: u64,
        options: Options,
    ) -> Result<Milestone, ApiError> {
        let params = OptionsResolver::new()
            .defined("title")
            .defined("description")
            .date("due_date")
            .date("start_date")
            .values("state_event", &["close", "activate"])
            .resolve(options)?;
        self.client
            .put(
                &project_path(&project, &format!("milestones/{milestone_id}")),
                params,
            )
            .await
    }

    /// Deletes a milestone.
    pub async fn remove(&self, project: ProjectId, milestone_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("milestones/{milestone_id}")),
                Default::default(),
            )
            .await
    }

    /// Lists the issues assigned to a milestone.
    pub async fn issues(
        &self,
        project: ProjectId,
        milestone_id: u64,
    ) -> Result<Vec<Issue>, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("milestones/{milestone_id}/issues")),
                Default::default(),
            )
            .await
    }
}

/// A project milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Global milestone id.
    pub id: u64,
    /// Per-project milestone number.
    #[serde(default)]
    pub iid: Option<u64>,
    /// Owning project id.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Title line.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// `active` or `closed`.
    #[serde(default)]
    pub state: Option<String>,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
    /// Start date (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_create_normalizes_due_date_to_day() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects/5/milestones")
            .match_body("due_date=2026-06-30&title=v2.0")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"title":"v2.0","due_date":"2026-06-30"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let due = Utc.with_ymd_and_hms(2026, 6, 30, 14, 0, 0).unwrap();
        let milestone = client
            .milestones()
            .create(5u64.into(), "v2.0", Options::new().set("due_date", due))
            .await
            .unwrap();

        assert_eq!(milestone.due_date.as_deref(), Some("2026-06-30"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_validates_state_event() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .milestones()
            .update(5u64.into(), 1, Options::new().set("state_event", "finish"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
