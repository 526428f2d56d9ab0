//
//  gitlab-api
//  api/schedules.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pipeline schedule endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};
use crate::api::users::User;

/// Pipeline schedule endpoint group.
pub struct Schedules<'a> {
    client: &'a GitlabClient,
}

impl<'a> Schedules<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's pipeline schedules.
    pub async fn show_all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Schedule>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(&project_path(&project, "pipeline_schedules"), params)
            .await
    }

    /// Fetches a single schedule.
    pub async fn show(
        &self,
        project: ProjectId,
        schedule_id: u64,
    ) -> Result<Schedule, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("pipeline_schedules/{schedule_id}")),
                Default::default(),
            )
            .await
    }

    /// Creates a schedule.
    pub async fn create(
        &self,
        project: ProjectId,
        description: &str,
        git_ref: &str,
        cron: &str,
        options: Options,
    ) -> Result<Schedule, ApiError> {
        let params = OptionsResolver::new()
            .required("description")
            .required("ref")
            .required("cron")
            .defined("cron_timezone")
            .boolean("active")
            .resolve(
                options
                    .set("description", description)
                    .set("ref", git_ref)
                    .set("cron", cron),
            )?;
        self.client
            .post(&project_path(&project, "pipeline_schedules"), params)
            .await
    }

    /// Updates a schedule.
    pub async fn update(
        &self,
        project: ProjectId,
        schedule_id: u64,
        options: Options,
    ) -> Result<Schedule, ApiError> {
        let params = OptionsResolver::new()
            .defined("description")
            .defined("ref")
            .defined("cron")
            .defined("cron_timezone")
            .boolean("active")
            .resolve(options)?;
        self.client
            .put(
                &project_path(&project, &format!("pipeline_schedules/{schedule_id}")),
                params,
            )
            .await
    }

    /// Deletes a schedule.
    pub async fn remove(&self, project: ProjectId, schedule_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("pipeline_schedules/{schedule_id}")),
                Default::default(),
            )
            .await
    }
}

/// A pipeline schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Numeric schedule id.
    pub id: u64,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Scheduled ref.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Cron expression.
    #[serde(default)]
    pub cron: Option<String>,
    /// Cron timezone name.
    #[serde(default)]
    pub cron_timezone: Option<String>,
    /// Next planned run.
    #[serde(default)]
    pub next_run_at: Option<String>,
    /// Whether the schedule is active.
    #[serde(default)]
    pub active: Option<bool>,
    /// The owning user.
    #[serde(default)]
    pub owner: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_validates_active_flag_type() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .schedules()
            .update(1u64.into(), 2, Options::new().set("active", "yes"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
