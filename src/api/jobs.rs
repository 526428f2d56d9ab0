//
//  gitlab-api
//  api/jobs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CI job endpoints and models.
//!
//! Job listings (per project or per pipeline), the plain-text trace log,
//! artifact download and the control operations (cancel, retry, erase,
//! play, keep artifacts). Traces and artifacts are raw bodies, not JSON.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};
use crate::api::projects::Pipeline;
use crate::api::users::User;
use crate::http::mediator::Content;

/// Valid job scopes for list filtering.
const SCOPES: &[&str] = &[
    "created", "pending", "running", "failed", "success", "canceled", "skipped", "manual",
];

/// Job endpoint group.
pub struct Jobs<'a> {
    client: &'a GitlabClient,
}

impl<'a> Jobs<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's jobs.
    pub async fn all(&self, project: ProjectId, options: Options) -> Result<Vec<Job>, ApiError> {
        let params = OptionsResolver::base()
            .values("scope", SCOPES)
            .resolve(options)?;
        self.client.get(&project_path(&project, "jobs"), params).await
    }

    /// Lists the jobs of one pipeline.
    pub async fn pipeline_jobs(
        &self,
        project: ProjectId,
        pipeline_id: u64,
        options: Options,
    ) -> Result<Vec<Job>, ApiError> {
        let params = OptionsResolver::base()
            .values("scope", SCOPES)
            .resolve(options)?;
        self.client
            .get(
                &project_path(&project, &format!("pipelines/{pipeline_id}/jobs")),
                params,
            )
            .await
    }

    /// Fetches a single job.
    pub async fn show(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("jobs/{job_id}")),
                Default::default(),
            )
            .await
    }

    /// The job's trace log as plain text.
    pub async fn trace(&self, project: ProjectId, job_id: u64) -> Result<String, ApiError> {
        let content = self
            .client
            .get_content(
                &project_path(&project, &format!("jobs/{job_id}/trace")),
                Default::default(),
            )
            .await?;
        Ok(match content {
            Content::Text(text) => text,
            Content::Json(value) => value.to_string(),
        })
    }

    /// Downloads the job's artifact archive.
    pub async fn artifacts(&self, project: ProjectId, job_id: u64) -> Result<Bytes, ApiError> {
        let response = self
            .client
            .get_response(
                &project_path(&project, &format!("jobs/{job_id}/artifacts")),
                Default::default(),
            )
            .await?;
        Ok(response.body().clone())
    }

    /// Cancels a job.
    pub async fn cancel(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("jobs/{job_id}/cancel")),
                Default::default(),
            )
            .await
    }

    /// Retries a job.
    pub async fn retry(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("jobs/{job_id}/retry")),
                Default::default(),
            )
            .await
    }

    /// Erases a job (trace and artifacts).
    pub async fn erase(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("jobs/{job_id}/erase")),
                Default::default(),
            )
            .await
    }

    /// Prevents artifacts from expiring.
    pub async fn keep_artifacts(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("jobs/{job_id}/artifacts/keep")),
                Default::default(),
            )
            .await
    }

    /// Starts a manual job.
    pub async fn play(&self, project: ProjectId, job_id: u64) -> Result<Job, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("jobs/{job_id}/play")),
                Default::default(),
            )
            .await
    }
}

/// A CI job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Numeric job id.
    pub id: u64,
    /// Job name from the CI configuration.
    #[serde(default)]
    pub name: Option<String>,
    /// Pipeline stage.
    #[serde(default)]
    pub stage: Option<String>,
    /// Job status (`created`, `running`, `success`, …).
    #[serde(default)]
    pub status: Option<String>,
    /// Git ref the job ran for.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// The pipeline the job belongs to.
    #[serde(default)]
    pub pipeline: Option<Pipeline>,
    /// The user who triggered the job.
    #[serde(default)]
    pub user: Option<User>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Start timestamp.
    #[serde(default)]
    pub started_at: Option<String>,
    /// Finish timestamp.
    #[serde(default)]
    pub finished_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_validates_scope() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .jobs()
            .all(1u64.into(), Options::new().set("scope", "queued"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_trace_returns_plain_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects/1/jobs/42/trace")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("$ cargo test\nok\n")
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let trace = client.jobs().trace(1u64.into(), 42).await.unwrap();

        assert!(trace.contains("cargo test"));
    }
}
