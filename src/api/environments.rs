//
//  gitlab-api
//  api/environments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Environment endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};

/// Environment endpoint group.
pub struct Environments<'a> {
    client: &'a GitlabClient,
}

impl<'a> Environments<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's environments.
    pub async fn all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Environment>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(&project_path(&project, "environments"), params)
            .await
    }

    /// Creates an environment.
    pub async fn create(
        &self,
        project: ProjectId,
        name: &str,
        options: Options,
    ) -> Result<Environment, ApiError> {
        let params = OptionsResolver::new()
            .required("name")
            .defined("external_url")
            .resolve(options.set("name", name))?;
        self.client
            .post(&project_path(&project, "environments"), params)
            .await
    }

    /// Deletes an environment.
    pub async fn remove(&self, project: ProjectId, environment_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("environments/{environment_id}")),
                Default::default(),
            )
            .await
    }

    /// Stops an environment.
    pub async fn stop(
        &self,
        project: ProjectId,
        environment_id: u64,
    ) -> Result<Environment, ApiError> {
        self.client
            .post(
                &project_path(&project, &format!("environments/{environment_id}/stop")),
                Default::default(),
            )
            .await
    }
}

/// A deployment environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Numeric environment id.
    pub id: u64,
    /// Environment name.
    pub name: String,
    /// URL-safe slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Externally visible URL, if configured.
    #[serde(default)]
    pub external_url: Option<String>,
    /// `available` or `stopped`.
    #[serde(default)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_posts_to_stop_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/projects/3/environments/9/stop")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":9,"name":"review/app","state":"stopped"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let environment = client.environments().stop(3u64.into(), 9).await.unwrap();

        assert_eq!(environment.state.as_deref(), Some("stopped"));
        mock.assert_async().await;
    }
}
