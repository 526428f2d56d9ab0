//
//  gitlab-api
//  api/deployments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Deployment endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::environments::Environment;
use crate::api::options::{Options, OptionsResolver};
use crate::api::users::User;

/// Deployment endpoint group.
pub struct Deployments<'a> {
    client: &'a GitlabClient,
}

impl<'a> Deployments<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's deployments.
    pub async fn all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Deployment>, ApiError> {
        let params = OptionsResolver::base()
            .values("order_by", &["id", "iid", "created_at", "updated_at", "ref"])
            .values("sort", &["asc", "desc"])
            .resolve(options)?;
        self.client
            .get(&project_path(&project, "deployments"), params)
            .await
    }

    /// Fetches a single deployment.
    pub async fn show(
        &self,
        project: ProjectId,
        deployment_id: u64,
    ) -> Result<Deployment, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("deployments/{deployment_id}")),
                Default::default(),
            )
            .await
    }
}

/// A deployment to an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    /// Numeric deployment id.
    pub id: u64,
    /// Per-project deployment number.
    #[serde(default)]
    pub iid: Option<u64>,
    /// Deployed ref.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Deployed SHA.
    #[serde(default)]
    pub sha: Option<String>,
    /// The environment deployed to.
    #[serde(default)]
    pub environment: Option<Environment>,
    /// The user who triggered the deployment.
    #[serde(default)]
    pub user: Option<User>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_validates_order_by() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .deployments()
            .all(1u64.into(), Options::new().set("order_by", "sha"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
