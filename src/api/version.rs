//
//  gitlab-api
//  api/version.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Instance version probe.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::ApiError;

/// Version endpoint group.
pub struct Version<'a> {
    client: &'a GitlabClient,
}

impl<'a> Version<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// The instance's version and revision.
    pub async fn show(&self) -> Result<InstanceVersion, ApiError> {
        self.client.get("version", Default::default()).await
    }
}

/// The version report of a GitLab instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceVersion {
    /// Semantic version string.
    pub version: String,
    /// Git revision the instance was built from.
    #[serde(default)]
    pub revision: Option<String>,
}
