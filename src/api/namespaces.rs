//
//  gitlab-api
//  api/namespaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Namespace endpoints.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{encode_path, ApiError};
use crate::api::options::{Options, OptionsResolver};

/// Namespace endpoint group.
pub struct Namespaces<'a> {
    client: &'a GitlabClient,
}

impl<'a> Namespaces<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists namespaces visible to the authenticated user.
    pub async fn all(&self, options: Options) -> Result<Vec<Namespace>, ApiError> {
        let params = OptionsResolver::base().defined("search").resolve(options)?;
        self.client.get("namespaces", params).await
    }

    /// Fetches a namespace by id or full path.
    pub async fn show(&self, namespace: &str) -> Result<Namespace, ApiError> {
        self.client
            .get(
                &format!("namespaces/{}", encode_path(namespace)),
                Default::default(),
            )
            .await
    }
}

/// A user or group namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    /// Numeric namespace id.
    pub id: u64,
    /// Namespace name.
    pub name: String,
    /// URL-safe path component.
    #[serde(default)]
    pub path: Option<String>,
    /// Full path including ancestors.
    #[serde(default)]
    pub full_path: Option<String>,
    /// `user` or `group`.
    #[serde(default)]
    pub kind: Option<String>,
}
