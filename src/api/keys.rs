//
//  gitlab-api
//  api/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! SSH key lookup (admin only).

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::ApiError;
use crate::api::users::User;

/// Key lookup endpoint group.
pub struct Keys<'a> {
    client: &'a GitlabClient,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Fetches an SSH key, with its owner, by key id.
    pub async fn show(&self, key_id: u64) -> Result<Key, ApiError> {
        self.client
            .get(&format!("keys/{key_id}"), Default::default())
            .await
    }
}

/// An SSH key with its owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    /// Numeric key id.
    pub id: u64,
    /// Key title.
    #[serde(default)]
    pub title: Option<String>,
    /// The public key material.
    #[serde(default)]
    pub key: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// The user the key belongs to.
    #[serde(default)]
    pub user: Option<User>,
}
