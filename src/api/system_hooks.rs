//
//  gitlab-api
//  api/system_hooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! System hook endpoints (admin only).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::GitlabClient;
use crate::api::common::ApiError;
use crate::api::options::Options;

/// System hook endpoint group.
pub struct SystemHooks<'a> {
    client: &'a GitlabClient,
}

impl<'a> SystemHooks<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists all system hooks.
    pub async fn all(&self) -> Result<Vec<SystemHook>, ApiError> {
        self.client.get("hooks", Default::default()).await
    }

    /// Registers a system hook.
    pub async fn create(&self, url: &str) -> Result<SystemHook, ApiError> {
        let params = Options::new().set("url", url).to_wire();
        self.client.post("hooks", params).await
    }

    /// Triggers a test delivery of a hook.
    pub async fn test(&self, hook_id: u64) -> Result<Value, ApiError> {
        self.client
            .get(&format!("hooks/{hook_id}"), Default::default())
            .await
    }

    /// Removes a system hook.
    pub async fn remove(&self, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("hooks/{hook_id}"), Default::default())
            .await
    }
}

/// A system-wide webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHook {
    /// Numeric hook id.
    pub id: u64,
    /// Target URL.
    pub url: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Whether push events trigger the hook.
    #[serde(default)]
    pub push_events: Option<bool>,
    /// Whether tag push events trigger the hook.
    #[serde(default)]
    pub tag_push_events: Option<bool>,
}
