//
//  gitlab-api
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Group endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{group_path, ApiError};
use crate::api::options::{Options, OptionsResolver};
use crate::api::projects::{Member, Project};

/// Group endpoint group.
pub struct Groups<'a> {
    client: &'a GitlabClient,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    fn list_resolver() -> OptionsResolver {
        OptionsResolver::base()
            .defined("search")
            .values("order_by", &["name", "path"])
            .values("sort", &["asc", "desc"])
            .boolean("all_available")
            .boolean("owned")
            .boolean("statistics")
    }

    /// Lists groups visible to the authenticated user.
    pub async fn all(&self, options: Options) -> Result<Vec<Group>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client.get("groups", params).await
    }

    /// Fetches a single group.
    pub async fn show(&self, group_id: u64) -> Result<Group, ApiError> {
        self.client
            .get(&format!("groups/{group_id}"), Default::default())
            .await
    }

    /// Creates a group.
    pub async fn create(
        &self,
        name: &str,
        path: &str,
        options: Options,
    ) -> Result<Group, ApiError> {
        let params = options.set("name", name).set("path", path).to_wire();
        self.client.post("groups", params).await
    }

    /// Updates group settings.
    pub async fn update(&self, group_id: u64, options: Options) -> Result<Group, ApiError> {
        self.client
            .put(&format!("groups/{group_id}"), options.to_wire())
            .await
    }

    /// Deletes a group.
    pub async fn remove(&self, group_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("groups/{group_id}"), Default::default())
            .await
    }

    /// Transfers a project into a group.
    pub async fn transfer_project(
        &self,
        group_id: u64,
        project_id: u64,
    ) -> Result<Group, ApiError> {
        self.client
            .post(
                &group_path(group_id, &format!("projects/{project_id}")),
                Default::default(),
            )
            .await
    }

    /// Lists a group's projects.
    pub async fn projects(&self, group_id: u64, options: Options) -> Result<Vec<Project>, ApiError> {
        let params = OptionsResolver::base()
            .boolean("archived")
            .values("visibility", &["public", "internal", "private"])
            .values(
                "order_by",
                &["id", "name", "path", "created_at", "updated_at", "last_activity_at"],
            )
            .values("sort", &["asc", "desc"])
            .defined("search")
            .boolean("simple")
            .boolean("owned")
            .boolean("starred")
            .resolve(options)?;
        self.client.get(&group_path(group_id, "projects"), params).await
    }

    /// Lists a group's direct subgroups.
    pub async fn subgroups(&self, group_id: u64, options: Options) -> Result<Vec<Group>, ApiError> {
        let params = Self::list_resolver().resolve(options)?;
        self.client
            .get(&group_path(group_id, "subgroups"), params)
            .await
    }

    /// Lists a group's direct members.
    pub async fn members(&self, group_id: u64, options: Options) -> Result<Vec<Member>, ApiError> {
        let params = OptionsResolver::base().defined("query").resolve(options)?;
        self.client.get(&group_path(group_id, "members"), params).await
    }

    /// Adds a user to a group with the given access level.
    pub async fn add_member(
        &self,
        group_id: u64,
        user_id: u64,
        access_level: u64,
    ) -> Result<Member, ApiError> {
        let params = Options::new()
            .set("user_id", user_id)
            .set("access_level", access_level)
            .to_wire();
        self.client.post(&group_path(group_id, "members"), params).await
    }

    /// Removes a member from a group.
    pub async fn remove_member(&self, group_id: u64, user_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &group_path(group_id, &format!("members/{user_id}")),
                Default::default(),
            )
            .await
    }
}

/// A GitLab group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Numeric group id.
    pub id: u64,
    /// Group name.
    pub name: String,
    /// URL-safe path component.
    #[serde(default)]
    pub path: Option<String>,
    /// Full path including ancestors.
    #[serde(default)]
    pub full_path: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// `public`, `internal` or `private`.
    #[serde(default)]
    pub visibility: Option<String>,
    /// Parent group id for subgroups.
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_rejects_unknown_order() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .groups()
            .all(Options::new().set("order_by", "created_at"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_subgroups_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/groups/9/subgroups")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":10,"name":"infra","parent_id":9}]"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let subgroups = client.groups().subgroups(9, Options::new()).await.unwrap();

        assert_eq!(subgroups[0].parent_id, Some(9));
        mock.assert_async().await;
    }
}
