//
//  gitlab-api
//  api/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tag and release endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{encode_path, project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};
use crate::api::repositories::Commit;

/// Tag endpoint group.
pub struct Tags<'a> {
    client: &'a GitlabClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's tags.
    pub async fn all(&self, project: ProjectId, options: Options) -> Result<Vec<Tag>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(&project_path(&project, "repository/tags"), params)
            .await
    }

    /// Fetches a single tag.
    pub async fn show(&self, project: ProjectId, tag_name: &str) -> Result<Tag, ApiError> {
        self.client
            .get(
                &project_path(
                    &project,
                    &format!("repository/tags/{}", encode_path(tag_name)),
                ),
                Default::default(),
            )
            .await
    }

    /// Creates a tag pointing at the given ref.
    pub async fn create(
        &self,
        project: ProjectId,
        tag_name: &str,
        from_ref: &str,
        options: Options,
    ) -> Result<Tag, ApiError> {
        let params = options
            .set("tag_name", tag_name)
            .set("ref", from_ref)
            .to_wire();
        self.client
            .post(&project_path(&project, "repository/tags"), params)
            .await
    }

    /// Deletes a tag.
    pub async fn remove(&self, project: ProjectId, tag_name: &str) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(
                    &project,
                    &format!("repository/tags/{}", encode_path(tag_name)),
                ),
                Default::default(),
            )
            .await
    }

    /// Attaches release notes to a tag.
    pub async fn create_release(
        &self,
        project: ProjectId,
        tag_name: &str,
        description: &str,
    ) -> Result<Release, ApiError> {
        let params = Options::new().set("description", description).to_wire();
        self.client
            .post(
                &project_path(
                    &project,
                    &format!("repository/tags/{}/release", encode_path(tag_name)),
                ),
                params,
            )
            .await
    }

    /// Updates a tag's release notes.
    pub async fn update_release(
        &self,
        project: ProjectId,
        tag_name: &str,
        description: &str,
    ) -> Result<Release, ApiError> {
        let params = Options::new().set("description", description).to_wire();
        self.client
            .put(
                &project_path(
                    &project,
                    &format!("repository/tags/{}/release", encode_path(tag_name)),
                ),
                params,
            )
            .await
    }
}

/// A repository tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Annotation message, for annotated tags.
    #[serde(default)]
    pub message: Option<String>,
    /// The tagged commit.
    #[serde(default)]
    pub commit: Option<Commit>,
    /// Attached release notes.
    #[serde(default)]
    pub release: Option<Release>,
}

/// Release notes attached to a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// The tag the notes belong to.
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Release notes (Markdown).
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_encodes_dotted_tag_names() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/1/repository/tags/v1%2E2%2E3")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"v1.2.3"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let tag = client.tags().show(1u64.into(), "v1.2.3").await.unwrap();

        assert_eq!(tag.name, "v1.2.3");
        mock.assert_async().await;
    }
}
