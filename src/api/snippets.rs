//
//  gitlab-api
//  api/snippets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project snippet endpoints and models.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};
use crate::api::users::User;
use crate::http::mediator::Content;

/// Snippet endpoint group.
pub struct Snippets<'a> {
    client: &'a GitlabClient,
}

impl<'a> Snippets<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists a project's snippets.
    pub async fn all(
        &self,
        project: ProjectId,
        options: Options,
    ) -> Result<Vec<Snippet>, ApiError> {
        let params = OptionsResolver::base().resolve(options)?;
        self.client
            .get(&project_path(&project, "snippets"), params)
            .await
    }

    /// Fetches a single snippet.
    pub async fn show(&self, project: ProjectId, snippet_id: u64) -> Result<Snippet, ApiError> {
        self.client
            .get(
                &project_path(&project, &format!("snippets/{snippet_id}")),
                Default::default(),
            )
            .await
    }

    /// Creates a snippet.
    pub async fn create(
        &self,
        project: ProjectId,
        title: &str,
        file_name: &str,
        code: &str,
        visibility: &str,
    ) -> Result<Snippet, ApiError> {
        let params = OptionsResolver::new()
            .required("title")
            .required("file_name")
            .required("code")
            .values("visibility", &["public", "internal", "private"])
            .resolve(
                Options::new()
                    .set("title", title)
                    .set("file_name", file_name)
                    .set("code", code)
                    .set("visibility", visibility),
            )?;
        self.client
            .post(&project_path(&project, "snippets"), params)
            .await
    }

    /// Updates a snippet.
    pub async fn update(
        &self,
        project: ProjectId,
        snippet_id: u64,
        options: Options,
    ) -> Result<Snippet, ApiError> {
        self.client
            .put(
                &project_path(&project, &format!("snippets/{snippet_id}")),
                options.to_wire(),
            )
            .await
    }

    /// The raw snippet content.
    pub async fn content(&self, project: ProjectId, snippet_id: u64) -> Result<String, ApiError> {
        let content = self
            .client
            .get_content(
                &project_path(&project, &format!("snippets/{snippet_id}/raw")),
                Default::default(),
            )
            .await?;
        Ok(match content {
            Content::Text(text) => text,
            Content::Json(value) => value.to_string(),
        })
    }

    /// Deletes a snippet.
    pub async fn remove(&self, project: ProjectId, snippet_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(
                &project_path(&project, &format!("snippets/{snippet_id}")),
                Default::default(),
            )
            .await
    }
}

/// A project snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Numeric snippet id.
    pub id: u64,
    /// Title line.
    pub title: String,
    /// File name the snippet renders as.
    #[serde(default)]
    pub file_name: Option<String>,
    /// The snippet's author.
    #[serde(default)]
    pub author: Option<User>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Browser URL.
    #[serde(default)]
    pub web_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_validates_visibility() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .snippets()
            .create(1u64.into(), "t", "f.rs", "fn main() {}", "unlisted")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_content_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects/1/snippets/2/raw")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("fn main() {}\n")
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let code = client.snippets().content(1u64.into(), 2).await.unwrap();

        assert_eq!(code, "fn main() {}\n");
    }
}
