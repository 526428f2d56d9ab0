//
//  gitlab-api
//  api/repository_files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Repository file endpoints.
//!
//! Single-file CRUD against a repository: fetch a file (base64-encoded
//! JSON envelope or raw bytes), create, update and delete. Writes are
//! commits — they require a branch and a commit message, which the
//! option schemas enforce before anything goes on the wire.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::{encode_path, project_path, ApiError, ProjectId};
use crate::api::options::{Options, OptionsResolver};
use crate::http::mediator::Content;

/// Repository file endpoint group.
pub struct RepositoryFiles<'a> {
    client: &'a GitlabClient,
}

impl<'a> RepositoryFiles<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    fn file_path_url(project: &ProjectId, file_path: &str, tail: &str) -> String {
        project_path(
            project,
            &format!("repository/files/{}{tail}", encode_path(file_path)),
        )
    }

    /// Fetches a file's metadata and base64-encoded content at a ref.
    pub async fn get_file(
        &self,
        project: ProjectId,
        file_path: &str,
        git_ref: &str,
    ) -> Result<RepositoryFile, ApiError> {
        let params = OptionsResolver::new()
            .required("ref")
            .resolve(Options::new().set("ref", git_ref))?;
        self.client
            .get(&Self::file_path_url(&project, file_path, ""), params)
            .await
    }

    /// Fetches a file's raw contents at a ref.
    pub async fn get_raw_file(
        &self,
        project: ProjectId,
        file_path: &str,
        git_ref: &str,
    ) -> Result<String, ApiError> {
        let params = Options::new().set("ref", git_ref).to_wire();
        let content = self
            .client
            .get_content(&Self::file_path_url(&project, file_path, "/raw"), params)
            .await?;
        Ok(match content {
            Content::Text(text) => text,
            Content::Json(value) => value.to_string(),
        })
    }

    /// Creates a file on a branch (one commit).
    pub async fn create_file(
        &self,
        project: ProjectId,
        file_path: &str,
        options: Options,
    ) -> Result<FileCommit, ApiError> {
        let params = Self::write_resolver().resolve(options)?;
        self.client
            .post(&Self::file_path_url(&project, file_path, ""), params)
            .await
    }

    /// Updates a file on a branch (one commit).
    pub async fn update_file(
        &self,
        project: ProjectId,
        file_path: &str,
        options: Options,
    ) -> Result<FileCommit, ApiError> {
        let params = Self::write_resolver().resolve(options)?;
        self.client
            .put(&Self::file_path_url(&project, file_path, ""), params)
            .await
    }

    /// Deletes a file from a branch (one commit).
    pub async fn delete_file(
        &self,
        project: ProjectId,
        file_path: &str,
        options: Options,
    ) -> Result<(), ApiError> {
        let params = OptionsResolver::new()
            .required("branch")
            .required("commit_message")
            .defined("author_email")
            .defined("author_name")
            .resolve(options)?;
        self.client
            .delete(&Self::file_path_url(&project, file_path, ""), params)
            .await
    }

    fn write_resolver() -> OptionsResolver {
        OptionsResolver::new()
            .required("branch")
            .required("content")
            .required("commit_message")
            .defined("encoding")
            .defined("author_email")
            .defined("author_name")
    }
}

/// A file fetched through the files API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryFile {
    /// File name.
    pub file_name: String,
    /// Full path within the repository.
    #[serde(default)]
    pub file_path: Option<String>,
    /// File size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Content encoding (`base64`).
    #[serde(default)]
    pub encoding: Option<String>,
    /// Encoded file content.
    #[serde(default)]
    pub content: Option<String>,
    /// The ref the file was read at.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Blob SHA.
    #[serde(default)]
    pub blob_id: Option<String>,
    /// SHA of the last commit touching the file.
    #[serde(default)]
    pub last_commit_id: Option<String>,
}

/// The acknowledgement of a file write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCommit {
    /// Path of the written file.
    pub file_path: String,
    /// Branch the commit landed on.
    #[serde(default)]
    pub branch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_file_requires_branch_and_message() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .repository_files()
            .create_file(1u64.into(), "docs/guide.md", Options::new().set("content", "x"))
            .await
            .unwrap_err();

        match err {
            ApiError::Configuration(message) => {
                assert!(message.contains("required option \"branch\""))
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_file_paths_are_encoded_into_one_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/api/v4/projects/1/repository/files/docs%2Fguide%2Emd?ref=main",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"file_name":"guide.md","encoding":"base64","content":"aGk="}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let file = client
            .repository_files()
            .get_file(1u64.into(), "docs/guide.md", "main")
            .await
            .unwrap();

        assert_eq!(file.file_name, "guide.md");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_raw_file_returns_plain_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "GET",
                "/api/v4/projects/1/repository/files/README%2Emd/raw?ref=main",
            )
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("# Readme\n")
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let raw = client
            .repository_files()
            .get_raw_file(1u64.into(), "README.md", "main")
            .await
            .unwrap();

        assert_eq!(raw, "# Readme\n");
    }
}
