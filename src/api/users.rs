//
//  gitlab-api
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User endpoints and models.
//!
//! User administration (list/show/create/update/remove, block/unblock),
//! the authenticated user (`me`), SSH keys — both the current user's and,
//! for admins, any user's — and impersonation tokens.

use serde::{Deserialize, Serialize};

use crate::api::client::GitlabClient;
use crate::api::common::ApiError;
use crate::api::options::{Options, OptionsResolver};

/// User endpoint group.
pub struct Users<'a> {
    client: &'a GitlabClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Lists users.
    pub async fn all(&self, options: Options) -> Result<Vec<User>, ApiError> {
        let params = OptionsResolver::base()
            .defined("search")
            .defined("username")
            .boolean("external")
            .boolean("blocked")
            .boolean("active")
            .resolve(options)?;
        self.client.get("users", params).await
    }

    /// Fetches a single user.
    pub async fn show(&self, user_id: u64) -> Result<User, ApiError> {
        self.client
            .get(&format!("users/{user_id}"), Default::default())
            .await
    }

    /// The authenticated user.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get("user", Default::default()).await
    }

    /// Creates a user (admin only).
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        options: Options,
    ) -> Result<User, ApiError> {
        let params = options
            .set("email", email)
            .set("password", password)
            .to_wire();
        self.client.post("users", params).await
    }

    /// Updates a user (admin only).
    pub async fn update(&self, user_id: u64, options: Options) -> Result<User, ApiError> {
        self.client
            .put(&format!("users/{user_id}"), options.to_wire())
            .await
    }

    /// Deletes a user (admin only).
    pub async fn remove(&self, user_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("users/{user_id}"), Default::default())
            .await
    }

    /// Blocks a user (admin only).
    pub async fn block(&self, user_id: u64) -> Result<(), ApiError> {
        self.client
            .post::<serde_json::Value>(&format!("users/{user_id}/block"), Default::default())
            .await
            .map(|_| ())
    }

    /// Unblocks a user (admin only).
    pub async fn unblock(&self, user_id: u64) -> Result<(), ApiError> {
        self.client
            .post::<serde_json::Value>(&format!("users/{user_id}/unblock"), Default::default())
            .await
            .map(|_| ())
    }

    // -- SSH keys ----------------------------------------------------------

    /// Lists the authenticated user's SSH keys.
    pub async fn keys(&self) -> Result<Vec<SshKey>, ApiError> {
        self.client.get("user/keys", Default::default()).await
    }

    /// Fetches one of the authenticated user's SSH keys.
    pub async fn key(&self, key_id: u64) -> Result<SshKey, ApiError> {
        self.client
            .get(&format!("user/keys/{key_id}"), Default::default())
            .await
    }

    /// Adds an SSH key to the authenticated user.
    pub async fn create_key(&self, title: &str, key: &str) -> Result<SshKey, ApiError> {
        let params = Options::new().set("title", title).set("key", key).to_wire();
        self.client.post("user/keys", params).await
    }

    /// Removes one of the authenticated user's SSH keys.
    pub async fn remove_key(&self, key_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("user/keys/{key_id}"), Default::default())
            .await
    }

    /// Lists another user's SSH keys (admin only).
    pub async fn user_keys(&self, user_id: u64) -> Result<Vec<SshKey>, ApiError> {
        self.client
            .get(&format!("users/{user_id}/keys"), Default::default())
            .await
    }

    /// Adds an SSH key to another user (admin only).
    pub async fn create_key_for_user(
        &self,
        user_id: u64,
        title: &str,
        key: &str,
    ) -> Result<SshKey, ApiError> {
        let params = Options::new().set("title", title).set("key", key).to_wire();
        self.client
            .post(&format!("users/{user_id}/keys"), params)
            .await
    }

    /// Removes another user's SSH key (admin only).
    pub async fn remove_user_key(&self, user_id: u64, key_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("users/{user_id}/keys/{key_id}"), Default::default())
            .await
    }

    // -- impersonation tokens ----------------------------------------------

    /// Lists a user's impersonation tokens (admin only).
    pub async fn impersonation_tokens(
        &self,
        user_id: u64,
        options: Options,
    ) -> Result<Vec<ImpersonationToken>, ApiError> {
        let params = OptionsResolver::base()
            .values("state", &["all", "active", "inactive"])
            .resolve(options)?;
        self.client
            .get(&format!("users/{user_id}/impersonation_tokens"), params)
            .await
    }

    /// Creates an impersonation token (admin only).
    pub async fn create_impersonation_token(
        &self,
        user_id: u64,
        name: &str,
        scopes: &[&str],
        options: Options,
    ) -> Result<ImpersonationToken, ApiError> {
        let params = options
            .set("name", name)
            .set(
                "scopes",
                scopes.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            )
            .to_wire();
        self.client
            .post(&format!("users/{user_id}/impersonation_tokens"), params)
            .await
    }

    /// Revokes an impersonation token (admin only).
    pub async fn remove_impersonation_token(
        &self,
        user_id: u64,
        token_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete(
                &format!("users/{user_id}/impersonation_tokens/{token_id}"),
                Default::default(),
            )
            .await
    }
}

/// A GitLab user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account state (`active`, `blocked`, …).
    #[serde(default)]
    pub state: Option<String>,
    /// Email address (visible to admins, or on `me`).
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Profile URL.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Account creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Whether the account has admin rights.
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// An SSH public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKey {
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
}

/// An impersonation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpersonationToken {
    /// Numeric token id.
    pub id: u64,
    /// Token name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the token has been revoked.
    #[serde(default)]
    pub revoked: Option<bool>,
    /// Granted scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Whether the token is currently active.
    #[serde(default)]
    pub active: Option<bool>,
    /// The token secret; present only in the creation response.
    #[serde(default)]
    pub token: Option<String>,
    /// Expiry date, if set.
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_me_hits_singular_user_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/user")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"username":"dev","is_admin":false}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let me = client.users().me().await.unwrap();

        assert_eq!(me.username, "dev");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_impersonation_token_state_filter_is_validated() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let err = client
            .users()
            .impersonation_tokens(5, Options::new().set("state", "expired"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_create_key_posts_title_and_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/user/keys")
            .match_body(mockito::Matcher::Regex("title=laptop&key=ssh-ed25519".to_string()))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":3,"title":"laptop"}"#)
            .create_async()
            .await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let key = client
            .users()
            .create_key("laptop", "ssh-ed25519 AAAA")
            .await
            .unwrap();

        assert_eq!(key.id, 3);
        mock.assert_async().await;
    }
}
