//
//  gitlab-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination over `Link` headers.
//!
//! GitLab paginates list endpoints with a standard `Link` response header
//! carrying `first`, `prev`, `next` and `last` relations. The pager does
//! not thread page numbers through call sites; it re-reads the client's
//! last completed response and follows the absolute URLs the server
//! handed back.
//!
//! Because the pager is driven by the single-slot response history, a
//! pagination walk must be the only traffic on its client while it runs;
//! interleaving other calls overwrites the slot the pager reads. See
//! [`ResponseHistory`](crate::http::history::ResponseHistory).
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_api::{GitlabClient, Options};
//! use gitlab_api::api::projects::Project;
//!
//! # async fn example(client: GitlabClient) -> Result<(), gitlab_api::ApiError> {
//! let pager = client.pager();
//! let every_project: Vec<Project> = pager
//!     .fetch_all(|| async { client.projects().all(Options::new()).await })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use serde::de::DeserializeOwned;
use url::Url;

use crate::api::client::GitlabClient;
use crate::api::common::ApiError;
use crate::http::mediator;

/// Walks paginated list results via the client's response history.
pub struct ResultPager<'a> {
    client: &'a GitlabClient,
}

impl<'a> ResultPager<'a> {
    pub(crate) fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// Fetches a single page: invokes the call once and returns its
    /// result without following any links.
    pub async fn fetch<T, F, Fut>(&self, call: F) -> Result<Vec<T>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        call().await
    }

    /// Fetches every page: invokes the call once, then follows `next`
    /// links until none remains, concatenating results in order.
    ///
    /// Use with care — there is no upper bound on the number of pages,
    /// and everything is held in memory.
    pub async fn fetch_all<T, F, Fut>(&self, call: F) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let mut results = call().await?;
        while self.has_next() {
            results.extend(self.fetch_next().await?);
        }
        Ok(results)
    }

    /// True when the last response advertised a `next` page.
    pub fn has_next(&self) -> bool {
        self.link("next").is_some()
    }

    /// True when the last response advertised a `prev` page.
    pub fn has_previous(&self) -> bool {
        self.link("prev").is_some()
    }

    /// Fetches the next page, or an empty collection when there is none
    /// (including when no request has been made yet).
    pub async fn fetch_next<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_link("next").await
    }

    /// Fetches the previous page, or an empty collection when there is
    /// none.
    pub async fn fetch_previous<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_link("prev").await
    }

    /// Fetches the first page, or an empty collection when the last
    /// response carried no `first` link.
    pub async fn fetch_first<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_link("first").await
    }

    /// Fetches the last page, or an empty collection when the last
    /// response carried no `last` link.
    pub async fn fetch_last<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_link("last").await
    }

    fn link(&self, rel: &str) -> Option<String> {
        let last = self.client.last_response()?;
        let links = mediator::pagination(&last)?;
        links.get(rel).cloned()
    }

    async fn fetch_link<T: DeserializeOwned>(&self, rel: &str) -> Result<Vec<T>, ApiError> {
        match self.link(rel) {
            None => Ok(Vec::new()),
            Some(target) => {
                let url = Url::parse(&target)?;
                self.client.get_absolute(url).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::Value;

    async fn mock_page(
        server: &mut mockito::Server,
        path_and_query: &str,
        body: &str,
        link: Option<String>,
    ) -> mockito::Mock {
        let mut mock = server
            .mock("GET", path_and_query)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body);
        if let Some(link) = link {
            mock = mock.with_header("link", &link);
        }
        mock.create_async().await
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages_in_order() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();

        let page1 = mock_page(
            &mut server,
            "/api/v4/projects",
            r#"[{"id":1},{"id":2}]"#,
            Some(format!(
                "<{base}/api/v4/projects?page=2>; rel=\"next\", <{base}/api/v4/projects?page=3>; rel=\"last\""
            )),
        )
        .await;
        let page2 = mock_page(
            &mut server,
            "/api/v4/projects?page=2",
            r#"[{"id":3}]"#,
            Some(format!(
                "<{base}/api/v4/projects?page=3>; rel=\"next\", <{base}/api/v4/projects>; rel=\"prev\""
            )),
        )
        .await;
        let page3 = mock_page(
            &mut server,
            "/api/v4/projects?page=3",
            r#"[{"id":4}]"#,
            Some(format!("<{base}/api/v4/projects?page=2>; rel=\"prev\"")),
        )
        .await;

        let client = GitlabClient::with_url(&base).unwrap();
        let pager = client.pager();

        let all: Vec<Value> = pager
            .fetch_all(|| client.get::<Vec<Value>>("projects", IndexMap::new()))
            .await
            .unwrap();

        let ids: Vec<i64> = all.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert!(!pager.has_next());
        assert!(pager.has_previous());

        page1.assert_async().await;
        page2.assert_async().await;
        page3.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_returns_single_page_without_following_links() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();

        let _page1 = mock_page(
            &mut server,
            "/api/v4/projects",
            r#"[{"id":1}]"#,
            Some(format!("<{base}/api/v4/projects?page=2>; rel=\"next\"")),
        )
        .await;

        let client = GitlabClient::with_url(&base).unwrap();
        let pager = client.pager();

        let page: Vec<Value> = pager
            .fetch(|| client.get::<Vec<Value>>("projects", IndexMap::new()))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        // The next page exists but was deliberately not fetched.
        assert!(pager.has_next());
    }

    #[tokio::test]
    async fn test_fetch_next_before_any_request_returns_empty() {
        let client = GitlabClient::with_url("http://127.0.0.1:1").unwrap();
        let pager = client.pager();

        let page: Vec<Value> = pager.fetch_next().await.unwrap();

        assert!(page.is_empty());
        assert!(!pager.has_next());
        assert!(!pager.has_previous());
    }

    #[tokio::test]
    async fn test_fetch_next_without_link_header_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let _page = mock_page(&mut server, "/api/v4/projects", r#"[{"id":1}]"#, None).await;

        let client = GitlabClient::with_url(&server.url()).unwrap();
        let _: Vec<Value> = client.get("projects", IndexMap::new()).await.unwrap();

        let pager = client.pager();
        let page: Vec<Value> = pager.fetch_next().await.unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_previous_follows_prev_link() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();

        let _page2 = mock_page(
            &mut server,
            "/api/v4/projects?page=2",
            r#"[{"id":3}]"#,
            Some(format!("<{base}/api/v4/projects?page=1>; rel=\"prev\"")),
        )
        .await;
        let page1 = mock_page(
            &mut server,
            "/api/v4/projects?page=1",
            r#"[{"id":1}]"#,
            None,
        )
        .await;

        let client = GitlabClient::with_url(&base).unwrap();
        let _: Vec<Value> = client
            .get("projects", {
                let mut params = IndexMap::new();
                params.insert("page".to_string(), Value::from(2));
                params
            })
            .await
            .unwrap();

        let previous: Vec<Value> = client.pager().fetch_previous().await.unwrap();

        assert_eq!(previous.len(), 1);
        page1.assert_async().await;
    }
}
