//
//  gitlab-api
//  http/history.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Last-response history.
//!
//! Pagination works by re-reading the `Link` header of the most recent
//! response, so the client keeps exactly one response around — a single
//! slot, overwritten on every completed request. This is not a log.
//!
//! # Concurrency
//!
//! The slot is owned by one client instance and is last-write-wins.
//! Concurrent requests issued through the same client race on it: the
//! pager will see whichever response completed last. That matches the
//! behavior of the original single-threaded flow and is a documented
//! limitation, not something this layer tries to lock away. Issue
//! paginated calls sequentially when using the pager.

use std::sync::{Arc, Mutex, PoisonError};

use crate::http::response::Response;

/// A single-slot cell holding the most recently completed response.
///
/// Cloning shares the slot; the client and every pipeline clone observe
/// the same last response. Transport-level failures never touch the slot.
#[derive(Debug, Clone, Default)]
pub struct ResponseHistory {
    last: Arc<Mutex<Option<Response>>>,
}

impl ResponseHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot with the given response.
    pub fn record(&self, response: Response) {
        let mut slot = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(response);
    }

    /// Returns a clone of the most recent response, if any request has
    /// completed yet.
    pub fn last_response(&self) -> Option<Response> {
        let slot = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn response(body: &'static [u8]) -> Response {
        Response::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(body))
    }

    #[test]
    fn test_empty_history_has_no_response() {
        let history = ResponseHistory::new();
        assert!(history.last_response().is_none());
    }

    #[test]
    fn test_record_overwrites_previous_entry() {
        let history = ResponseHistory::new();
        history.record(response(b"one"));
        history.record(response(b"two"));

        let last = history.last_response().unwrap();
        assert_eq!(last.text(), "two");
    }

    #[test]
    fn test_clones_share_the_slot() {
        let history = ResponseHistory::new();
        let shared = history.clone();
        history.record(response(b"seen"));

        assert!(shared.last_response().is_some());
    }
}
