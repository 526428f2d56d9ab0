//
//  gitlab-api
//  http/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Pipeline Layer
//!
//! This module contains everything between an endpoint method and the wire:
//!
//! - [`request`]: Immutable request values passed through the pipeline
//! - [`response`]: Buffered response values returned by the transport
//! - [`transport`]: The [`Transport`](transport::Transport) seam and its
//!   reqwest-backed implementation
//! - [`pipeline`]: The ordered middleware chain (error translation, history
//!   capture, default headers, version prefixing, authentication)
//! - [`history`]: The single-slot last-response cell used for pagination
//! - [`query`]: The bracket-notation query string encoder
//! - [`mediator`]: Response body decoding and `Link` header parsing
//!
//! Endpoint methods never talk to reqwest directly; they construct a
//! [`Request`](request::Request) and hand it to the client's pipeline, which
//! runs every stage in a fixed order before and after the transport send.

pub mod history;
pub mod mediator;
pub mod pipeline;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

pub use history::ResponseHistory;
pub use mediator::Content;
pub use request::{Body, FilePart, Request};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};
