// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer
//!
//! Request/response types the interceptor chain operates on, the status
//! envelope read from response bodies, and a reqwest-backed client.

mod client;
mod envelope;
mod request;
mod response;

use std::time::Duration;

pub use client::{HttpClient, HttpClientConfig};
pub use envelope::{Retcode, StatusEnvelope};
pub use request::{CredentialsMode, OutboundRequest};
pub use response::InboundResponse;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("retgate/", env!("CARGO_PKG_VERSION"));

/// Transport timeout: one minute
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";

    /// Value marking a request as XHR
    pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
}
