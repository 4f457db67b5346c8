// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::{CredentialsMode, OutboundRequest};
use super::response::InboundResponse;
use super::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

/// HTTP transport
///
/// Holds one client with a cookie store for credentialed requests and one
/// without for `CredentialsMode::Omit`.
#[derive(Clone)]
pub struct HttpClient {
    credentialed: Client,
    anonymous: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            credentialed: Self::build(&config, true)?,
            anonymous: Self::build(&config, false)?,
            config,
        })
    }

    fn build(config: &HttpClientConfig, cookies: bool) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone())
            .cookie_store(cookies);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(builder.build()?)
    }

    /// Execute a request with no page origin to compare against
    ///
    /// `SameOrigin` requests are sent with credentials.
    pub async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse> {
        self.execute_from(None, request).await
    }

    /// Execute a request issued by a page at `page_origin`
    pub async fn execute_from(
        &self,
        page_origin: Option<&str>,
        request: OutboundRequest,
    ) -> Result<InboundResponse> {
        let start = Instant::now();

        let client = if sends_credentials(&request, page_origin) {
            &self.credentialed
        } else {
            &self.anonymous
        };

        let url = request.full_url();
        let mut builder = client
            .request(request.method.clone(), url.clone())
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(method = %request.method, url = %url, "Sending request");

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            url = %final_url,
            status = %status,
            time_ms = response_time,
            "Received response"
        );

        Ok(InboundResponse::new(
            status,
            headers,
            body,
            final_url,
            response_time,
        ))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

/// Whether cookies go with a request, following the fetch credentials modes
fn sends_credentials(request: &OutboundRequest, page_origin: Option<&str>) -> bool {
    match request.credentials {
        CredentialsMode::Include => true,
        CredentialsMode::Omit => false,
        CredentialsMode::SameOrigin => match page_origin {
            Some(origin) => request.origin() == origin,
            None => true,
        },
    }
}
