// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outbound request type and builder

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::Result;

/// Outbound request, mutated by request interceptors before transmission
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Request method
    pub method: Method,
    /// Request URL (may already carry a query string)
    pub url: Url,
    /// Query parameters appended at send time
    pub params: Vec<(String, String)>,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Per-request timeout, overriding the client's
    pub timeout: Option<Duration>,
    /// Credentials mode
    pub credentials: CredentialsMode,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send credentials only to same-origin requests
    #[default]
    SameOrigin,
    /// Always send credentials, including cross-origin cookies
    Include,
    /// Never send credentials
    Omit,
}

impl OutboundRequest {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            params: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            credentials: CredentialsMode::default(),
        })
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a header in place, replacing any previous value
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
    }

    /// Get a header value
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name, value);
        self
    }

    /// Set a query parameter in place
    ///
    /// Replaces the first entry with the same name, otherwise appends.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.params.push((name, value)),
        }
    }

    /// Remove every query parameter with this name
    pub fn remove_param(&mut self, name: &str) {
        self.params.retain(|(k, _)| k != name);
    }

    /// Get a query parameter value
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header("content-type", "application/json"))
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    /// URL with the parameter list appended to its query string
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.params {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    /// Get the origin
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = OutboundRequest::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
        // the client's configured timeout applies unless overridden
        assert_eq!(req.timeout, None);
        assert_eq!(req.credentials, CredentialsMode::SameOrigin);
    }

    #[test]
    fn test_request_headers() {
        let req = OutboundRequest::get("https://example.com")
            .unwrap()
            .header("x-custom", "value");
        assert_eq!(req.header_value("x-custom"), Some("value"));
    }

    #[test]
    fn test_set_param_replaces_first() {
        let mut req = OutboundRequest::get("https://example.com")
            .unwrap()
            .param("page", "1")
            .param("token", "old");
        req.set_param("token", "new");

        assert_eq!(req.params.len(), 2);
        assert_eq!(req.param_value("token"), Some("new"));

        req.remove_param("token");
        assert_eq!(req.param_value("token"), None);
        assert_eq!(req.param_value("page"), Some("1"));
    }

    #[test]
    fn test_full_url_keeps_existing_query() {
        let req = OutboundRequest::get("https://example.com/api?a=1")
            .unwrap()
            .param("token", "abc 123");
        assert_eq!(
            req.full_url().as_str(),
            "https://example.com/api?a=1&token=abc+123"
        );
    }

    #[test]
    fn test_request_origin() {
        let req = OutboundRequest::get("https://example.com:8080/path").unwrap();
        assert_eq!(req.origin(), "https://example.com:8080");
    }
}
