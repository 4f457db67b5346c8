// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page location with `window.location` semantics

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Current page location
///
/// `search` is empty or starts with `?`, `protocol` ends with `:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub origin: String,
    pub pathname: String,
    pub search: String,
    pub protocol: String,
}

impl PageLocation {
    /// Create a location from its parts
    pub fn new(
        origin: impl Into<String>,
        pathname: impl Into<String>,
        search: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            pathname: pathname.into(),
            search: search.into(),
            protocol: protocol.into(),
        }
    }

    /// Parse a full page URL
    pub fn parse(href: &str) -> Result<Self> {
        Ok(Self::from_url(&Url::parse(href)?))
    }

    /// Build from a parsed URL
    pub fn from_url(url: &Url) -> Self {
        let search = match url.query() {
            Some(q) if !q.is_empty() => format!("?{}", q),
            _ => String::new(),
        };

        Self {
            origin: url.origin().ascii_serialization(),
            pathname: url.path().to_string(),
            search,
            protocol: format!("{}:", url.scheme()),
        }
    }

    /// Origin, path and query joined back together
    pub fn href(&self) -> String {
        format!("{}{}{}", self.origin, self.pathname, self.search)
    }

    /// First value of a query parameter, form-decoded
    pub fn query_value(&self, name: &str) -> Option<String> {
        let query = self.search.strip_prefix('?').unwrap_or(&self.search);
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Check whether the pathname contains a path segment
    pub fn is_on(&self, path: &str) -> bool {
        !path.is_empty() && self.pathname.contains(path)
    }
}
