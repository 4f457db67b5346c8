// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Guard configuration
//!
//! Redirect templates are rendered by substituting `{origin}`, `{pathname}`,
//! `{search}`, `{protocol}`, `{path_search}`, `{login_redirect_path}`,
//! `{callback}` and `{timestamp}`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::http::DEFAULT_TIMEOUT;

/// Default login-redirect route
pub const DEFAULT_LOGIN_REDIRECT_PATH: &str = "/login-redirect";

/// Partner domains served by the transfer login flow
pub const DEFAULT_TRANSFER_PARTNER_PATTERN: &str = r"^http(s)?://v-ins(-pre)?.com.cn";
/// Partner domains served by the portal login flow
pub const DEFAULT_PORTAL_PARTNER_PATTERN: &str = r"^http(s)?://v-industry(-pre|-dev)?.vmic.xyz";

/// Guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Route of the login-redirect page; also the loop-suppression marker
    pub login_redirect_path: String,
    /// Transport timeout in seconds
    pub timeout_secs: u64,
    /// Development build: portal callbacks always point back at this origin
    pub development: bool,
    /// Origins whose users come back through the transfer login flow
    pub transfer_partner_pattern: String,
    /// Origins whose users come back through the portal login flow
    pub portal_partner_pattern: String,
    /// Callback for transfer-flow partners (encoded before use)
    pub transfer_callback_template: String,
    /// Callback for everyone else in the transfer flow (used as-is)
    pub platform_home_template: String,
    /// Final transfer login URL
    pub transfer_login_template: String,
    /// Callback for portal-flow partners and development (encoded before use)
    pub portal_callback_template: String,
    /// Callback for everyone else in the portal flow (used as-is)
    pub portal_fallback_template: String,
    /// Final portal login URL
    pub portal_login_template: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_redirect_path: DEFAULT_LOGIN_REDIRECT_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            development: cfg!(debug_assertions),
            transfer_partner_pattern: DEFAULT_TRANSFER_PARTNER_PATTERN.to_string(),
            portal_partner_pattern: DEFAULT_PORTAL_PARTNER_PATTERN.to_string(),
            transfer_callback_template: "{origin}/pdata/dev-login{path_search}".to_string(),
            platform_home_template: "{protocol}//com.cn/".to_string(),
            transfer_login_template:
                "{protocol}//passport.com.cn/?callback={callback}&_{timestamp}#!/access/login"
                    .to_string(),
            portal_callback_template: "{origin}/pdata{login_redirect_path}{path_search}"
                .to_string(),
            portal_fallback_template: "{origin}/pdata".to_string(),
            portal_login_template: "{protocol}//login.vmic.xyz/LoginPage.aspx?RequestUrl={callback}"
                .to_string(),
        }
    }
}

impl GuardConfig {
    /// Create a new guard config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Check patterns compile and required fields are set
    pub fn validate(&self) -> Result<()> {
        if self.login_redirect_path.is_empty() {
            return Err(Error::config("login_redirect_path must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be positive"));
        }
        regex::Regex::new(&self.transfer_partner_pattern)?;
        regex::Regex::new(&self.portal_partner_pattern)?;
        Ok(())
    }

    /// Transport timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the login-redirect route
    pub fn login_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.login_redirect_path = path.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Mark as a development build
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Set the transfer-flow partner pattern
    pub fn transfer_partner_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.transfer_partner_pattern = pattern.into();
        self
    }

    /// Set the portal-flow partner pattern
    pub fn portal_partner_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.portal_partner_pattern = pattern.into();
        self
    }

    /// Config for production builds
    pub fn production() -> Self {
        Self {
            development: false,
            ..Default::default()
        }
    }
}
