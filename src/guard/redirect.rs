// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Login redirect URL construction
//!
//! Two login systems are served: the transfer flow (retcode 4006) and the
//! portal flow (retcode 4005 / `not_login`). They share the path-search
//! transformation but use different partner patterns, callbacks and
//! destinations, and are kept apart on purpose.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::browser::PageLocation;
use crate::config::GuardConfig;
use crate::error::Result;

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode with `encodeURIComponent` semantics
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Search string carrying the current path
///
/// The login systems cannot parse `.` in callback parameters and it survives
/// percent-encoding, so every `.` becomes `(`.
pub fn path_search(location: &PageLocation) -> String {
    let search = location.search.replace('.', "(");
    if search.is_empty() {
        format!("?_path={}", location.pathname)
    } else {
        format!("{}&_path={}", search, location.pathname)
    }
}

/// Which login system a redirect goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFlow {
    /// Login transfer page, retcode 4006
    Transfer,
    /// Portal login page, retcode 4005 / `not_login`
    Portal,
}

/// Computed login redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub flow: LoginFlow,
    /// Where the login system sends the user back
    pub callback: String,
    /// Full navigation URL
    pub url: String,
}

/// Values available to redirect templates
struct TemplateVars<'a> {
    location: &'a PageLocation,
    path_search: &'a str,
    login_redirect_path: &'a str,
    callback: &'a str,
    timestamp: Option<i64>,
}

impl TemplateVars<'_> {
    fn get(&self, name: &str) -> Option<String> {
        match name {
            "origin" => Some(self.location.origin.clone()),
            "pathname" => Some(self.location.pathname.clone()),
            "search" => Some(self.location.search.clone()),
            "protocol" => Some(self.location.protocol.clone()),
            "path_search" => Some(self.path_search.to_string()),
            "login_redirect_path" => Some(self.login_redirect_path.to_string()),
            "callback" => Some(self.callback.to_string()),
            "timestamp" => self.timestamp.map(|t| t.to_string()),
            _ => None,
        }
    }
}

/// Single-pass `{name}` substitution; unknown names stay literal
fn render(template: &str, vars: &TemplateVars<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.get(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Builds login redirect URLs from the page location
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    config: GuardConfig,
    transfer_partner: Regex,
    portal_partner: Regex,
}

impl RedirectPolicy {
    /// Create a policy, compiling the partner patterns
    pub fn new(config: &GuardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transfer_partner: Regex::new(&config.transfer_partner_pattern)?,
            portal_partner: Regex::new(&config.portal_partner_pattern)?,
            config: config.clone(),
        })
    }

    /// Route of the login-redirect page
    pub fn login_redirect_path(&self) -> &str {
        &self.config.login_redirect_path
    }

    /// Check whether the page already is the login-redirect page
    pub fn is_login_redirect_page(&self, location: &PageLocation) -> bool {
        location.is_on(&self.config.login_redirect_path)
    }

    /// Redirect for retcode 4006
    pub fn transfer_login_target(&self, location: &PageLocation, timestamp_ms: i64) -> RedirectTarget {
        let path_search = path_search(location);
        let mut vars = TemplateVars {
            location,
            path_search: &path_search,
            login_redirect_path: &self.config.login_redirect_path,
            callback: "",
            timestamp: Some(timestamp_ms),
        };

        let callback = if self.transfer_partner.is_match(&location.origin) {
            encode_uri_component(&render(&self.config.transfer_callback_template, &vars))
        } else {
            render(&self.config.platform_home_template, &vars)
        };

        vars.callback = &callback;
        let url = render(&self.config.transfer_login_template, &vars);

        RedirectTarget {
            flow: LoginFlow::Transfer,
            callback: callback.clone(),
            url,
        }
    }

    /// Redirect for retcode 4005 and `not_login` without a redirect URL
    pub fn portal_login_target(&self, location: &PageLocation) -> RedirectTarget {
        let path_search = path_search(location);
        let mut vars = TemplateVars {
            location,
            path_search: &path_search,
            login_redirect_path: &self.config.login_redirect_path,
            callback: "",
            timestamp: None,
        };

        let callback =
            if self.config.development || self.portal_partner.is_match(&location.origin) {
                encode_uri_component(&render(&self.config.portal_callback_template, &vars))
            } else {
                render(&self.config.portal_fallback_template, &vars)
            };

        vars.callback = &callback;
        let url = render(&self.config.portal_login_template, &vars);

        RedirectTarget {
            flow: LoginFlow::Portal,
            callback: callback.clone(),
            url,
        }
    }
}
