// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Retcode classification and the session guard response hook

use std::sync::Arc;

use chrono::Utc;

use super::redirect::{RedirectPolicy, RedirectTarget};
use crate::browser::{NavigationContext, PageLocation};
use crate::error::Error;
use crate::http::{InboundResponse, Retcode, StatusEnvelope};
use crate::network::{InterceptAction, Interceptor};

/// What to do with one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No session problem; hand the response on
    PassThrough,
    /// Server-supplied redirect for `not_login`; the call is abandoned
    Redirect { target: String },
    /// Transfer login (4006); navigate and reject with the message
    TransferLogin { target: RedirectTarget, reason: String },
    /// Portal login (4005 / `not_login`); the call is abandoned
    PortalLogin { target: RedirectTarget },
    /// Portal login wanted, but the page is the login-redirect page already
    LoopSuppressed,
}

impl Decision {
    /// URL the browser is sent to, if any
    pub fn navigation_target(&self) -> Option<&str> {
        match self {
            Decision::Redirect { target } => Some(target),
            Decision::TransferLogin { target, .. } | Decision::PortalLogin { target } => {
                Some(&target.url)
            }
            Decision::PassThrough | Decision::LoopSuppressed => None,
        }
    }

    /// Whether the response reaches the caller unchanged
    pub fn passes_through(&self) -> bool {
        matches!(self, Decision::PassThrough | Decision::LoopSuppressed)
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Decision::PassThrough => "pass-through",
            Decision::Redirect { .. } => "redirect",
            Decision::TransferLogin { .. } => "transfer-login",
            Decision::PortalLogin { .. } => "portal-login",
            Decision::LoopSuppressed => "loop-suppressed",
        }
    }
}

/// Pure decision table over the status envelope
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    policy: RedirectPolicy,
}

impl ResponseClassifier {
    pub fn new(policy: RedirectPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    /// Classify a response; first matching rule wins
    pub fn classify(
        &self,
        envelope: &StatusEnvelope,
        location: &PageLocation,
        timestamp_ms: i64,
    ) -> Decision {
        let retcode = &envelope.retcode;

        if retcode.is_not_login() {
            if let Some(redirect) = envelope.redirect_url() {
                return Decision::Redirect {
                    target: redirect.to_string(),
                };
            }
        }

        if retcode.is_code(Retcode::TRANSFER_LOGIN) {
            return Decision::TransferLogin {
                target: self.policy.transfer_login_target(location, timestamp_ms),
                reason: envelope.message_text().to_string(),
            };
        }

        if retcode.is_code(Retcode::PORTAL_LOGIN) || retcode.is_not_login() {
            if self.policy.is_login_redirect_page(location) {
                return Decision::LoopSuppressed;
            }
            return Decision::PortalLogin {
                target: self.policy.portal_login_target(location),
            };
        }

        Decision::PassThrough
    }
}

/// Response hook applying [`ResponseClassifier`] decisions to the page
pub struct SessionGuard {
    classifier: ResponseClassifier,
    navigator: Arc<dyn NavigationContext>,
}

impl SessionGuard {
    pub fn new(classifier: ResponseClassifier, navigator: Arc<dyn NavigationContext>) -> Self {
        Self {
            classifier,
            navigator,
        }
    }
}

impl Interceptor<InboundResponse> for SessionGuard {
    fn name(&self) -> &str {
        "session-guard"
    }

    fn on_fulfilled(&self, response: InboundResponse) -> InterceptAction<InboundResponse> {
        let envelope = response.envelope();
        let location = self.navigator.current_location();
        let decision =
            self.classifier
                .classify(&envelope, &location, Utc::now().timestamp_millis());

        // navigation may unload the page: log first, navigate last
        match decision {
            Decision::PassThrough => InterceptAction::Continue(response),
            Decision::LoopSuppressed => {
                tracing::debug!(
                    retcode = %envelope.retcode,
                    pathname = %location.pathname,
                    "Login redirect suppressed on login-redirect page"
                );
                InterceptAction::Continue(response)
            }
            Decision::Redirect { target } => {
                tracing::info!(url = %response.url, target = %target, "Session missing, following server redirect");
                self.navigator.navigate_to(&target);
                InterceptAction::Abandon { target }
            }
            Decision::TransferLogin { target, reason } => {
                tracing::info!(url = %response.url, target = %target.url, "Session expired, transfer login");
                let error = Error::rejected(envelope.retcode.clone(), reason);
                self.navigator.navigate_to(&target.url);
                InterceptAction::Reject(error)
            }
            Decision::PortalLogin { target } => {
                tracing::info!(url = %response.url, target = %target.url, "Session expired, portal login");
                self.navigator.navigate_to(&target.url);
                InterceptAction::Abandon { target: target.url }
            }
        }
    }
}
