// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pre-request augmentation: page token, XHR header, credentials

use std::sync::Arc;

use crate::browser::NavigationContext;
use crate::http::headers::{XML_HTTP_REQUEST, X_REQUESTED_WITH};
use crate::http::{CredentialsMode, OutboundRequest};
use crate::network::{InterceptAction, Interceptor};

/// Query parameter carrying the page token
pub const TOKEN_PARAM: &str = "token";

/// Copies the page token onto every request and forces the XHR policy
pub struct RequestAugmenter {
    navigator: Arc<dyn NavigationContext>,
}

impl RequestAugmenter {
    pub fn new(navigator: Arc<dyn NavigationContext>) -> Self {
        Self { navigator }
    }

    /// Augment a request; applying twice gives the same request
    pub fn augment(&self, mut request: OutboundRequest) -> OutboundRequest {
        match self.navigator.current_location().query_value(TOKEN_PARAM) {
            Some(token) => request.set_param(TOKEN_PARAM, token),
            None => request.remove_param(TOKEN_PARAM),
        }

        request.set_header(X_REQUESTED_WITH, XML_HTTP_REQUEST);
        request.credentials = CredentialsMode::Include;
        request
    }
}

impl Interceptor<OutboundRequest> for RequestAugmenter {
    fn name(&self) -> &str {
        "request-augmenter"
    }

    fn on_fulfilled(&self, request: OutboundRequest) -> InterceptAction<OutboundRequest> {
        InterceptAction::Continue(self.augment(request))
    }
}
