// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Guarded client: transport plus the default interceptor chain

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use super::augmenter::RequestAugmenter;
use super::classifier::{ResponseClassifier, SessionGuard};
use super::redirect::RedirectPolicy;
use super::warning::{WarningExtractor, WarningInterceptor};
use crate::browser::NavigationContext;
use crate::config::GuardConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, InboundResponse, OutboundRequest};
use crate::i18n::Localizer;
use crate::network::{forward_rejection, passthrough, Hook, InterceptorChain};
use crate::notify::Notifier;

/// Collaborators supplied by the hosting page
#[derive(Clone)]
pub struct PageContext {
    pub navigator: Arc<dyn NavigationContext>,
    pub localizer: Arc<dyn Localizer>,
    pub notifier: Arc<dyn Notifier>,
}

impl PageContext {
    pub fn new(
        navigator: Arc<dyn NavigationContext>,
        localizer: Arc<dyn Localizer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            navigator,
            localizer,
            notifier,
        }
    }
}

/// Register the application's request and response hooks
pub fn install_default_chain(
    chain: &mut InterceptorChain,
    config: &GuardConfig,
    context: &PageContext,
) -> Result<()> {
    let policy = RedirectPolicy::new(config)?;

    chain
        .use_request(Hook::from_interceptor(RequestAugmenter::new(
            context.navigator.clone(),
        )))
        .use_request((
            passthrough::<OutboundRequest>,
            forward_rejection::<OutboundRequest>,
        ))
        .use_request((passthrough::<OutboundRequest>,));

    chain
        .use_response(Hook::from_interceptor(WarningInterceptor::new(
            WarningExtractor::new(context.localizer.clone()),
            context.notifier.clone(),
            context.navigator.clone(),
            config.login_redirect_path.clone(),
        )))
        .use_response(Hook::from_interceptor(SessionGuard::new(
            ResponseClassifier::new(policy),
            context.navigator.clone(),
        )))
        .use_response((passthrough::<InboundResponse>,));

    Ok(())
}

/// HTTP client with the retcode interceptor chain installed
pub struct GuardedClient {
    http: HttpClient,
    chain: InterceptorChain,
    config: GuardConfig,
    navigator: Arc<dyn NavigationContext>,
}

impl GuardedClient {
    /// Create a client with the default chain
    pub fn new(config: GuardConfig, context: PageContext) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::with_config(HttpClientConfig {
            timeout: config.timeout(),
            ..Default::default()
        })?;

        let mut chain = InterceptorChain::new();
        install_default_chain(&mut chain, &config, &context)?;

        Ok(Self {
            http,
            chain,
            config,
            navigator: context.navigator,
        })
    }

    /// Send a request through the chain
    ///
    /// `Error::Abandoned` means the page has been told to navigate away.
    pub async fn send(&self, request: OutboundRequest) -> Result<InboundResponse> {
        let request = self.chain.process_request(request).into_result()?;

        let page_origin = self.navigator.current_location().origin;
        let transport = match self.http.execute_from(Some(&page_origin), request).await {
            Ok(response) if !response.is_success() => Err(Error::Status {
                status: response.status_code(),
                url: response.url.to_string(),
            }),
            other => other,
        };

        if let Err(ref e) = transport {
            tracing::warn!(error = %e, "Transport error");
        }

        self.chain.process_response(transport).into_result()
    }

    /// Send a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<InboundResponse> {
        self.send(OutboundRequest::get(url)?).await
    }

    /// Send a POST request with a JSON body
    pub async fn post_json<T: Serialize>(
        &self,
        url: impl AsRef<str>,
        body: &T,
    ) -> Result<InboundResponse> {
        self.send(OutboundRequest::new(Method::POST, url)?.json(body)?)
            .await
    }

    /// Send several requests concurrently
    pub async fn send_all(&self, requests: Vec<OutboundRequest>) -> Vec<Result<InboundResponse>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.send(r)).collect();
        futures::future::join_all(futures).await
    }

    /// Installed chain
    pub fn chain(&self) -> &InterceptorChain {
        &self.chain
    }

    /// Installed chain, for registering extra hooks
    pub fn chain_mut(&mut self) -> &mut InterceptorChain {
        &mut self.chain
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}
