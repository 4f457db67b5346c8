// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interceptor chain
//!
//! Hooks run in registration order, promise-style: a fulfilled value goes to
//! the next hook's fulfilled handler, a rejection to its rejected handler.
//! Every registration shape is normalized into a [`Hook`] when it is added.
//!
//! # Example
//!
//! ```rust
//! use retgate::network::{InterceptAction, InterceptorChain, passthrough, forward_rejection};
//! use retgate::http::OutboundRequest;
//!
//! let mut chain = InterceptorChain::new();
//!
//! // a plain function
//! chain.use_request(|mut req: OutboundRequest| {
//!     req.set_header("x-trace", "1");
//!     InterceptAction::Continue(req)
//! });
//! // a (fulfilled, rejected) pair
//! chain.use_request((passthrough::<OutboundRequest>, forward_rejection::<OutboundRequest>));
//! // a one-element tuple: no error handler
//! chain.use_request((passthrough::<OutboundRequest>,));
//!
//! let req = OutboundRequest::get("https://example.com").unwrap();
//! let out = chain.process_request(req).into_result().unwrap();
//! assert_eq!(out.header_value("x-trace"), Some("1"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::http::{InboundResponse, OutboundRequest};

/// Outcome of a single hook, and of a whole pipeline
pub enum InterceptAction<T> {
    /// Continue with the (possibly modified) value
    Continue(T),
    /// Reject with an error
    Reject(Error),
    /// The page is navigating away; nothing further runs
    Abandon { target: String },
}

impl<T> InterceptAction<T> {
    pub fn is_continue(&self) -> bool {
        matches!(self, InterceptAction::Continue(_))
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, InterceptAction::Reject(_))
    }

    pub fn is_abandon(&self) -> bool {
        matches!(self, InterceptAction::Abandon { .. })
    }

    /// Convert to a result; abandonment becomes [`Error::Abandoned`]
    pub fn into_result(self) -> Result<T> {
        match self {
            InterceptAction::Continue(value) => Ok(value),
            InterceptAction::Reject(error) => Err(error),
            InterceptAction::Abandon { target } => Err(Error::abandoned(target)),
        }
    }
}

impl<T> fmt::Debug for InterceptAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterceptAction::Continue(_) => write!(f, "Continue(..)"),
            InterceptAction::Reject(e) => write!(f, "Reject({})", e),
            InterceptAction::Abandon { target } => write!(f, "Abandon({})", target),
        }
    }
}

/// Identity fulfilled handler
pub fn passthrough<T>(value: T) -> InterceptAction<T> {
    InterceptAction::Continue(value)
}

/// Identity rejected handler
pub fn forward_rejection<T>(error: Error) -> InterceptAction<T> {
    InterceptAction::Reject(error)
}

/// Interceptor implemented as a type
pub trait Interceptor<T>: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Handle a fulfilled value
    fn on_fulfilled(&self, value: T) -> InterceptAction<T>;

    /// Handle a rejection from earlier in the chain
    fn on_rejected(&self, error: Error) -> InterceptAction<T> {
        InterceptAction::Reject(error)
    }
}

type Fulfilled<T> = Arc<dyn Fn(T) -> InterceptAction<T> + Send + Sync>;
type Rejected<T> = Arc<dyn Fn(Error) -> InterceptAction<T> + Send + Sync>;

/// Normalized hook: one fulfilled and one rejected handler
pub struct Hook<T> {
    name: String,
    fulfilled: Fulfilled<T>,
    rejected: Rejected<T>,
}

impl<T: 'static> Hook<T> {
    /// Build a hook from handlers; no rejected handler forwards the rejection
    pub fn new<F, G>(name: impl Into<String>, fulfilled: F, rejected: Option<G>) -> Self
    where
        F: Fn(T) -> InterceptAction<T> + Send + Sync + 'static,
        G: Fn(Error) -> InterceptAction<T> + Send + Sync + 'static,
    {
        let rejected: Rejected<T> = match rejected {
            Some(g) => Arc::new(g),
            None => Arc::new(forward_rejection::<T>),
        };
        Self {
            name: name.into(),
            fulfilled: Arc::new(fulfilled),
            rejected,
        }
    }

    /// Name a plain function hook
    pub fn named<F>(name: impl Into<String>, fulfilled: F) -> Self
    where
        F: Fn(T) -> InterceptAction<T> + Send + Sync + 'static,
    {
        Self::new(name, fulfilled, None::<fn(Error) -> InterceptAction<T>>)
    }

    /// Wrap a type implementing [`Interceptor`]
    pub fn from_interceptor<I: Interceptor<T> + 'static>(interceptor: I) -> Self {
        let interceptor = Arc::new(interceptor);
        let on_ok = interceptor.clone();
        let on_err = interceptor.clone();
        Self {
            name: interceptor.name().to_string(),
            fulfilled: Arc::new(move |value: T| on_ok.on_fulfilled(value)),
            rejected: Arc::new(move |error: Error| on_err.on_rejected(error)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fulfilled: self.fulfilled.clone(),
            rejected: self.rejected.clone(),
        }
    }
}

/// Registration shapes accepted by the chain
pub trait IntoHook<T> {
    fn into_hook(self) -> Hook<T>;
}

impl<T: 'static> IntoHook<T> for Hook<T> {
    fn into_hook(self) -> Hook<T> {
        self
    }
}

impl<T, F> IntoHook<T> for F
where
    T: 'static,
    F: Fn(T) -> InterceptAction<T> + Send + Sync + 'static,
{
    fn into_hook(self) -> Hook<T> {
        Hook::named("anonymous", self)
    }
}

impl<T, F> IntoHook<T> for (F,)
where
    T: 'static,
    F: Fn(T) -> InterceptAction<T> + Send + Sync + 'static,
{
    fn into_hook(self) -> Hook<T> {
        Hook::named("anonymous", self.0)
    }
}

impl<T, F, G> IntoHook<T> for (F, G)
where
    T: 'static,
    F: Fn(T) -> InterceptAction<T> + Send + Sync + 'static,
    G: Fn(Error) -> InterceptAction<T> + Send + Sync + 'static,
{
    fn into_hook(self) -> Hook<T> {
        Hook::new("anonymous", self.0, Some(self.1))
    }
}

/// Ordered list of hooks over one value type
pub struct Pipeline<T> {
    hooks: Vec<Hook<T>>,
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<T: 'static> Pipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook in any registration shape
    pub fn add<H: IntoHook<T>>(&mut self, hook: H) -> &mut Self {
        self.hooks.push(hook.into_hook());
        self
    }

    /// Run the hooks over an initial state
    pub fn process(&self, initial: Result<T>) -> InterceptAction<T> {
        let mut state = initial;

        for hook in &self.hooks {
            let action = match state {
                Ok(value) => (hook.fulfilled)(value),
                Err(error) => (hook.rejected)(error),
            };

            state = match action {
                InterceptAction::Continue(value) => Ok(value),
                InterceptAction::Reject(error) => Err(error),
                InterceptAction::Abandon { target } => {
                    tracing::debug!(hook = %hook.name, target = %target, "Chain abandoned");
                    return InterceptAction::Abandon { target };
                }
            };
        }

        match state {
            Ok(value) => InterceptAction::Continue(value),
            Err(error) => InterceptAction::Reject(error),
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

/// Request and response pipelines of one client
#[derive(Default)]
pub struct InterceptorChain {
    request: Pipeline<OutboundRequest>,
    response: Pipeline<InboundResponse>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request hook
    pub fn use_request<H: IntoHook<OutboundRequest>>(&mut self, hook: H) -> &mut Self {
        self.request.add(hook);
        self
    }

    /// Register a response hook
    pub fn use_response<H: IntoHook<InboundResponse>>(&mut self, hook: H) -> &mut Self {
        self.response.add(hook);
        self
    }

    /// Process a request through all request hooks
    pub fn process_request(&self, request: OutboundRequest) -> InterceptAction<OutboundRequest> {
        self.request.process(Ok(request))
    }

    /// Process a transport result through all response hooks
    pub fn process_response(
        &self,
        response: Result<InboundResponse>,
    ) -> InterceptAction<InboundResponse> {
        self.response.process(response)
    }

    /// Total number of registered hooks
    pub fn len(&self) -> usize {
        self.request.len() + self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty()
    }

    pub fn request_hooks(&self) -> &Pipeline<OutboundRequest> {
        &self.request
    }

    pub fn response_hooks(&self) -> &Pipeline<InboundResponse> {
        &self.response
    }
}
