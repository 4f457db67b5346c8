// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # retgate - retcode interceptors for browser-hosted apps
//!
//! Configures an HTTP client's interceptor chain the way a browser
//! application needs it: every request carries the page token and the XHR
//! header with credentials included, and every response is checked for an
//! application-level `retcode`.
//!
//! ## Features
//!
//! - Request augmentation: `token` from the page URL, `X-Requested-With`,
//!   cross-origin credentials
//! - Warnings: localized server/network errors, non-blocking display
//! - Session guard: `not_login` / 4005 / 4006 send the browser to the right
//!   login flow, with loop suppression on the login-redirect page
//! - Uniform chain: plain functions, `(ok, err)` pairs and `(ok,)` tuples are
//!   normalized into one hook type at registration
//! - Injectable page: location and navigation behind [`NavigationContext`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use retgate::{Catalog, GuardConfig, GuardedClient, PageContext, RecordingNavigator, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let navigator = Arc::new(RecordingNavigator::at("https://app.example.com/list?token=abc")?);
//!     let context = PageContext::new(navigator.clone(), Arc::new(Catalog::default()), Arc::new(TracingNotifier));
//!     let client = GuardedClient::new(GuardConfig::default(), context)?;
//!
//!     match client.get("https://api.example.com/items").await {
//!         Ok(response) => println!("{}", response.text_lossy()),
//!         Err(e) if e.is_abandoned() => println!("navigating to {:?}", navigator.last_navigation()),
//!         Err(e) => eprintln!("request failed: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod i18n;
pub mod network;
pub mod notify;

// Re-exports for convenience

// Page
pub use browser::{NavigationContext, PageLocation, RecordingNavigator};

// Configuration
pub use config::GuardConfig;

// Errors
pub use error::{Error, Result};

// Guard
pub use guard::{
    install_default_chain, Decision, GuardedClient, LoginFlow, PageContext, RedirectPolicy,
    RedirectTarget, RequestAugmenter, ResponseClassifier, SessionGuard, WarningExtractor,
    WarningInterceptor,
};

// HTTP
pub use http::{
    CredentialsMode, HttpClient, HttpClientConfig, InboundResponse, OutboundRequest, Retcode,
    StatusEnvelope,
};

// Collaborators
pub use i18n::{Catalog, Localizer};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};

// Network
pub use network::{Hook, InterceptAction, Interceptor, InterceptorChain, IntoHook, Pipeline};

/// retgate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
