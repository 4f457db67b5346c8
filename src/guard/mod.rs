// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session guard interceptors
//!
//! - [`RequestAugmenter`]: page token, `X-Requested-With`, credentials
//! - [`WarningExtractor`] / [`WarningInterceptor`]: advisory warnings
//! - [`ResponseClassifier`] / [`SessionGuard`]: retcode decision table and
//!   login redirects
//! - [`GuardedClient`]: transport with the default chain installed

mod augmenter;
mod classifier;
mod redirect;
mod runtime;
mod warning;

pub use augmenter::{RequestAugmenter, TOKEN_PARAM};
pub use classifier::{Decision, ResponseClassifier, SessionGuard};
pub use redirect::{encode_uri_component, path_search, LoginFlow, RedirectPolicy, RedirectTarget};
pub use runtime::{install_default_chain, GuardedClient, PageContext};
pub use warning::{WarningExtractor, WarningInterceptor};
