// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interception

mod chain;

pub use chain::{
    forward_rejection, passthrough, Hook, InterceptAction, Interceptor, InterceptorChain,
    IntoHook, Pipeline,
};
