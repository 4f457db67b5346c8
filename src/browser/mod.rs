// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hosting page abstraction
//!
//! Location reads and navigation writes go through [`NavigationContext`] so
//! interceptors never touch global page state directly.

mod location;
mod navigator;

pub use location::PageLocation;
pub use navigator::{NavigationContext, RecordingNavigator};
