// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Navigation context: reads the page location and triggers navigations

use parking_lot::RwLock;

use super::location::PageLocation;

/// Access to the hosting page's location
///
/// Implementations wrap the real browser; `navigate_to` may unload the page,
/// so callers finish their own work before calling it.
pub trait NavigationContext: Send + Sync {
    /// Current location of the page
    fn current_location(&self) -> PageLocation;

    /// Navigate the page to a URL
    fn navigate_to(&self, url: &str);
}

/// In-memory navigation context
///
/// Records navigation targets instead of leaving the page.
pub struct RecordingNavigator {
    location: RwLock<PageLocation>,
    navigations: RwLock<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator sitting on a location
    pub fn new(location: PageLocation) -> Self {
        Self {
            location: RwLock::new(location),
            navigations: RwLock::new(Vec::new()),
        }
    }

    /// Create a navigator from a page URL
    pub fn at(href: &str) -> crate::error::Result<Self> {
        Ok(Self::new(PageLocation::parse(href)?))
    }

    /// Move the page without recording a navigation
    pub fn set_location(&self, location: PageLocation) {
        *self.location.write() = location;
    }

    /// All recorded navigation targets
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.read().clone()
    }

    /// Most recent navigation target
    pub fn last_navigation(&self) -> Option<String> {
        self.navigations.read().last().cloned()
    }

    /// Forget recorded navigations
    pub fn clear(&self) {
        self.navigations.write().clear();
    }
}

impl NavigationContext for RecordingNavigator {
    fn current_location(&self) -> PageLocation {
        self.location.read().clone()
    }

    fn navigate_to(&self, url: &str) {
        self.navigations.write().push(url.to_string());
    }
}
