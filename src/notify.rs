// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Non-blocking warning display

use parking_lot::RwLock;

/// Toast/notification service
pub trait Notifier: Send + Sync {
    /// Show a warning; never blocks
    fn warn(&self, text: &str);
}

/// Notifier that writes warnings to the log
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, text: &str) {
        tracing::warn!(text = %text, "Warning shown");
    }
}

/// Notifier that keeps warnings in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    warnings: RwLock<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings shown so far
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.read().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, text: &str) {
        self.warnings.write().push(text.to_string());
    }
}
