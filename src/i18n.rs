// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Localized message lookup

use std::collections::HashMap;

use lazy_static::lazy_static;
use parking_lot::RwLock;

/// Message id for the server error warning
pub const MSG_SERVER_ERROR: &str = "msg.serverError";
/// Message id for the generic network error warning
pub const MSG_NETWORK_ERROR: &str = "msg.networkError";

/// English locale tag
pub const LOCALE_EN_US: &str = "en-US";
/// Chinese locale tag, the application default
pub const LOCALE_ZH_CN: &str = "zh-CN";

/// Localization service
pub trait Localizer: Send + Sync {
    /// Look up a message by id in the active locale
    fn lookup(&self, message_id: &str) -> String;

    /// Active UI locale tag
    fn current_locale(&self) -> String;
}

lazy_static! {
    static ref MESSAGES: HashMap<&'static str, HashMap<&'static str, &'static str>> = {
        let mut en = HashMap::new();
        en.insert(MSG_SERVER_ERROR, "Server error, please try again later");
        en.insert(MSG_NETWORK_ERROR, "Network error, please try again later");

        let mut zh = HashMap::new();
        zh.insert(MSG_SERVER_ERROR, "服务器错误，请稍后重试");
        zh.insert(MSG_NETWORK_ERROR, "网络错误，请稍后重试");

        let mut all = HashMap::new();
        all.insert(LOCALE_EN_US, en);
        all.insert(LOCALE_ZH_CN, zh);
        all
    };
}

/// Built-in message catalog
pub struct Catalog {
    locale: RwLock<String>,
}

impl Catalog {
    /// Create a catalog with an active locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: RwLock::new(locale.into()),
        }
    }

    /// Switch the active locale
    pub fn set_locale(&self, locale: impl Into<String>) {
        *self.locale.write() = locale.into();
    }

    /// Locales with built-in messages
    pub fn supported_locales() -> Vec<&'static str> {
        let mut locales: Vec<_> = MESSAGES.keys().copied().collect();
        locales.sort();
        locales
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(LOCALE_ZH_CN)
    }
}

impl Localizer for Catalog {
    fn lookup(&self, message_id: &str) -> String {
        let locale = self.locale.read();
        MESSAGES
            .get(locale.as_str())
            .or_else(|| MESSAGES.get(LOCALE_ZH_CN))
            .and_then(|table| table.get(message_id))
            .map(|m| m.to_string())
            .unwrap_or_else(|| message_id.to_string())
    }

    fn current_locale(&self) -> String {
        self.locale.read().clone()
    }
}
