// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Advisory warnings for non-zero retcodes

use std::sync::Arc;

use crate::browser::NavigationContext;
use crate::http::{InboundResponse, Retcode, StatusEnvelope};
use crate::i18n::{Localizer, LOCALE_EN_US, MSG_NETWORK_ERROR, MSG_SERVER_ERROR};
use crate::network::{InterceptAction, Interceptor};
use crate::notify::Notifier;

/// Computes the warning text for a response
pub struct WarningExtractor {
    localizer: Arc<dyn Localizer>,
}

impl WarningExtractor {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self { localizer }
    }

    /// Warning text, empty when there is nothing to say
    pub fn extract(&self, envelope: &StatusEnvelope) -> String {
        let retcode = &envelope.retcode;

        if retcode.is_ok() {
            return String::new();
        }

        if retcode.is_code(Retcode::SERVER_ERROR) {
            return self.localizer.lookup(MSG_SERVER_ERROR);
        }

        if self.localizer.current_locale() == LOCALE_EN_US {
            return envelope.en_message.clone().unwrap_or_default();
        }

        match envelope.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.localizer.lookup(MSG_NETWORK_ERROR),
        }
    }
}

/// Response hook showing warnings; never changes the outcome
pub struct WarningInterceptor {
    extractor: WarningExtractor,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn NavigationContext>,
    login_redirect_path: String,
}

impl WarningInterceptor {
    pub fn new(
        extractor: WarningExtractor,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn NavigationContext>,
        login_redirect_path: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            notifier,
            navigator,
            login_redirect_path: login_redirect_path.into(),
        }
    }
}

impl Interceptor<InboundResponse> for WarningInterceptor {
    fn name(&self) -> &str {
        "warning"
    }

    fn on_fulfilled(&self, response: InboundResponse) -> InterceptAction<InboundResponse> {
        let envelope = response.envelope();
        let warning = self.extractor.extract(&envelope);

        if !warning.is_empty() {
            // stay quiet on the login-redirect page
            if self.navigator.current_location().is_on(&self.login_redirect_path) {
                tracing::debug!(retcode = %envelope.retcode, "Warning suppressed on login-redirect page");
            } else {
                tracing::debug!(retcode = %envelope.retcode, url = %response.url, "Showing warning");
                self.notifier.warn(&warning);
            }
        }

        InterceptAction::Continue(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::RecordingNavigator;
    use crate::i18n::{Catalog, LOCALE_ZH_CN};
    use crate::notify::RecordingNotifier;
    use serde_json::json;
    use url::Url;

    fn extractor(locale: &str) -> WarningExtractor {
        WarningExtractor::new(Arc::new(Catalog::new(locale)))
    }

    #[test]
    fn test_zero_has_no_warning() {
        for locale in [LOCALE_EN_US, LOCALE_ZH_CN] {
            let env = StatusEnvelope::new(0).message("ignored").en_message("ignored");
            assert_eq!(extractor(locale).extract(&env), "");
        }
    }

    #[test]
    fn test_server_error_independent_of_locale() {
        let env = StatusEnvelope::new(10000).message("raw").en_message("raw");
        assert_eq!(extractor(LOCALE_EN_US).extract(&env), Catalog::new(LOCALE_EN_US).lookup(MSG_SERVER_ERROR));
        assert_eq!(extractor(LOCALE_ZH_CN).extract(&env), Catalog::new(LOCALE_ZH_CN).lookup(MSG_SERVER_ERROR));
    }

    #[test]
    fn test_english_uses_en_message_verbatim() {
        let env = StatusEnvelope::new(1001).message("中文").en_message("English text");
        assert_eq!(extractor(LOCALE_EN_US).extract(&env), "English text");

        let env = StatusEnvelope::new(1001).message("中文").en_message("");
        assert_eq!(extractor(LOCALE_EN_US).extract(&env), "");

        let env = StatusEnvelope::new(1001).message("中文");
        assert_eq!(extractor(LOCALE_EN_US).extract(&env), "");
    }

    #[test]
    fn test_other_locale_uses_message() {
        let env = StatusEnvelope::new(1001).message("参数错误").en_message("Bad params");
        assert_eq!(extractor(LOCALE_ZH_CN).extract(&env), "参数错误");
        assert_eq!(extractor("ja-JP").extract(&env), "参数错误");
    }

    #[test]
    fn test_blank_message_falls_back_to_network_error() {
        let expected = Catalog::new(LOCALE_ZH_CN).lookup(MSG_NETWORK_ERROR);
        assert_eq!(extractor(LOCALE_ZH_CN).extract(&StatusEnvelope::new(1001).message("")), expected);
        assert_eq!(extractor(LOCALE_ZH_CN).extract(&StatusEnvelope::new("oops")), expected);
    }

    #[test]
    fn test_null_retcode_warns() {
        let env = StatusEnvelope::from_body(br#"{"retcode":null,"message":"boom"}"#);
        assert_eq!(extractor(LOCALE_ZH_CN).extract(&env), "boom");
    }

    fn hook(href: &str) -> (WarningInterceptor, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let nav = Arc::new(RecordingNavigator::at(href).unwrap());
        let hook = WarningInterceptor::new(extractor(LOCALE_ZH_CN), notifier.clone(), nav, "/login-redirect");
        (hook, notifier)
    }

    fn response(body: serde_json::Value) -> InboundResponse {
        InboundResponse::from_json(Url::parse("https://api.test/x").unwrap(), &body).unwrap()
    }

    #[test]
    fn test_hook_shows_warning_and_passes_through() {
        let (hook, notifier) = hook("https://a.test/foo");
        let out = hook.on_fulfilled(response(json!({"retcode": 1001, "message": "参数错误"})));

        assert!(out.is_continue());
        assert_eq!(notifier.warnings(), vec!["参数错误"]);
    }

    #[test]
    fn test_hook_quiet_on_login_redirect_page() {
        let (hook, notifier) = hook("https://a.test/pdata/login-redirect");
        let out = hook.on_fulfilled(response(json!({"retcode": 4005, "message": "未登录"})));

        assert!(out.is_continue());
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_hook_quiet_on_success() {
        let (hook, notifier) = hook("https://a.test/foo");
        hook.on_fulfilled(response(json!({"retcode": 0, "data": []})));
        assert!(notifier.is_empty());
    }
}
