// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Application status envelope carried in response bodies

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application-level status code embedded in a response body
///
/// Numbers and strings are distinct: the string `"4006"` is not the code 4006.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Retcode {
    /// Numeric retcode
    Code(i64),
    /// String retcode such as `not_login`
    Tag(String),
    /// Anything else the server sent (floats, booleans, objects)
    Other(Value),
}

impl Retcode {
    /// Success code
    pub const OK: i64 = 0;
    /// Session expired, transfer login flow
    pub const TRANSFER_LOGIN: i64 = 4006;
    /// Session expired, portal login flow
    pub const PORTAL_LOGIN: i64 = 4005;
    /// Server error
    pub const SERVER_ERROR: i64 = 10000;
    /// String tag signalling a missing session
    pub const NOT_LOGIN: &'static str = "not_login";

    /// Check for a numeric code
    pub fn is_code(&self, code: i64) -> bool {
        matches!(self, Retcode::Code(c) if *c == code)
    }

    /// Check for a string tag
    pub fn is_tag(&self, tag: &str) -> bool {
        matches!(self, Retcode::Tag(t) if t == tag)
    }

    /// Check for the success code
    pub fn is_ok(&self) -> bool {
        self.is_code(Self::OK)
    }

    /// Check for the `not_login` tag
    pub fn is_not_login(&self) -> bool {
        self.is_tag(Self::NOT_LOGIN)
    }

    /// Classify a JSON value; integers are codes, strings are tags
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(code) => Retcode::Code(code),
                None => Retcode::Other(value.clone()),
            },
            Value::String(tag) => Retcode::Tag(tag.clone()),
            other => Retcode::Other(other.clone()),
        }
    }
}

impl Default for Retcode {
    fn default() -> Self {
        Retcode::Code(Self::OK)
    }
}

impl fmt::Display for Retcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retcode::Code(c) => write!(f, "{}", c),
            Retcode::Tag(t) => write!(f, "{}", t),
            Retcode::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Retcode {
    fn from(code: i64) -> Self {
        Retcode::Code(code)
    }
}

impl From<i32> for Retcode {
    fn from(code: i32) -> Self {
        Retcode::Code(code.into())
    }
}

impl From<&str> for Retcode {
    fn from(tag: &str) -> Self {
        Retcode::Tag(tag.to_string())
    }
}

/// Status envelope `{ retcode, message, enMessage, redirect }`
///
/// Extra payload fields are ignored. Only a missing `retcode` reads as 0;
/// an explicit `null` is kept as [`Retcode::Other`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEnvelope {
    #[serde(default)]
    pub retcode: Retcode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub en_message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

impl StatusEnvelope {
    /// Create an envelope with just a retcode
    pub fn new(retcode: impl Into<Retcode>) -> Self {
        Self {
            retcode: retcode.into(),
            ..Default::default()
        }
    }

    /// Set the message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the English message
    pub fn en_message(mut self, message: impl Into<String>) -> Self {
        self.en_message = Some(message.into());
        self
    }

    /// Set the redirect URL
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect = Some(url.into());
        self
    }

    /// Read an envelope from a response body
    ///
    /// Bodies that are not a JSON object give the empty envelope. Fields are
    /// read independently: a text field of the wrong type reads as absent
    /// without affecting `retcode`.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields),
            _ => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |name: &str| fields.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            retcode: fields.get("retcode").map(Retcode::from_value).unwrap_or_default(),
            message: text("message"),
            en_message: text("enMessage"),
            redirect: text("redirect"),
        }
    }

    /// Message text, empty when absent
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Redirect URL if present and non-empty
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect.as_deref().filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_retcodes() {
        let env = StatusEnvelope::from_body(br#"{"retcode":4006,"message":"expired"}"#);
        assert!(env.retcode.is_code(4006));
        assert_eq!(env.message_text(), "expired");

        let env = StatusEnvelope::from_body(br#"{"retcode":"not_login","redirect":"https://example.test/x"}"#);
        assert!(env.retcode.is_not_login());
        assert_eq!(env.redirect_url(), Some("https://example.test/x"));

        let env = StatusEnvelope::from_body(br#"{"retcode":"4006"}"#);
        assert!(!env.retcode.is_code(4006));
    }

    #[test]
    fn test_missing_retcode_is_ok() {
        let env = StatusEnvelope::from_body(br#"{"data":[1,2,3]}"#);
        assert!(env.retcode.is_ok());
    }

    #[test]
    fn test_null_retcode_is_not_ok() {
        let env = StatusEnvelope::from_body(br#"{"retcode":null,"message":"boom"}"#);
        assert_eq!(env.retcode, Retcode::Other(Value::Null));
        assert!(!env.retcode.is_ok());
        assert_eq!(env.message_text(), "boom");
    }

    #[test]
    fn test_mistyped_field_keeps_retcode() {
        let env = StatusEnvelope::from_body(br#"{"retcode":4006,"message":123,"redirect":false}"#);
        assert!(env.retcode.is_code(4006));
        assert_eq!(env.message, None);
        assert_eq!(env.redirect, None);

        let env = StatusEnvelope::from_body(br#"{"retcode":"not_login","enMessage":["x"],"redirect":"https://sso.test/"}"#);
        assert!(env.retcode.is_not_login());
        assert_eq!(env.en_message, None);
        assert_eq!(env.redirect_url(), Some("https://sso.test/"));
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(StatusEnvelope::from_body(b"<html></html>"), StatusEnvelope::default());
        assert_eq!(StatusEnvelope::from_body(b"[1,2]"), StatusEnvelope::default());
        assert_eq!(StatusEnvelope::from_body(b""), StatusEnvelope::default());
    }

    #[test]
    fn test_en_message_field_name() {
        let env = StatusEnvelope::from_body(br#"{"retcode":1,"enMessage":"Oops"}"#);
        assert_eq!(env.en_message.as_deref(), Some("Oops"));
    }

    #[test]
    fn test_float_retcode_is_other() {
        let env = StatusEnvelope::from_body(br#"{"retcode":4006.5}"#);
        assert!(matches!(env.retcode, Retcode::Other(_)));
        assert!(!env.retcode.is_ok());
    }

    #[test]
    fn test_empty_redirect_is_none() {
        let env = StatusEnvelope::new("not_login").redirect("");
        assert_eq!(env.redirect_url(), None);
    }
}
