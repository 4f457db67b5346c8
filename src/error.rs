// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for retgate
//!
//! Separates transport failures (forwarded untouched through the chain) from
//! application-level outcomes produced by the interceptors themselves.

use thiserror::Error;

use crate::http::Retcode;

/// Result type alias for retgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for retgate
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-2xx transport status
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Partner-domain pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Request rejected by an interceptor, carrying the response message
    #[error("Request rejected (retcode {retcode}): {message}")]
    Rejected { retcode: Retcode, message: String },

    /// The page navigated away while the request was in flight
    #[error("Navigated away to {target}")]
    Abandoned { target: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a rejection carrying the response message
    pub fn rejected(retcode: Retcode, message: impl Into<String>) -> Self {
        Error::Rejected {
            retcode,
            message: message.into(),
        }
    }

    /// Create an abandonment for a navigation target
    pub fn abandoned(target: impl Into<String>) -> Self {
        Error::Abandoned {
            target: target.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if an interceptor rejected the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }

    /// Check if the page navigated away
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Error::Abandoned { .. })
    }

    /// Check if this came from the transport rather than the application
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Io(_) | Error::Status { .. })
    }

    /// Check if the transport timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Get transport status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the application retcode if available
    pub fn retcode(&self) -> Option<&Retcode> {
        match self {
            Error::Rejected { retcode, .. } => Some(retcode),
            _ => None,
        }
    }

    /// Get the rejection reason as the application would show it
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Get the navigation target if the call was abandoned
    pub fn target(&self) -> Option<&str> {
        match self {
            Error::Abandoned { target } => Some(target),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_error() {
        let err = Error::rejected(Retcode::Code(4006), "session expired");

        assert!(err.is_rejection());
        assert!(!err.is_transport());
        assert_eq!(err.retcode(), Some(&Retcode::Code(4006)));
        assert_eq!(err.reason(), Some("session expired"));
        assert_eq!(
            err.to_string(),
            "Request rejected (retcode 4006): session expired"
        );
    }

    #[test]
    fn test_abandoned_error() {
        let err = Error::abandoned("https://example.test/x");

        assert!(err.is_abandoned());
        assert_eq!(err.target(), Some("https://example.test/x"));
        assert_eq!(err.retcode(), None);
    }

    #[test]
    fn test_status_error() {
        let err = Error::Status {
            status: 503,
            url: "https://api.test/x".to_string(),
        };

        assert!(err.is_transport());
        assert!(!err.is_rejection());
        assert_eq!(err.status_code(), Some(503));
    }
}
