//! Contract for the optional enhancement step.
//!
//! An enhancer receives the rule-based transliteration (and the source text)
//! and returns an alternative rendering. It may fail; failures are values,
//! never panics, and never affect the rule-based output.

use serde::Serialize;

/// Input handed to an enhancer.
#[derive(Debug, Clone, Copy)]
pub struct EnhanceRequest<'a> {
    pub source: &'a str,
    pub rule_based: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnhanceError {
    /// Connection failure, timeout or server-side error.
    #[error("network error: {message}")]
    Network { message: String },
    /// Missing or rejected credentials.
    #[error("authentication error: {message}")]
    Auth { message: String },
    #[error("rate limited: {message}")]
    RateLimit {
        retry_after_secs: Option<u64>,
        message: String,
    },
    /// The service answered, but not with usable text.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl EnhanceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

/// A service that can rewrite rule-based output.
pub trait Enhancer {
    fn enhance(&self, request: &EnhanceRequest<'_>) -> Result<String, EnhanceError>;
}

impl<F> Enhancer for F
where
    F: Fn(&EnhanceRequest<'_>) -> Result<String, EnhanceError>,
{
    fn enhance(&self, request: &EnhanceRequest<'_>) -> Result<String, EnhanceError> {
        self(request)
    }
}
