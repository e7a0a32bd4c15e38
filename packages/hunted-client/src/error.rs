//! We Are Hunted API error types

use std::fmt;

use thiserror::Error;
use wearehunted_shared_config::ConfigError;

/// Maximum body excerpt kept on an API error
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Error statuses documented by the We Are Hunted API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 429
    RateLimitExceeded,
    /// 500, a server-side bug the API asks to be told about
    InformUpstream,
    /// 502 and 503
    Unavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "not found",
            Self::RateLimitExceeded => "rate limit exceeded",
            Self::InformUpstream => {
                "We Are Hunted had an internal error, please let them know"
            }
            Self::Unavailable => "service unavailable",
        };
        f.write_str(name)
    }
}

/// What the API sent back alongside an error status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDetails {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status
    pub message: String,
    /// Response body, truncated
    pub body: String,
}

impl ResponseDetails {
    pub fn new(status: u16, message: impl Into<String>, body: String) -> Self {
        Self {
            status,
            message: message.into(),
            body: truncate_error_body(body),
        }
    }
}

/// Truncate error body to prevent memory exhaustion
/// Safely handles UTF-8 boundaries to avoid panics on multi-byte characters
fn truncate_error_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_SIZE {
        return body;
    }

    let truncate_at = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
        .last()
        .unwrap_or(0);

    format!("{}... (truncated)", &body[..truncate_at])
}

/// We Are Hunted client errors
#[derive(Error, Debug)]
pub enum HuntedError {
    /// The API answered with one of its documented error statuses
    #[error("{kind} ({}): {}", .details.status, .details.message)]
    Api {
        kind: ApiErrorKind,
        details: ResponseDetails,
    },

    /// Invalid input provided to API method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON parsing failed
    #[error("Failed to parse We Are Hunted response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed JSON that lacks the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Lookup returned a different number of artists than were asked for
    #[error("Artist lookup returned {actual} results for {expected} names")]
    PairingMismatch { expected: usize, actual: usize },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request to We Are Hunted timed out")]
    Timeout,

    /// Client configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HuntedError {
    /// The API error kind, if this error came from an HTTP status
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            HuntedError::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The response payload, if this error came from an HTTP status
    pub fn details(&self) -> Option<&ResponseDetails> {
        match self {
            HuntedError::Api { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(self, HuntedError::InvalidArgument(_) | HuntedError::Config(_))
    }
}

/// Result type for We Are Hunted operations
pub type HuntedResult<T> = Result<T, HuntedError>;
