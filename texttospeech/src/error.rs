//! Error types for the Text to Speech API client.

use thiserror::Error;

/// Result type alias for Text to Speech operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Text to Speech API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by the service.
    #[error("texttospeech: {message} (status={status}, transaction={transaction_id})")]
    Api {
        status: u16,
        message: String,
        code_description: String,
        transaction_id: String,
    },

    /// A required request field is missing or empty.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Authentication failed or the authenticator is misconfigured.
    #[error("authentication error: {0}")]
    Auth(String),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service URL could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
            code_description: String::new(),
            transaction_id: String::new(),
        }
    }

    /// Creates a validation error for a missing required field.
    pub(crate) fn required(field: &str) -> Self {
        Error::Validation(format!("{} must be non-empty", field))
    }

    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the credentials were rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.status() == Some(429)
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if s >= 500)
    }

    /// Returns true if the request can be retried.
    ///
    /// 501 Not Implemented is never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) if e.is_connect() || e.is_timeout() => true,
            _ => {
                self.is_rate_limit() || (self.is_server_error() && self.status() != Some(501))
            }
        }
    }
}
