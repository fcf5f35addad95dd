//! Error types for the Dynamic Zones client library
//!
//! [`Error`] covers everything that can go wrong while talking to the remote
//! API or preparing data for it. [`NameError`] is the narrower reason type
//! returned by the `check_*` validators.

use thiserror::Error;

/// Result type alias for Dynamic Zones operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the Dynamic Zones client library
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP errors (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// The API answered with a body that does not match the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone, record, token or rule not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input (rejected before anything is sent)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A name failed validation
    #[error(transparent)]
    Name(#[from] NameError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an API status error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Reason a zone pattern, DNS name or user filter was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Input was empty or whitespace only
    #[error("name cannot be empty")]
    Empty,

    /// Input exceeds 253 characters
    #[error("name too long: {0} chars (max 253)")]
    TooLong(usize),

    /// Fewer than two dot-separated labels
    #[error("name needs at least two labels, got {0}")]
    TooFewLabels(usize),

    /// A label is empty or longer than 63 characters
    #[error("label '{0}' must be 1-63 characters")]
    LabelLength(String),

    /// A label contains something other than letters, digits and hyphens
    #[error("label '{0}' contains invalid characters (allowed: A-Z, a-z, 0-9, '-')")]
    InvalidCharacter(String),

    /// A label starts or ends with a hyphen
    #[error("label '{0}' cannot start or end with a hyphen")]
    HyphenAtBoundary(String),

    /// User filter is neither `user@domain` nor `*suffix@domain`
    #[error("'{0}' is not a valid user filter (expected '*@example.com' or 'alice@example.com')")]
    UserFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::api(409, "zone exists").to_string(),
            "API error (409): zone exists"
        );
        assert_eq!(
            Error::from(NameError::TooFewLabels(1)).to_string(),
            "name needs at least two labels, got 1"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: Error = anyhow::anyhow!("token store unavailable").into();
        assert!(matches!(err, Error::Other(msg) if msg == "token store unavailable"));
    }
}
