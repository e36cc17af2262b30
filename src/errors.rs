/*!
 * Error types for the lingobot application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and its message to the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Whether the error was reported by the remote API rather than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::AuthenticationError(_) | Self::RateLimitExceeded(_)
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError(error.to_string())
        } else if error.is_timeout() || error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Nothing to translate
    #[error("Text to translate is empty")]
    EmptyText,

    /// Text exceeds what the provider accepts in one request
    #[error("Text is too long to translate: {length} characters (limit {limit})")]
    TextTooLong {
        /// Length of the rejected text in characters
        length: usize,
        /// Configured character limit
        limit: usize,
    },
}

/// Errors that can occur while decoding a synonym action token
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionTokenError {
    #[error("Action token does not start with the synonym prefix")]
    MissingPrefix,

    #[error("Unknown language code in action token: {0}")]
    UnknownLanguage(String),

    #[error("Action token carries no word")]
    MissingWord,

    #[error("Invalid word in action token: {0}")]
    InvalidWord(String),

    #[error("Action token is {0} bytes, above the callback data limit")]
    TooLong(usize),
}
