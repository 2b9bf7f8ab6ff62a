//! Error handling for the Atelier client

use std::fmt;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the Atelier client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport errors from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any non-2xx response; the payload is the raw response text.
    /// Callers must not assume a structured error body.
    #[error("request failed: {0}")]
    Request(String),

    /// Login or registration failures. Deliberately coarse: bad credentials,
    /// network errors, and server errors all land here, with the underlying
    /// text carried in the message only.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Client-side validation failures, raised before any network call
    #[error("validation failed: {0}")]
    Validation(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new request error from a raw response body
    pub fn request<T: fmt::Display>(msg: T) -> Self {
        Error::Request(msg.to_string())
    }

    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }
}
