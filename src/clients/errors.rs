//! HTTP-specific error types for the GitHub API client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, request validation failures and undecodable
//! bodies. Together they form the opaque transport failure that the resource
//! layer propagates unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::{HttpError, Transport};
//!
//! match transport.get_relative("users/octocat").await {
//!     Ok(fetched) => println!("Body: {}", fetched.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Retries exhausted after {} tries", e.tries),
//!     Err(e) => println!("Transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message field carries a compact JSON rendering of the `message`,
/// `errors` and `documentation_url` fields GitHub returns with failures.
///
/// # Example
///
/// ```rust
/// use github_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"message":"Not Found"}"#.to_string(),
///     error_reference: Some("C0DE:1234".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"message":"Not Found"}"#);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from the `X-GitHub-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting.
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// An absolute URL could not be parsed or does not use http(s).
    #[error("Invalid absolute URL '{url}'.")]
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
    },

    /// A request was configured with zero attempts.
    #[error("A request needs at least one try.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful response carried a body that is not valid JSON.
    #[error("Malformed JSON response from {url}: {message}")]
    InvalidJson {
        /// The URL that produced the body.
        url: String,
        /// The decoder's description of the problem.
        message: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code carried by the error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }
}
