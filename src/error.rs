//! Error types for the GitHub API client.
//!
//! This module contains error types used for configuration and validation
//! errors. Errors raised while fetching or interpreting resources live in
//! [`crate::rest::ResourceError`] and [`crate::clients::HttpError`].
//!
//! # Example
//!
//! ```rust
//! use github_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Omit the token for anonymous access or provide a valid one.")]
    EmptyApiToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://api.github.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The collection cap must be positive.
    #[error("Invalid max_items: the collection cap must be at least 1.")]
    InvalidMaxItems,

    /// The number of transport attempts must be positive.
    #[error("Invalid tries '{tries}'. At least one attempt is required.")]
    InvalidTries {
        /// The invalid attempt count that was provided.
        tries: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_token_error_message() {
        let message = ConfigError::EmptyApiToken.to_string();
        assert!(message.contains("API token cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp://nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://nope"));
        assert!(message.contains("absolute http(s) URL"));
    }

    #[test]
    fn test_invalid_tries_error_message() {
        let message = ConfigError::InvalidTries { tries: 0 }.to_string();
        assert!(message.contains("'0'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidMaxItems;
        let _: &dyn std::error::Error = &error;
    }
}
