//! REST-specific error types.
//!
//! - [`RestError::InvalidPath`]: When a relative path is empty after normalization
//! - [`RestError::Http`]: Wraps underlying transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::{RestClient, RestError};
//!
//! match client.fetch_relative("users/octocat").await {
//!     Ok(fetched) => println!("Login: {}", fetched.body["login"]),
//!     Err(RestError::InvalidPath { path }) => println!("Invalid path: {path}"),
//!     Err(RestError::Http(e)) => println!("HTTP error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for raw REST fetches.
///
/// # Example
///
/// ```rust
/// use github_api::clients::RestError;
///
/// let error = RestError::InvalidPath { path: "/".to_string() };
/// assert_eq!(error.to_string(), "Invalid REST API path: /");
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The relative path is empty once leading slashes are stripped.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The path as provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}
