//! HTTP client types for GitHub API communication.
//!
//! This module is the transport boundary of the crate: everything that
//! touches the network, parses headers or retries lives here.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The seam the resource layer fetches through
//! - [`Fetched`]: A decoded body with its rate-limit snapshot and links
//! - [`HttpClient`]: The reqwest-backed [`Transport`]
//! - [`MockTransport`]: A [`Transport`] serving canned responses
//! - [`HttpRequest`] / [`HttpResponse`]: A single GET and its parsed response
//! - [`RateLimit`] / [`LinkSet`]: Parsed `X-RateLimit-*` and `Link` headers
//! - [`rest::RestClient`]: Entry point returning typed resources
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::GitHubConfig;
//! use github_api::clients::{HttpClient, Transport};
//!
//! let client = HttpClient::new(&GitHubConfig::default())?;
//! let fetched = client.get_relative("users/octocat").await?;
//!
//! println!("{}", fetched.body["login"]);
//! if let Some(limit) = fetched.rate_limit {
//!     println!("{} calls left until {}", limit.remaining, limit.reset_at);
//! }
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`GitHubConfig`](crate::GitHubConfig) or per request with
//! [`HttpRequestBuilder::tries`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod mock;
pub mod rest;
mod transport;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, GITHUB_MEDIA_TYPE, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder, RequestTarget};
pub use http_response::{HttpResponse, LinkSet, RateLimit};
pub use mock::MockTransport;
pub use transport::{Fetched, Transport};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
