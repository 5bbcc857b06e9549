//! The transport boundary between the resource layer and the network.
//!
//! The resource layer never talks to `reqwest` directly. It asks a
//! [`Transport`] for a URL and gets back a [`Fetched`] triple of decoded body,
//! rate-limit snapshot and link relations. [`HttpClient`](crate::clients::HttpClient)
//! is the production implementation; [`MockTransport`](crate::clients::MockTransport)
//! serves canned responses for tests.

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_response::{LinkSet, RateLimit};

/// The outcome of a successful fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched {
    /// The decoded JSON body (`{}` when the response had no body).
    pub body: serde_json::Value,
    /// Quota state reported with the response, if any.
    pub rate_limit: Option<RateLimit>,
    /// Link relations reported with the response.
    pub links: LinkSet,
}

impl Fetched {
    /// Creates a result with no rate limit and no links.
    #[must_use]
    pub fn new(body: serde_json::Value) -> Self {
        Self {
            body,
            rate_limit: None,
            links: LinkSet::default(),
        }
    }

    /// Attaches a rate-limit snapshot.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Attaches link relations.
    #[must_use]
    pub fn with_links(mut self, links: LinkSet) -> Self {
        self.links = links;
        self
    }
}

/// Trait for transports that can fetch JSON documents.
///
/// Implementations own retries, authentication and header parsing. Callers
/// treat every [`HttpError`] as opaque and propagate it unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches a path relative to the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status or a body that
    /// is not valid JSON.
    async fn get_relative(&self, path: &str) -> Result<Fetched, HttpError>;

    /// Fetches an absolute URL, typically one taken from a `Link` header or an
    /// embedded `*_url` field.
    ///
    /// # Errors
    ///
    /// Same as [`Transport::get_relative`], plus
    /// [`InvalidHttpRequestError::InvalidUrl`](crate::clients::InvalidHttpRequestError::InvalidUrl)
    /// for URLs that are not absolute `http(s)` URLs.
    async fn get_absolute(&self, url: &str) -> Result<Fetched, HttpError>;
}
