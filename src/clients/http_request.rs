//! HTTP request types for the GitHub API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. The
//! resource layer only ever reads, so every request is a `GET`; what varies is
//! whether the target is relative to the configured base URL or an absolute
//! URL taken from a hypermedia link.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Where a request is sent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestTarget {
    /// A path resolved against the client's base URL (e.g. `users/octocat`).
    Relative(String),
    /// A complete URL, typically taken from a `Link` header or an `*_url` field.
    Absolute(String),
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(path) => write!(f, "{path}"),
            Self::Absolute(url) => write!(f, "{url}"),
        }
    }
}

/// A `GET` request to be sent to the API.
///
/// Use [`HttpRequest::relative`] or [`HttpRequest::absolute`] to construct
/// requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use github_api::clients::HttpRequest;
///
/// let request = HttpRequest::relative("users/octocat/repos")
///     .query_param("per_page", "100")
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.tries, 3);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The request target.
    pub target: RequestTarget,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a builder for a request relative to the base URL.
    #[must_use]
    pub fn relative(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(RequestTarget::Relative(path.into()))
    }

    /// Creates a builder for a request to an absolute URL.
    #[must_use]
    pub fn absolute(url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(RequestTarget::Absolute(url.into()))
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `tries` is zero
    /// - an absolute target is not a parseable `http`/`https` URL
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.tries == 0 {
            return Err(InvalidHttpRequestError::ZeroTries);
        }

        if let RequestTarget::Absolute(url) = &self.target {
            let valid = url::Url::parse(url)
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host());
            if !valid {
                return Err(InvalidHttpRequestError::InvalidUrl { url: url.clone() });
            }
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    target: RequestTarget,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
    tries: u32,
}

impl HttpRequestBuilder {
    const fn new(target: RequestTarget) -> Self {
        Self {
            target,
            query: None,
            extra_headers: None,
            tries: 1,
        }
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries). Set to a higher value to enable
    /// automatic retries for 429 and 500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            target: self.target,
            query: self.query,
            extra_headers: self.extra_headers,
            tries: self.tries,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_relative_request() {
        let request = HttpRequest::relative("users/octocat").build().unwrap();

        assert_eq!(
            request.target,
            RequestTarget::Relative("users/octocat".to_string())
        );
        assert!(request.query.is_none());
        assert_eq!(request.tries, 1);
    }

    #[test]
    fn test_builder_accepts_absolute_https_url() {
        let request = HttpRequest::absolute("https://api.github.com/user/1/repos?page=2")
            .build()
            .unwrap();

        assert_eq!(
            request.target.to_string(),
            "https://api.github.com/user/1/repos?page=2"
        );
    }

    #[test]
    fn test_verify_rejects_relative_text_as_absolute() {
        let result = HttpRequest::absolute("repos/octocat/hello").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidUrl { url }) if url == "repos/octocat/hello"
        ));
    }

    #[test]
    fn test_verify_rejects_non_http_scheme() {
        let result = HttpRequest::absolute("git://github.com/octocat/Hello-World.git").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_zero_tries() {
        let result = HttpRequest::relative("users").tries(0).build();
        assert!(matches!(result, Err(InvalidHttpRequestError::ZeroTries)));
    }

    #[test]
    fn test_builder_with_query_params_and_headers() {
        let request = HttpRequest::relative("repositories")
            .query_param("since", "364")
            .header("If-None-Match", "\"etag\"")
            .build()
            .unwrap();

        let query = request.query.unwrap();
        assert_eq!(query.get("since"), Some(&"364".to_string()));
        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get("If-None-Match"), Some(&"\"etag\"".to_string()));
    }
}
