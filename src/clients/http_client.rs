//! HTTP client for GitHub API communication.
//!
//! This module provides the [`HttpClient`] type, the production
//! [`Transport`] implementation, with automatic retry handling.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpRequest, RequestTarget};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{Fetched, Transport};
use crate::config::GitHubConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media type requested for every call.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// HTTP client for making requests to the GitHub API.
///
/// The client handles:
/// - Resolving relative paths against the configured base URL
/// - Default headers including `Accept`, `User-Agent` and the API token
/// - Automatic retry logic for 429 and 500 responses
/// - Rate-limit and `Link` header parsing
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::GitHubConfig;
/// use github_api::clients::{HttpClient, HttpRequest};
///
/// let client = HttpClient::new(&GitHubConfig::default())?;
///
/// let request = HttpRequest::relative("users/octocat").build()?;
/// let response = client.request(request).await?;
/// println!("{}", response.body["login"]);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL relative paths are joined to (no trailing slash).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Attempts per request for 429 and 500 responses.
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g. TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_api::GitHubConfig;
    /// use github_api::clients::HttpClient;
    ///
    /// let client = HttpClient::new(&GitHubConfig::default()).unwrap();
    /// assert_eq!(client.base_url(), "https://api.github.com");
    /// ```
    pub fn new(config: &GitHubConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}GitHub API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), GITHUB_MEDIA_TYPE.to_string());

        if let Some(token) = config.api_token() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("token {}", token.as_ref()),
            );
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            default_headers,
            tries: config.tries(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the number of attempts made for retryable failures.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the URL a request target resolves to.
    #[must_use]
    pub fn url_for(&self, target: &RequestTarget) -> String {
        match target {
            RequestTarget::Relative(path) => {
                format!("{}/{}", self.base_url, path.trim_start_matches('/'))
            }
            RequestTarget::Absolute(url) => url.clone(),
        }
    }

    /// Sends an HTTP request to the GitHub API.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging
    /// - Response parsing
    /// - Retry logic for 429 and 500 responses
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    /// - A 2xx body is not valid JSON (`InvalidJson`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.target);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(url = %url, attempt = tries, "Sending GitHub API request");

            let mut req_builder = self.client.get(&url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let ok = (200..=299).contains(&code);
            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                match serde_json::from_str(&body_text) {
                    Ok(body) => body,
                    Err(e) if ok => {
                        return Err(HttpError::InvalidJson {
                            url,
                            message: e.to_string(),
                        });
                    }
                    Err(_) => serde_json::json!({ "raw_body": body_text }),
                }
            };

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(limit) = response.rate_limit.as_ref().filter(|l| l.is_exhausted()) {
                tracing::warn!(
                    url = %url,
                    reset_at = %limit.reset_at,
                    "GitHub API rate limit exhausted"
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference: response.request_id().map(String::from),
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                url = %url,
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying GitHub API request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn fetch(&self, target: RequestTarget) -> Result<Fetched, HttpError> {
        let request = HttpRequest {
            target,
            query: None,
            extra_headers: None,
            tries: self.tries,
        };
        let response = self.request(request).await?;
        Ok(response.into_fetched())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // 429 honours Retry-After; 500 always waits the fixed delay
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| std::time::Duration::try_from_secs_f64(secs).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes the error fields GitHub returns into a compact JSON string.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["message", "errors", "documentation_url", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get_relative(&self, path: &str) -> Result<Fetched, HttpError> {
        self.fetch(RequestTarget::Relative(path.to_string())).await
    }

    async fn get_absolute(&self, url: &str) -> Result<Fetched, HttpError> {
        self.fetch(RequestTarget::Absolute(url.to_string())).await
    }
}
