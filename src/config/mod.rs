//! Configuration types for the GitHub API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GitHubConfig`]: The main configuration struct holding all client settings
//! - [`GitHubConfigBuilder`]: A builder for constructing [`GitHubConfig`] instances
//! - [`ApiToken`]: A validated API token newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use github_api::{GitHubConfig, ApiToken};
//!
//! let config = GitHubConfig::builder()
//!     .api_token(ApiToken::new("ghp_example").unwrap())
//!     .max_items(100)
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiToken, BaseUrl};

use crate::error::ConfigError;

/// Configuration for the GitHub API client.
///
/// # Thread Safety
///
/// `GitHubConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use github_api::{GitHubConfig, BaseUrl};
///
/// let config = GitHubConfig::builder()
///     .base_url(BaseUrl::new("https://ghe.example.com/api/v3").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(config.api_token().is_none());
/// assert_eq!(config.base_url().as_ref(), "https://ghe.example.com/api/v3");
/// ```
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    api_token: Option<ApiToken>,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    max_items: Option<usize>,
    tries: u32,
}

impl GitHubConfig {
    /// Creates a new builder for constructing a `GitHubConfig`.
    #[must_use]
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::new()
    }

    /// Returns the API token, if configured.
    #[must_use]
    pub const fn api_token(&self) -> Option<&ApiToken> {
        self.api_token.as_ref()
    }

    /// Returns the base URL relative fetches are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the element cap applied to collections, if any.
    ///
    /// Collections stop fetching further pages once they hold at least this
    /// many elements.
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Returns the number of attempts made for requests that fail with
    /// 429 or 500.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: BaseUrl::default(),
            user_agent_prefix: None,
            max_items: None,
            tries: 1,
        }
    }
}

// Verify GitHubConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GitHubConfig>();
};

/// Builder for constructing [`GitHubConfig`] instances.
///
/// # Defaults
///
/// - `api_token`: `None` (anonymous access)
/// - `base_url`: `https://api.github.com`
/// - `user_agent_prefix`: `None`
/// - `max_items`: `None` (collections are unbounded)
/// - `tries`: `1` (no automatic retries)
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    api_token: Option<ApiToken>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    max_items: Option<usize>,
    tries: Option<u32>,
}

impl GitHubConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token sent with every request.
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the base URL (for GitHub Enterprise or test servers).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the element cap applied to collections.
    #[must_use]
    pub const fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Sets the number of attempts for requests failing with 429 or 500.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`GitHubConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxItems`] if `max_items` is zero and
    /// [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<GitHubConfig, ConfigError> {
        if self.max_items == Some(0) {
            return Err(ConfigError::InvalidMaxItems);
        }

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(GitHubConfig {
            api_token: self.api_token,
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            max_items: self.max_items,
            tries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = GitHubConfig::builder().build().unwrap();

        assert!(config.api_token().is_none());
        assert_eq!(config.base_url().as_ref(), "https://api.github.com");
        assert!(config.user_agent_prefix().is_none());
        assert!(config.max_items().is_none());
        assert_eq!(config.tries(), 1);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = GitHubConfig::builder()
            .api_token(ApiToken::new("ghp_token").unwrap())
            .base_url(BaseUrl::new("http://localhost:9000").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .max_items(250)
            .tries(3)
            .build()
            .unwrap();

        assert_eq!(config.api_token().unwrap().as_ref(), "ghp_token");
        assert_eq!(config.base_url().as_ref(), "http://localhost:9000");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.max_items(), Some(250));
        assert_eq!(config.tries(), 3);
    }

    #[test]
    fn test_builder_rejects_zero_max_items() {
        let result = GitHubConfig::builder().max_items(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidMaxItems)));
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = GitHubConfig::builder().tries(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidTries { tries: 0 })));
    }

    #[test]
    fn test_default_matches_empty_builder() {
        let config = GitHubConfig::default();
        let built = GitHubConfig::builder().build().unwrap();
        assert_eq!(config.base_url(), built.base_url());
        assert_eq!(config.tries(), built.tries());
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = GitHubConfig::builder()
            .api_token(ApiToken::new("ghp_hidden").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("GitHubConfig"));
        assert!(!debug_str.contains("ghp_hidden"));
    }
}
