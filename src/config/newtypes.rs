//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated GitHub API token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiToken(*****)` instead of the actual token.
///
/// # Example
///
/// ```rust
/// use github_api::ApiToken;
///
/// let token = ApiToken::new("ghp_secret").unwrap();
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated API base URL.
///
/// Relative fetches are resolved against this URL. It must be an absolute
/// `http` or `https` URL; a trailing slash is removed on construction.
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from the normalized URL string:
///
/// ```rust
/// use github_api::BaseUrl;
///
/// let url = BaseUrl::new("https://ghe.example.com/api/v3/").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://ghe.example.com/api/v3""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The public GitHub API endpoint.
    pub const GITHUB: &'static str = "https://api.github.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed,
    /// has no host, or uses a scheme other than `http`/`https`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let parsed = url::Url::parse(trimmed)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<String> {
        url::Url::parse(&self.0)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::GITHUB.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
