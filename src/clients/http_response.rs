//! HTTP response types for the GitHub API client.
//!
//! This module provides the [`HttpResponse`] type together with the two pieces
//! of response metadata every fetch carries: the [`RateLimit`] snapshot parsed
//! from the `X-RateLimit-*` headers and the [`LinkSet`] parsed from the `Link`
//! header.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::clients::transport::Fetched;

/// Point-in-time API quota state, parsed from the `X-RateLimit-*` headers.
///
/// A snapshot is captured once per fetch and never mutated afterwards; newer
/// fetches produce newer snapshots that replace older ones wholesale.
///
/// # Example
///
/// ```rust
/// use github_api::clients::RateLimit;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-limit".to_string(), vec!["5000".to_string()]);
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["4999".to_string()]);
/// headers.insert("x-ratelimit-reset".to_string(), vec!["1372700873".to_string()]);
///
/// let limit = RateLimit::from_headers(&headers).unwrap();
/// assert_eq!(limit.remaining, 4999);
/// assert!(!limit.is_exhausted());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Maximum number of requests permitted in the current window.
    pub limit: u32,
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: DateTime<Utc>,
    /// Requests already made in the current window (`X-RateLimit-Used`).
    pub used: Option<u32>,
    /// The rate-limit bucket the request counted against (`X-RateLimit-Resource`).
    pub resource: Option<String>,
}

impl RateLimit {
    /// Parses a snapshot from lowercase response headers.
    ///
    /// Returns `None` unless `x-ratelimit-limit`, `x-ratelimit-remaining` and
    /// `x-ratelimit-reset` are all present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(|value| value.trim())
        };

        let limit = header("x-ratelimit-limit")?.parse().ok()?;
        let remaining = header("x-ratelimit-remaining")?.parse().ok()?;
        let reset_secs: i64 = header("x-ratelimit-reset")?.parse().ok()?;
        let reset_at = DateTime::from_timestamp(reset_secs, 0)?;

        Some(Self {
            limit,
            remaining,
            reset_at,
            used: header("x-ratelimit-used").and_then(|v| v.parse().ok()),
            resource: header("x-ratelimit-resource").map(ToString::to_string),
        })
    }

    /// Returns `true` when no requests remain in the current window.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Named hypermedia relations parsed from an RFC 8288 `Link` header.
///
/// Maps a relation name such as `next`, `prev`, `first` or `last` to the
/// absolute URL it points at.
///
/// # Example
///
/// ```rust
/// use github_api::clients::LinkSet;
///
/// let links = LinkSet::parse(
///     r#"<https://api.github.com/user/1/repos?page=2>; rel="next", <https://api.github.com/user/1/repos?page=5>; rel="last""#,
/// );
///
/// assert_eq!(links.next(), Some("https://api.github.com/user/1/repos?page=2"));
/// assert!(links.contains("last"));
/// assert!(!links.contains("prev"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkSet(HashMap<String, String>);

impl LinkSet {
    /// Creates an empty link set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Link` header value.
    ///
    /// Entries without a `rel` parameter or without an `<url>` part are
    /// skipped. A parameter such as `rel="next last"` registers the URL under
    /// both names.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        let mut links = HashMap::new();

        for entry in split_link_entries(header_value) {
            let mut parts = entry.split(';');

            let Some(target) = parts.next().map(str::trim) else {
                continue;
            };
            let Some(url) = target
                .strip_prefix('<')
                .and_then(|rest| rest.strip_suffix('>'))
            else {
                continue;
            };

            let rels = parts.find_map(|param| {
                let (key, value) = param.trim().split_once('=')?;
                (key.trim().eq_ignore_ascii_case("rel")).then(|| value.trim().trim_matches('"'))
            });

            if let Some(rels) = rels {
                for rel in rels.split_whitespace() {
                    links.insert(rel.to_string(), url.to_string());
                }
            }
        }

        Self(links)
    }

    /// Returns the URL registered for a relation.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(String::as_str)
    }

    /// Returns the URL of the `next` relation.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    /// Returns `true` if the relation is present.
    #[must_use]
    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    /// Returns `true` if no relations are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(relation, url)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for LinkSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Commas may appear inside a URL, so entries only split where the next
// segment opens a new `<...>` target.
fn split_link_entries(header_value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;

    for (idx, _) in header_value.match_indices(',') {
        if header_value[idx + 1..].trim_start().starts_with('<') {
            entries.push(header_value[start..idx].trim());
            start = idx + 1;
        }
    }
    entries.push(header_value[start..].trim());

    entries.retain(|entry| !entry.is_empty());
    entries
}

/// An HTTP response from the GitHub API.
///
/// Contains the response status code, headers and body along with the parsed
/// rate limit, link relations and retry hint.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Relations from the `Link` header.
    pub links: LinkSet,
    /// Quota state from the `X-RateLimit-*` headers.
    pub rate_limit: Option<RateLimit>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    ///
    /// This constructor parses the following headers:
    /// - `Link` -> `links`
    /// - `X-RateLimit-*` -> `rate_limit`
    /// - `Retry-After` -> `retry_request_after`
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let links = headers
            .get("link")
            .map(|values| {
                values
                    .iter()
                    .flat_map(|value| LinkSet::parse(value).0)
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit = RateLimit::from_headers(&headers);

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            links,
            rate_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-GitHub-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-github-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the response, keeping the parts the resource layer needs.
    #[must_use]
    pub fn into_fetched(self) -> Fetched {
        Fetched {
            body: self.body,
            rate_limit: self.rate_limit,
            links: self.links,
        }
    }
}
