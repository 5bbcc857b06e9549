//! # GitHub API Rust Client
//!
//! A hypermedia-driven client for the GitHub REST API. Resources know how to
//! follow their own links, and paginated collections fetch further pages only
//! as they are consumed.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`GitHubConfig`] and [`GitHubConfigBuilder`]
//! - An async, retrying HTTP transport with rate-limit and `Link` header parsing
//! - JSON-backed resources with `*_at` timestamp coercion and typed nested resources
//! - Two-stage URL template expansion for relations embedded in or missing from a document
//! - Paginated collections with eager, lazy and `Stream` consumption and an optional cap
//!
//! ## Quick Start
//!
//! ```rust
//! use github_api::{ApiToken, GitHubConfig, RestClient};
//!
//! let config = GitHubConfig::builder()
//!     .api_token(ApiToken::new("ghp_your_token").unwrap())
//!     .max_items(100)
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::new(&config).unwrap();
//! assert_eq!(client.max_items(), Some(100));
//! ```
//!
//! ## Following Links
//!
//! ```rust,ignore
//! use github_api::{GitHubConfig, RestClient};
//!
//! let client = RestClient::new(&GitHubConfig::default())?;
//! let repo = client.get_repo("octocat", "Hello-World").await?;
//!
//! // Embedded `branches_url` if present, otherwise built from owner and name
//! let branch = repo.get_branch("main").await?;
//! println!("{} -> {}", branch.name()?, branch.commit()?.sha()?);
//!
//! // Rate-limit state of the fetch that produced a resource
//! if let Some(limit) = branch.rate_limit() {
//!     println!("{} of {} calls left", limit.remaining, limit.limit);
//! }
//! ```
//!
//! ## Paginating
//!
//! ```rust,ignore
//! let mut stargazers = repo.get_stargazers().await?;
//! let mut iter = stargazers.iter();
//! while let Some(user) = iter.next().await {
//!     println!("{}", user?.login()?);
//! }
//! ```
//!
//! ## Testing Without a Network
//!
//! ```rust
//! use github_api::clients::{Fetched, MockTransport};
//! use github_api::RestClient;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let mock = MockTransport::new();
//! mock.on_relative("users/octocat", Fetched::new(json!({"login": "octocat", "id": 1})));
//!
//! let client = RestClient::with_transport(Arc::new(mock), None);
//! let user = client.get_user("octocat").await.unwrap();
//! assert_eq!(user.login().unwrap(), "octocat");
//! # });
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors, not panics**: Missing fields and relations are typed errors

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiToken, BaseUrl, GitHubConfig, GitHubConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Fetched, HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, LinkSet, MaxHttpRetriesExceededError,
    MockTransport, RateLimit, RestClient, RestError, Transport,
};

// Re-export the resource layer
pub use rest::resources::{
    AuthenticatedUser, Branch, Commit, Event, Issue, Organization, Repo, User,
};
pub use rest::{Collection, Field, Resource, ResourceError, ResourceKind, ResourceType};
