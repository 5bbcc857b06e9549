//! The hypermedia resource layer.
//!
//! This module turns transport results into resources that know how to follow
//! their own links:
//!
//! - **[`Resource`]**: A JSON document with coerced fields (`*_at` timestamps,
//!   nested resources) and operations to fetch related resources and collections
//! - **[`ResourceKind`]**: The static capability table (canonical URL, default
//!   relation URLs, nested field kinds) that gives a resource its type
//! - **[`Collection`]**: A paginated sequence that fetches further pages through
//!   the `next` relation, eagerly or on demand
//! - **[`template`]**: The two URL expansion passes
//! - **[`ResourceError`]**: Error type for all of the above
//!
//! # Two-stage URL expansion
//!
//! Related URLs are built in two passes. The first substitutes the resource's
//! own fields into a default template and turns `{{`/`}}` into literal braces;
//! the second is RFC 6570 expansion with caller-supplied arguments:
//!
//! ```text
//! repos/{owner[login]}/{name}/branches{{/branch}}
//!   -> repos/octocat/Hello-World/branches{/branch}      (document fields)
//!   -> repos/octocat/Hello-World/branches/main          (branch = "main")
//! ```
//!
//! When the document embeds the relation itself (e.g. `branches_url`), the
//! embedded template skips the first pass and is fetched as an absolute URL.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::{GitHubConfig, RestClient};
//!
//! let client = RestClient::new(&GitHubConfig::default())?;
//! let user = client.get_user("octocat").await?;
//!
//! for repo in user.get_repos().await?.materialize_all().await? {
//!     println!("{} ({} stars)", repo.full_name()?, repo.stargazers_count()?);
//! }
//! ```

mod collection;
mod errors;
mod resource;
pub mod resources;
pub mod template;

pub use collection::{Collection, CollectionIter, CollectionState, Page};
pub use errors::ResourceError;
pub use resource::{
    parse_timestamp, Document, Field, RelatedUrl, Resource, ResourceKind, ResourceType,
    GENERIC_KIND, TIMESTAMP_SUFFIX,
};
