//! Commit resource.
//!
//! The top-level `author` and `committer` of a commit document are GitHub
//! accounts and may be `null` when the git identity matches no account. The
//! git-level identities live under `commit.author` / `commit.committer` and
//! are exposed raw through [`Commit::commit`].

use crate::rest::resources::{User, USER_KIND};
use crate::rest::{Collection, Resource, ResourceError, ResourceKind};

static COMMIT_KEY_MAPPINGS: [(&str, &ResourceKind); 2] =
    [("author", &USER_KIND), ("committer", &USER_KIND)];

/// Capability table for [`Commit`].
pub static COMMIT_KIND: ResourceKind = ResourceKind {
    name: "Commit",
    url: None,
    default_urls: &[],
    key_mappings: &COMMIT_KEY_MAPPINGS,
};

github_resource! {
    /// A commit as listed by the repository commits endpoint.
    Commit => COMMIT_KIND
}

impl Commit {
    field_accessors! {
        sha: &str;
        html_url: &str;
        commit: serde_json::Value;
        author: Option<nested User>;
        committer: Option<nested User>;
        parents: Vec<serde_json::Value>;
    }

    /// Returns the commit message.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the document carries no git
    /// commit message.
    pub fn message(&self) -> Result<String, ResourceError> {
        self.0.format_template("{commit[message]}")
    }

    /// Lists comments on this commit through the embedded `comments_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRelation`] if the document has no
    /// `comments_url`, plus transport and shape errors.
    pub async fn get_comments(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("comments_url", &[]).await
    }
}
