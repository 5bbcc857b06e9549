//! Issue resource.
//!
//! Issue documents returned by the repository endpoints embed their relation
//! URLs. The default templates below are only used for trimmed documents that
//! carry a nested `repository` instead.

use chrono::{DateTime, Utc};

use crate::rest::resources::{Repo, User, REPO_KIND, USER_KIND};
use crate::rest::{Collection, Resource, ResourceError, ResourceKind};

static ISSUE_KEY_MAPPINGS: [(&str, &ResourceKind); 4] = [
    ("user", &USER_KIND),
    ("assignee", &USER_KIND),
    ("closed_by", &USER_KIND),
    ("repository", &REPO_KIND),
];

/// Capability table for [`Issue`].
pub static ISSUE_KIND: ResourceKind = ResourceKind {
    name: "Issue",
    url: Some("repos/{repository[owner][login]}/{repository[name]}/issues/{number}"),
    default_urls: &[
        (
            "comments_url",
            "repos/{repository[owner][login]}/{repository[name]}/issues/{number}/comments",
        ),
        (
            "events_url",
            "repos/{repository[owner][login]}/{repository[name]}/issues/{number}/events",
        ),
        (
            "labels_url",
            "repos/{repository[owner][login]}/{repository[name]}/issues/{number}/labels{{/name}}",
        ),
    ],
    key_mappings: &ISSUE_KEY_MAPPINGS,
};

github_resource! {
    /// An issue or pull request.
    Issue => ISSUE_KIND
}

impl Issue {
    field_accessors! {
        id: u64;
        number: u64;
        title: &str;
        body: Option<String>;
        state: &str;
        locked: bool;
        user: nested User;
        assignee: Option<nested User>;
        closed_by: Option<nested User>;
        repository: nested Repo;
        labels: Vec<serde_json::Value>;
        comments: u64;
        html_url: &str;
        created_at: timestamp;
        updated_at: timestamp;
        closed_at: Option<DateTime<Utc>>;
    }

    /// Returns `true` if this issue is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.0.contains("pull_request")
    }

    /// Lists comments on this issue.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_comments(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("comments_url", &[]).await
    }

    /// Lists the timeline events of this issue.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_events(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("events_url", &[]).await
    }

    /// Lists the labels on this issue.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_labels(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("labels_url", &[]).await
    }
}
