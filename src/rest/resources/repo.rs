//! Repository resource.
//!
//! [`Repo`] has the largest default-URL table of all kinds: every relation
//! the API may embed (`branches_url`, `issues_url`, ...) can also be built
//! from `owner.login` and `name` when the document does not carry it, which
//! is the case for the trimmed repository documents nested in events and
//! search results.
//!
//! # Example
//!
//! ```rust,ignore
//! let repo = client.get_repo("octocat", "Hello-World").await?;
//!
//! let main = repo.get_branch("main").await?;
//! let head = main.commit()?;
//! println!("main is at {}", head.sha()?);
//!
//! let forks = repo.get_forks().await?.materialize_all().await?;
//! println!("{} forks", forks.len());
//! ```

use chrono::{DateTime, Utc};

use crate::rest::resources::{
    Branch, Commit, Event, Issue, Organization, User, ORGANIZATION_KIND, USER_KIND,
};
use crate::rest::{Collection, Resource, ResourceError, ResourceKind};

static REPO_KEY_MAPPINGS: [(&str, &ResourceKind); 4] = [
    ("owner", &USER_KIND),
    ("organization", &ORGANIZATION_KIND),
    ("parent", &REPO_KIND),
    ("source", &REPO_KIND),
];

/// Capability table for [`Repo`].
pub static REPO_KIND: ResourceKind = ResourceKind {
    name: "Repo",
    url: Some("repos/{owner[login]}/{name}"),
    default_urls: &[
        ("archive_url", "repos/{owner[login]}/{name}/{{archive_format}}{{/ref}}"),
        ("assignees_url", "repos/{owner[login]}/{name}/assignees{{/user}}"),
        ("blobs_url", "repos/{owner[login]}/{name}/git/blobs{{/sha}}"),
        ("branches_url", "repos/{owner[login]}/{name}/branches{{/branch}}"),
        ("collaborators_url", "repos/{owner[login]}/{name}/collaborators{{/collaborator}}"),
        ("comments_url", "repos/{owner[login]}/{name}/comments{{/number}}"),
        ("commits_url", "repos/{owner[login]}/{name}/commits{{/sha}}"),
        ("compare_url", "repos/{owner[login]}/{name}/compare/{{base}}...{{head}}"),
        ("contents_url", "repos/{owner[login]}/{name}/contents/{{+path}}"),
        ("contributors_url", "repos/{owner[login]}/{name}/contributors"),
        ("deployments_url", "repos/{owner[login]}/{name}/deployments"),
        ("downloads_url", "repos/{owner[login]}/{name}/downloads"),
        ("events_url", "repos/{owner[login]}/{name}/events"),
        ("forks_url", "repos/{owner[login]}/{name}/forks"),
        ("git_commits_url", "repos/{owner[login]}/{name}/git/commits{{/sha}}"),
        ("git_refs_url", "repos/{owner[login]}/{name}/git/refs{{/sha}}"),
        ("git_tags_url", "repos/{owner[login]}/{name}/git/tags{{/sha}}"),
        ("hooks_url", "repos/{owner[login]}/{name}/hooks"),
        ("issue_comment_url", "repos/{owner[login]}/{name}/issues/comments{{/number}}"),
        ("issue_events_url", "repos/{owner[login]}/{name}/issues/events{{/number}}"),
        ("issues_url", "repos/{owner[login]}/{name}/issues{{/number}}"),
        ("keys_url", "repos/{owner[login]}/{name}/keys{{/key_id}}"),
        ("labels_url", "repos/{owner[login]}/{name}/labels{{/name}}"),
        ("languages_url", "repos/{owner[login]}/{name}/languages"),
        ("merges_url", "repos/{owner[login]}/{name}/merges"),
        ("milestones_url", "repos/{owner[login]}/{name}/milestones{{/number}}"),
        (
            "notifications_url",
            "repos/{owner[login]}/{name}/notifications{{?since, all, participating}}",
        ),
        ("pulls_url", "repos/{owner[login]}/{name}/pulls{{/number}}"),
        ("releases_url", "repos/{owner[login]}/{name}/releases{{/id}}"),
        ("stargazers_url", "repos/{owner[login]}/{name}/stargazers"),
        ("statuses_url", "repos/{owner[login]}/{name}/statuses/{{sha}}"),
        ("subscribers_url", "repos/{owner[login]}/{name}/subscribers"),
        ("subscription_url", "repos/{owner[login]}/{name}/subscription"),
        ("tags_url", "repos/{owner[login]}/{name}/tags"),
        ("teams_url", "repos/{owner[login]}/{name}/teams"),
        ("trees_url", "repos/{owner[login]}/{name}/git/trees{{/sha}}"),
    ],
    key_mappings: &REPO_KEY_MAPPINGS,
};

github_resource! {
    /// A GitHub repository.
    Repo => REPO_KIND
}

impl Repo {
    field_accessors! {
        id: u64;
        owner: nested User;
        organization: Option<nested Organization>;
        parent: nested Repo;
        source: nested Repo;
        name: &str;
        full_name: &str;
        description: Option<String>;
        private: bool;
        fork: bool;
        html_url: &str;
        clone_url: &str;
        git_url: &str;
        ssh_url: &str;
        mirror_url: Option<String>;
        svn_url: &str;
        homepage: Option<String>;
        language: Option<String>;
        forks_count: u64;
        stargazers_count: u64;
        watchers_count: u64;
        size: u64;
        default_branch: &str;
        open_issues_count: u64;
        has_issues: bool;
        has_wiki: bool;
        has_pages: bool;
        has_downloads: bool;
        archived: bool;
        topics: Vec<String>;
        pushed_at: Option<DateTime<Utc>>;
        created_at: timestamp;
        updated_at: timestamp;
        permissions: serde_json::Value;
    }

    /// Lists the users issues can be assigned to.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_assignees(&self) -> Result<Collection<User>, ResourceError> {
        self.0.fetch_related_collection("assignees_url", &[]).await
    }

    /// Lists git blobs.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_blobs(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("blobs_url", &[]).await
    }

    /// Lists branches.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_branches(&self) -> Result<Collection<Branch>, ResourceError> {
        self.0.fetch_related_collection("branches_url", &[]).await
    }

    /// Fetches a single branch by name.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_branch(&self, branch: &str) -> Result<Branch, ResourceError> {
        self.0
            .fetch_related_resource("branches_url", &[("branch", branch)])
            .await
    }

    /// Lists collaborators.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_collaborators(&self) -> Result<Collection<User>, ResourceError> {
        self.0
            .fetch_related_collection("collaborators_url", &[])
            .await
    }

    /// Lists commit comments.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_comments(&self) -> Result<Collection<Resource>, ResourceError> {
        self.0.fetch_related_collection("comments_url", &[]).await
    }

    /// Lists commits on the default branch.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_commits(&self) -> Result<Collection<Commit>, ResourceError> {
        self.0.fetch_related_collection("commits_url", &[]).await
    }

    /// Fetches a single commit by SHA or ref.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_commit(&self, sha: &str) -> Result<Commit, ResourceError> {
        self.0
            .fetch_related_resource("commits_url", &[("sha", sha)])
            .await
    }

    /// Lists contributors, by number of commits.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_contributors(&self) -> Result<Collection<User>, ResourceError> {
        self.0
            .fetch_related_collection("contributors_url", &[])
            .await
    }

    /// Lists repository events.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_events(&self) -> Result<Collection<Event>, ResourceError> {
        self.0.fetch_related_collection("events_url", &[]).await
    }

    /// Lists forks.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_forks(&self) -> Result<Collection<Repo>, ResourceError> {
        self.0.fetch_related_collection("forks_url", &[]).await
    }

    /// Lists open issues and pull requests.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_issues(&self) -> Result<Collection<Issue>, ResourceError> {
        self.0.fetch_related_collection("issues_url", &[]).await
    }

    /// Fetches a single issue by number.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_issue(&self, number: u64) -> Result<Issue, ResourceError> {
        let number = number.to_string();
        self.0
            .fetch_related_resource("issues_url", &[("number", number.as_str())])
            .await
    }

    /// Fetches the byte count per language.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_languages(&self) -> Result<Resource, ResourceError> {
        self.0.fetch_related_resource("languages_url", &[]).await
    }

    /// Lists stargazers.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_stargazers(&self) -> Result<Collection<User>, ResourceError> {
        self.0.fetch_related_collection("stargazers_url", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{Fetched, MockTransport, RequestTarget};
    use crate::rest::resources::test_support::build;
    use crate::rest::{RelatedUrl, ResourceType};
    use serde_json::json;

    fn hello_world() -> serde_json::Value {
        json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": {"login": "octocat", "id": 1, "type": "User"},
            "private": false,
            "fork": true,
            "description": "This your first repo!",
            "homepage": null,
            "language": null,
            "topics": ["octocat", "api"],
            "organization": null,
            "parent": {
                "name": "Hello-World",
                "owner": {"login": "github"},
                "created_at": "2011-01-26T19:01:12Z"
            },
            "pushed_at": "2011-01-26T19:06:43Z",
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z"
        })
    }

    #[test]
    fn test_repo_accessors() {
        let repo: Repo = build(&MockTransport::new(), hello_world());

        assert_eq!(repo.id().unwrap(), 1_296_269);
        assert_eq!(repo.full_name().unwrap(), "octocat/Hello-World");
        assert!(repo.fork().unwrap());
        assert_eq!(repo.homepage().unwrap(), None);
        assert_eq!(repo.topics().unwrap(), ["octocat", "api"]);
        assert_eq!(repo.organization().unwrap(), None);
        assert!(repo.pushed_at().unwrap().unwrap() < repo.updated_at().unwrap());
    }

    #[test]
    fn test_pushed_at_is_none_for_empty_repository() {
        let mut body = hello_world();
        body["pushed_at"] = json!(null);
        let repo: Repo = build(&MockTransport::new(), body);

        assert_eq!(repo.pushed_at().unwrap(), None);
        assert!(repo.created_at().is_ok());
    }

    #[test]
    fn test_nested_resources_are_typed() {
        let repo: Repo = build(&MockTransport::new(), hello_world());

        let owner = repo.owner().unwrap();
        assert_eq!(owner.kind(), User::kind());
        assert_eq!(owner.login().unwrap(), "octocat");

        let parent = repo.parent().unwrap();
        assert_eq!(parent.owner().unwrap().login().unwrap(), "github");
        assert!(parent.created_at().is_ok());
        assert!(matches!(
            repo.source(),
            Err(ResourceError::MissingField { field, .. }) if field == "source"
        ));
    }

    #[test]
    fn test_two_stage_default_urls() {
        let repo: Repo = build(&MockTransport::new(), hello_world());
        let resolve = |prop, args: &[(&str, &str)]| repo.resolve_related(prop, args).unwrap();

        assert_eq!(
            resolve("compare_url", &[("base", "main"), ("head", "topic")]),
            RelatedUrl::Relative("repos/octocat/Hello-World/compare/main...topic".to_string())
        );
        assert_eq!(
            resolve("contents_url", &[("path", "docs/README.md")]),
            RelatedUrl::Relative("repos/octocat/Hello-World/contents/docs/README.md".to_string())
        );
        assert_eq!(
            resolve("notifications_url", &[("all", "true")]),
            RelatedUrl::Relative("repos/octocat/Hello-World/notifications?all=true".to_string())
        );
        assert_eq!(
            resolve("labels_url", &[("name", "bug")]),
            RelatedUrl::Relative("repos/octocat/Hello-World/labels/bug".to_string())
        );
    }

    #[test]
    fn test_git_url_has_no_default() {
        let repo: Repo = build(&MockTransport::new(), hello_world());
        assert!(matches!(
            repo.resolve_related("git_url", &[]),
            Err(ResourceError::InvalidRelation { relation, .. }) if relation == "git_url"
        ));
    }

    #[tokio::test]
    async fn test_get_branch_resolves_default_url() {
        let mock = MockTransport::new();
        mock.on_relative(
            "repos/octocat/Hello-World/branches/main",
            Fetched::new(json!({
                "name": "main",
                "protected": false,
                "commit": {"sha": "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"}
            })),
        );
        let repo: Repo = build(&mock, hello_world());

        let branch = repo.get_branch("main").await.unwrap();

        assert_eq!(branch.name().unwrap(), "main");
        assert_eq!(
            branch.commit().unwrap().sha().unwrap(),
            "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d"
        );
    }

    #[tokio::test]
    async fn test_get_issue_formats_number() {
        let mock = MockTransport::new();
        mock.on_relative(
            "repos/octocat/Hello-World/issues/1347",
            Fetched::new(json!({"number": 1347, "title": "Found a bug", "state": "open"})),
        );
        let repo: Repo = build(&mock, hello_world());

        let issue = repo.get_issue(1347).await.unwrap();

        assert_eq!(issue.number().unwrap(), 1347);
    }

    #[tokio::test]
    async fn test_get_branches_follows_embedded_url() {
        let mock = MockTransport::new();
        mock.on_absolute(
            "https://api.github.com/repos/octocat/Hello-World/branches",
            Fetched::new(json!([{"name": "main"}, {"name": "gh-pages"}])),
        );
        let mut body = hello_world();
        body["branches_url"] =
            json!("https://api.github.com/repos/octocat/Hello-World/branches{/branch}");
        let repo: Repo = build(&mock, body);

        let branches = repo.get_branches().await.unwrap().materialize_all().await.unwrap();

        assert_eq!(branches.len(), 2);
        assert_eq!(
            mock.requests(),
            vec![RequestTarget::Absolute(
                "https://api.github.com/repos/octocat/Hello-World/branches".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_relation_without_owner_fails_before_fetching() {
        let mock = MockTransport::new();
        let repo: Repo = build(&mock, json!({"name": "Hello-World"}));

        let err = repo.get_forks().await.unwrap_err();

        assert!(matches!(err, ResourceError::MissingField { field, .. } if field == "owner"));
        assert_eq!(mock.request_count(), 0);
    }
}
