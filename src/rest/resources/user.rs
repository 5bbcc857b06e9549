//! User resources.
//!
//! [`User`] is any account returned by `users/{login}` or embedded in another
//! document (a repository owner, an issue author). [`AuthenticatedUser`] is
//! the account behind the configured token, returned by `user`, and carries the
//! private counters only its owner can see.
//!
//! # Example
//!
//! ```rust,ignore
//! let me = client.get_current_user().await?;
//! println!("{} uses {} KB", me.login()?, me.disk_usage()?);
//!
//! let mut followers = me.get_followers().await?;
//! let mut iter = followers.iter();
//! while let Some(follower) = iter.next().await {
//!     println!("- {}", follower?.login()?);
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};

use crate::rest::resources::{Event, Repo};
use crate::rest::{Collection, Resource, ResourceError, ResourceKind, ResourceType};

const USER_DEFAULT_URLS: &[(&str, &str)] = &[
    ("followers_url", "users/{login}/followers"),
    ("following_url", "users/{login}/following{{/other_user}}"),
    ("gists_url", "users/{login}/gists{{/gist_id}}"),
    ("starred_url", "users/{login}/starred{{/owner}}{{/repo}}"),
    ("subscriptions_url", "users/{login}/subscriptions"),
    ("organizations_url", "users/{login}/orgs"),
    ("repos_url", "users/{login}/repos"),
    ("events_url", "users/{login}/events{{/privacy}}"),
    ("received_events_url", "users/{login}/received_events"),
];

/// Capability table for [`User`].
pub static USER_KIND: ResourceKind = ResourceKind {
    name: "User",
    url: Some("users/{login}"),
    default_urls: USER_DEFAULT_URLS,
    key_mappings: &[],
};

/// Capability table for [`AuthenticatedUser`].
pub static AUTHENTICATED_USER_KIND: ResourceKind = ResourceKind {
    name: "AuthenticatedUser",
    url: Some("user"),
    default_urls: USER_DEFAULT_URLS,
    key_mappings: &[],
};

github_resource! {
    /// A GitHub account.
    User => USER_KIND
}

impl User {
    field_accessors! {
        login: &str;
        id: u64;
        gravatar_id: Option<String>;
        html_url: &str;
        site_admin: bool;
        name: Option<String>;
        company: Option<String>;
        blog: Option<String>;
        location: Option<String>;
        email: Option<String>;
        hireable: Option<bool>;
        bio: Option<String>;
        public_repos: u64;
        public_gists: u64;
        followers: u64;
        following: u64;
        created_at: timestamp;
        updated_at: timestamp;
    }

    /// Returns the account type (`User`, `Organization` or `Bot`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the document has no `type`.
    pub fn account_type(&self) -> Result<&str, ResourceError> {
        self.0.str_field("type")
    }

    /// Lists the accounts following this user.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_followers(&self) -> Result<Collection<User>, ResourceError> {
        self.0.fetch_related_collection("followers_url", &[]).await
    }

    /// Lists the accounts this user follows.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_following(&self) -> Result<Collection<User>, ResourceError> {
        self.0.fetch_related_collection("following_url", &[]).await
    }

    /// Lists the repositories this user has starred.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_starred(&self) -> Result<Collection<Repo>, ResourceError> {
        self.0.fetch_related_collection("starred_url", &[]).await
    }

    /// Lists the repositories this user watches.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_subscriptions(&self) -> Result<Collection<Repo>, ResourceError> {
        self.0
            .fetch_related_collection("subscriptions_url", &[])
            .await
    }

    /// Lists the public repositories of this user.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_repos(&self) -> Result<Collection<Repo>, ResourceError> {
        self.0.fetch_related_collection("repos_url", &[]).await
    }

    /// Lists the events performed by this user.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_events(&self) -> Result<Collection<Event>, ResourceError> {
        self.0.fetch_related_collection("events_url", &[]).await
    }

    /// Lists the events this user has received.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_received_events(&self) -> Result<Collection<Event>, ResourceError> {
        self.0
            .fetch_related_collection("received_events_url", &[])
            .await
    }
}

/// The account the configured token belongs to.
///
/// Dereferences to [`User`], so every user accessor and relation helper is
/// available. [`refresh`](Resource::refresh) re-fetches `user` rather than
/// `users/{login}`.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    field_accessors! {
        total_private_repos: u64;
        owned_private_repos: u64;
        private_gists: u64;
        disk_usage: u64;
        collaborators: u64;
        two_factor_authentication: bool;
        plan: serde_json::Value;
    }

    /// Returns the account as a plain [`User`].
    #[must_use]
    pub fn into_user(self) -> User {
        self.0
    }
}

impl ResourceType for AuthenticatedUser {
    fn kind() -> &'static ResourceKind {
        &AUTHENTICATED_USER_KIND
    }

    fn from_resource(resource: Resource) -> Self {
        Self(User::from_resource(resource))
    }

    fn resource(&self) -> &Resource {
        self.0.resource()
    }

    fn into_resource(self) -> Resource {
        self.0.into_resource()
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl DerefMut for AuthenticatedUser {
    fn deref_mut(&mut self) -> &mut User {
        &mut self.0
    }
}

impl Serialize for AuthenticatedUser {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{Fetched, MockTransport, RequestTarget};
    use crate::rest::resources::test_support::build;
    use serde_json::json;

    fn octocat() -> serde_json::Value {
        json!({
            "login": "octocat",
            "id": 1,
            "type": "User",
            "site_admin": false,
            "name": "monalisa octocat",
            "company": null,
            "hireable": false,
            "public_repos": 2,
            "followers": 20,
            "created_at": "2008-01-14T04:33:35Z",
            "updated_at": "2008-01-14T04:33:35Z"
        })
    }

    #[test]
    fn test_user_accessors() {
        let user: User = build(&MockTransport::new(), octocat());

        assert_eq!(user.login().unwrap(), "octocat");
        assert_eq!(user.id().unwrap(), 1);
        assert_eq!(user.account_type().unwrap(), "User");
        assert!(!user.site_admin().unwrap());
        assert_eq!(user.company().unwrap(), None);
        assert_eq!(user.name().unwrap().as_deref(), Some("monalisa octocat"));
        assert_eq!(user.created_at().unwrap().to_rfc3339(), "2008-01-14T04:33:35+00:00");
    }

    #[test]
    fn test_missing_accessor_field() {
        let user: User = build(&MockTransport::new(), json!({"login": "octocat"}));
        assert!(matches!(
            user.bio(),
            Err(ResourceError::MissingField { resource: "User", field }) if field == "bio"
        ));
    }

    #[test]
    fn test_default_urls_use_login() {
        let user: User = build(&MockTransport::new(), octocat());

        assert_eq!(
            user.resolve_related("following_url", &[("other_user", "hubot")])
                .unwrap()
                .to_string(),
            "users/octocat/following/hubot"
        );
        assert_eq!(
            user.resolve_related("starred_url", &[]).unwrap().to_string(),
            "users/octocat/starred"
        );
    }

    #[tokio::test]
    async fn test_get_repos_uses_default_url() {
        let mock = MockTransport::new();
        mock.on_relative(
            "users/octocat/repos",
            Fetched::new(json!([{"name": "Hello-World", "owner": {"login": "octocat"}}])),
        );
        let user: User = build(&mock, octocat());

        let repos = user.get_repos().await.unwrap().materialize_all().await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].owner().unwrap().login().unwrap(), "octocat");
    }

    #[tokio::test]
    async fn test_get_events_strips_unused_privacy_segment() {
        let mock = MockTransport::new();
        mock.on_relative("users/octocat/events", Fetched::new(json!([])));
        let user: User = build(&mock, octocat());

        let events = user.get_events().await.unwrap();

        assert_eq!(events.item_count(), 0);
        assert_eq!(
            mock.requests(),
            vec![RequestTarget::Relative("users/octocat/events".to_string())]
        );
    }

    #[test]
    fn test_authenticated_user_derefs_to_user() {
        let mut body = octocat();
        body["disk_usage"] = json!(10000);
        body["plan"] = json!({"name": "pro", "space": 976562499});
        let me: AuthenticatedUser = build(&MockTransport::new(), body);

        assert_eq!(me.login().unwrap(), "octocat");
        assert_eq!(me.disk_usage().unwrap(), 10000);
        assert_eq!(me.plan().unwrap()["name"], "pro");
        assert_eq!(me.kind(), &AUTHENTICATED_USER_KIND);
    }

    #[tokio::test]
    async fn test_authenticated_user_refreshes_from_user_endpoint() {
        let mock = MockTransport::new();
        let mut refreshed = octocat();
        refreshed["followers"] = json!(21);
        mock.on_relative("user", Fetched::new(refreshed));
        let mut me: AuthenticatedUser = build(&mock, octocat());

        me.refresh().await.unwrap();

        assert_eq!(me.followers().unwrap(), 21);
        assert_eq!(
            mock.requests(),
            vec![RequestTarget::Relative("user".to_string())]
        );
    }
}
