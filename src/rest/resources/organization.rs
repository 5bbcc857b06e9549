//! Organization resource.

use crate::rest::resources::{Event, Repo, User};
use crate::rest::{Collection, ResourceError, ResourceKind};

/// Capability table for [`Organization`].
pub static ORGANIZATION_KIND: ResourceKind = ResourceKind {
    name: "Organization",
    url: Some("orgs/{login}"),
    default_urls: &[
        ("repos_url", "orgs/{login}/repos"),
        ("events_url", "orgs/{login}/events"),
        ("hooks_url", "orgs/{login}/hooks"),
        ("issues_url", "orgs/{login}/issues"),
        ("members_url", "orgs/{login}/members{{/member}}"),
        ("public_members_url", "orgs/{login}/public_members{{/member}}"),
    ],
    key_mappings: &[],
};

github_resource! {
    /// A GitHub organization.
    ///
    /// Documents embedded in repositories only carry the summary fields
    /// (`login`, `id`, URLs); call [`refresh`](crate::rest::Resource::refresh)
    /// for the full profile.
    Organization => ORGANIZATION_KIND
}

impl Organization {
    field_accessors! {
        login: &str;
        id: u64;
        description: Option<String>;
        name: Option<String>;
        company: Option<String>;
        blog: Option<String>;
        location: Option<String>;
        email: Option<String>;
        html_url: &str;
        public_repos: u64;
        public_gists: u64;
        followers: u64;
        following: u64;
        created_at: timestamp;
        updated_at: timestamp;
    }

    /// Lists the organization's repositories.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_repos(&self) -> Result<Collection<Repo>, ResourceError> {
        self.0.fetch_related_collection("repos_url", &[]).await
    }

    /// Lists public events for the organization.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_events(&self) -> Result<Collection<Event>, ResourceError> {
        self.0.fetch_related_collection("events_url", &[]).await
    }

    /// Lists members visible to the caller.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_members(&self) -> Result<Collection<User>, ResourceError> {
        self.0.fetch_related_collection("members_url", &[]).await
    }

    /// Lists members who publicized their membership.
    ///
    /// # Errors
    ///
    /// Relation resolution, transport and shape errors.
    pub async fn get_public_members(&self) -> Result<Collection<User>, ResourceError> {
        self.0
            .fetch_related_collection("public_members_url", &[])
            .await
    }
}
