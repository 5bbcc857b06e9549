//! Event resource.

use crate::rest::resources::{Organization, Repo, User, ORGANIZATION_KIND, USER_KIND};
use crate::rest::{ResourceError, ResourceKind};

static EVENT_KEY_MAPPINGS: [(&str, &ResourceKind); 2] =
    [("actor", &USER_KIND), ("org", &ORGANIZATION_KIND)];

/// Capability table for [`Event`].
///
/// The `repo` of an event is a summary (`id`, `name` as `owner/name`, `url`)
/// that does not fit the repository templates, so it stays raw.
pub static EVENT_KIND: ResourceKind = ResourceKind {
    name: "Event",
    url: None,
    default_urls: &[],
    key_mappings: &EVENT_KEY_MAPPINGS,
};

github_resource! {
    /// An entry of a user, organization or repository event timeline.
    Event => EVENT_KIND
}

impl Event {
    field_accessors! {
        id: String;
        actor: nested User;
        org: Option<nested Organization>;
        repo: serde_json::Value;
        payload: serde_json::Value;
        public: bool;
        created_at: timestamp;
    }

    /// Returns the event type, e.g. `PushEvent` or `WatchEvent`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the document has no `type`.
    pub fn event_type(&self) -> Result<&str, ResourceError> {
        self.0.str_field("type")
    }

    /// Fetches the full repository the event happened in.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the event has no
    /// `repo.url`, plus transport and shape errors.
    pub async fn get_repo(&self) -> Result<Repo, ResourceError> {
        let url = self.0.format_template("{repo[url]}")?;
        self.0.client().get_absolute(&url).await
    }
}
