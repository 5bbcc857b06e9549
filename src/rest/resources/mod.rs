//! Concrete GitHub resource types.
//!
//! Each type is a thin wrapper around [`Resource`](crate::rest::Resource)
//! paired with a static [`ResourceKind`](crate::rest::ResourceKind) table:
//!
//! | Type | Canonical URL | Nested fields |
//! |------|---------------|---------------|
//! | [`User`] | `users/{login}` | |
//! | [`AuthenticatedUser`] | `user` | |
//! | [`Organization`] | `orgs/{login}` | |
//! | [`Repo`] | `repos/{owner[login]}/{name}` | `owner`, `organization`, `parent`, `source` |
//! | [`Branch`] | | `commit` |
//! | [`Commit`] | | `author`, `committer` |
//! | [`Event`] | | `actor`, `org` |
//! | [`Issue`] | | `user`, `assignee`, `closed_by`, `repository` |
//!
//! Wrappers dereference to [`Resource`](crate::rest::Resource), so raw field
//! access, [`refresh`](crate::rest::Resource::refresh) and the generic
//! relation fetchers are available on every type.
//!
//! Typed accessors return `Result` so that a field absent from the current
//! document surfaces as [`ResourceError::MissingField`](crate::rest::ResourceError::MissingField).
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::rest::resources::Repo;
//!
//! let repo: Repo = client.get_repo("octocat", "Hello-World").await?;
//! println!("{} by {}", repo.full_name()?, repo.owner()?.login()?);
//!
//! for commit in repo.get_commits().await?.materialize_all().await? {
//!     println!("{}", commit.sha()?);
//! }
//! ```

/// Declares a newtype over `Resource` bound to a static kind.
macro_rules! github_resource {
    ($(#[$meta:meta])* $name:ident => $kind:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name($crate::rest::Resource);

        impl $crate::rest::ResourceType for $name {
            fn kind() -> &'static $crate::rest::ResourceKind {
                &$kind
            }

            fn from_resource(resource: $crate::rest::Resource) -> Self {
                Self(resource)
            }

            fn resource(&self) -> &$crate::rest::Resource {
                &self.0
            }

            fn into_resource(self) -> $crate::rest::Resource {
                self.0
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::rest::Resource;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}

/// Generates typed field accessors backed by `Resource` lookups.
///
/// - `field: &str;` borrows a string field
/// - `field: timestamp;` reads a coerced `*_at` field
/// - `field: nested Type;` reads a required nested resource
/// - `field: Option<nested Type>;` reads a nullable nested resource
/// - `field: Type;` deserializes the field as `Type`
macro_rules! field_accessors {
    () => {};
    ($field:ident: &str; $($rest:tt)*) => {
        #[doc = concat!("Returns the `", stringify!($field), "` field.")]
        pub fn $field(&self) -> Result<&str, $crate::rest::ResourceError> {
            self.0.str_field(stringify!($field))
        }
        field_accessors!($($rest)*);
    };
    ($field:ident: timestamp; $($rest:tt)*) => {
        #[doc = concat!("Returns the `", stringify!($field), "` timestamp.")]
        pub fn $field(
            &self,
        ) -> Result<::chrono::DateTime<::chrono::Utc>, $crate::rest::ResourceError> {
            self.0.timestamp(stringify!($field))
        }
        field_accessors!($($rest)*);
    };
    ($field:ident: nested $ty:ty; $($rest:tt)*) => {
        #[doc = concat!("Returns the nested `", stringify!($field), "` resource.")]
        pub fn $field(&self) -> Result<$ty, $crate::rest::ResourceError> {
            self.0.nested_as::<$ty>(stringify!($field))
        }
        field_accessors!($($rest)*);
    };
    ($field:ident: Option<nested $ty:ty>; $($rest:tt)*) => {
        #[doc = concat!("Returns the nested `", stringify!($field), "` resource, `None` when null.")]
        pub fn $field(&self) -> Result<Option<$ty>, $crate::rest::ResourceError> {
            if self.0.get(stringify!($field))?.is_null() {
                return Ok(None);
            }
            self.0.nested_as::<$ty>(stringify!($field)).map(Some)
        }
        field_accessors!($($rest)*);
    };
    ($field:ident: $ty:ty; $($rest:tt)*) => {
        #[doc = concat!("Returns the `", stringify!($field), "` field.")]
        pub fn $field(&self) -> Result<$ty, $crate::rest::ResourceError> {
            self.0.field(stringify!($field))
        }
        field_accessors!($($rest)*);
    };
}

mod branch;
mod commit;
mod event;
mod issue;
mod organization;
mod repo;
mod user;

pub use branch::{Branch, BRANCH_KIND};
pub use commit::{Commit, COMMIT_KIND};
pub use event::{Event, EVENT_KIND};
pub use issue::{Issue, ISSUE_KIND};
pub use organization::{Organization, ORGANIZATION_KIND};
pub use repo::{Repo, REPO_KIND};
pub use user::{AuthenticatedUser, User, AUTHENTICATED_USER_KIND, USER_KIND};
