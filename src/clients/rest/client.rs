//! REST client for the GitHub API.
//!
//! This module provides the [`RestClient`] type, the entry point of the
//! resource layer. It turns [`Transport`] results into typed resources and
//! collections and applies the configured collection cap.

use std::fmt;
use std::sync::Arc;

use crate::clients::rest::RestError;
use crate::clients::{Fetched, HttpClient, Transport};
use crate::config::GitHubConfig;
use crate::rest::resources::{AuthenticatedUser, Organization, Repo, User};
use crate::rest::template::expand;
use crate::rest::{Collection, Resource, ResourceError, ResourceType};

/// REST API client for the GitHub API.
///
/// Cloning a `RestClient` is cheap: clones share the same transport. Every
/// resource and collection keeps a clone so it can fetch related data later.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::{ApiToken, GitHubConfig, RestClient};
///
/// let config = GitHubConfig::builder()
///     .api_token(ApiToken::new("ghp_example")?)
///     .max_items(200)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let repo = client.get_repo("octocat", "Hello-World").await?;
/// let branch = repo.get_branch("main").await?;
/// println!("{} at {}", branch.name()?, branch.commit()?.sha()?);
/// ```
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
    max_items: Option<usize>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client backed by an [`HttpClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &GitHubConfig) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(
            base_url = http_client.base_url(),
            max_items = ?config.max_items(),
            "Created REST client"
        );
        Ok(Self::with_transport(Arc::new(http_client), config.max_items()))
    }

    /// Creates a client over any transport.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_api::clients::{MockTransport, RestClient};
    /// use std::sync::Arc;
    ///
    /// let client = RestClient::with_transport(Arc::new(MockTransport::new()), Some(50));
    /// assert_eq!(client.max_items(), Some(50));
    /// ```
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, max_items: Option<usize>) -> Self {
        Self {
            transport,
            max_items,
        }
    }

    /// Returns the transport this client fetches through.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the element cap applied to collections created by this client.
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Fetches a path relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for transport errors.
    pub async fn fetch_relative(&self, path: &str) -> Result<Fetched, RestError> {
        let path = normalize_path(path)?;
        Ok(self.transport.get_relative(path).await?)
    }

    /// Fetches an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for transport errors.
    pub async fn fetch_absolute(&self, url: &str) -> Result<Fetched, RestError> {
        Ok(self.transport.get_absolute(url).await?)
    }

    /// Fetches a relative path as a single resource of type `T`.
    ///
    /// # Errors
    ///
    /// Transport errors, [`ResourceError::UnexpectedShape`] for non-object
    /// bodies and coercion errors.
    pub async fn get_relative<T: ResourceType>(&self, path: &str) -> Result<T, ResourceError> {
        let fetched = self.fetch_relative(path).await?;
        self.wrap(fetched)
    }

    /// Fetches an absolute URL as a single resource of type `T`.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`].
    pub async fn get_absolute<T: ResourceType>(&self, url: &str) -> Result<T, ResourceError> {
        let fetched = self.fetch_absolute(url).await?;
        self.wrap(fetched)
    }

    /// Fetches a relative path as a collection of `T`.
    ///
    /// # Errors
    ///
    /// Transport errors and [`ResourceError::UnexpectedShape`] if the body is
    /// not an array of objects.
    pub async fn get_list_relative<T: ResourceType>(
        &self,
        path: &str,
    ) -> Result<Collection<T>, ResourceError> {
        let fetched = self.fetch_relative(path).await?;
        Collection::new(self.clone(), fetched)
    }

    /// Fetches an absolute URL as a collection of `T`.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_list_relative`].
    pub async fn get_list_absolute<T: ResourceType>(
        &self,
        url: &str,
    ) -> Result<Collection<T>, ResourceError> {
        let fetched = self.fetch_absolute(url).await?;
        Collection::new(self.clone(), fetched)
    }

    /// Fetches a user by login.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`].
    pub async fn get_user(&self, login: &str) -> Result<User, ResourceError> {
        self.get_relative(&expand("users/{login}", &[("login", login)]))
            .await
    }

    /// Fetches the user the configured token belongs to.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`]; unauthenticated clients get a
    /// 401 transport error.
    pub async fn get_current_user(&self) -> Result<AuthenticatedUser, ResourceError> {
        self.get_relative("user").await
    }

    /// Fetches an organization by login.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`].
    pub async fn get_organization(&self, login: &str) -> Result<Organization, ResourceError> {
        self.get_relative(&expand("orgs/{login}", &[("login", login)]))
            .await
    }

    /// Fetches a repository by owner and name.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`].
    pub async fn get_repo(&self, owner: &str, name: &str) -> Result<Repo, ResourceError> {
        self.get_relative(&expand(
            "repos/{owner}/{name}",
            &[("owner", owner), ("name", name)],
        ))
        .await
    }

    /// Lists all users, in sign-up order.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_list_relative`].
    pub async fn get_users(&self) -> Result<Collection<User>, ResourceError> {
        self.get_list_relative("users").await
    }

    /// Fetches any relative path as an untyped resource.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::get_relative`].
    pub async fn get_resource(&self, path: &str) -> Result<Resource, ResourceError> {
        self.get_relative(path).await
    }

    fn wrap<T: ResourceType>(&self, fetched: Fetched) -> Result<T, ResourceError> {
        Resource::from_fetched(T::kind(), self.clone(), fetched).map(T::from_resource)
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("max_items", &self.max_items)
            .finish_non_exhaustive()
    }
}

/// Strips leading `/` characters from a relative path.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(normalize_path("/users/octocat")?, "users/octocat");
/// assert!(normalize_path("//").is_err());
/// ```
fn normalize_path(path: &str) -> Result<&str, RestError> {
    let normalized = path.trim_start_matches('/');
    if normalized.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(normalized)
}
