//! Paginated collections.
//!
//! A [`Collection`] starts from the page that created it and follows the
//! `next` relation of the most recent response to fetch further pages. Pages
//! are append-only and kept in memory, so walking a collection a second time
//! does not re-fetch anything it already holds.
//!
//! # Cap semantics
//!
//! An optional `max_items` cap stops *further fetching* once the running
//! element count reaches it. Pages already fetched are always exposed in full,
//! so a capped walk yields at least `max_items` elements (if the server has
//! them) and possibly more. Callers needing an exact count truncate the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//!
//! let repo = client.get_repo("rust-lang", "rust").await?;
//!
//! // Eager: every page up to the cap
//! let forks = repo.get_forks().await?.materialize_all().await?;
//!
//! // Lazy: pages are fetched as the loop reaches them
//! let mut stargazers = repo.get_stargazers().await?;
//! let mut iter = stargazers.iter();
//! while let Some(user) = iter.next().await {
//!     println!("{}", user?.login()?);
//! }
//!
//! // As a futures Stream
//! let mut issues = Box::pin(repo.get_issues().await?.into_stream());
//! while let Some(issue) = issues.next().await {
//!     println!("#{}", issue?.number()?);
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use futures::stream::{self, Stream};
use serde_json::{Map, Value};

use crate::clients::{Fetched, LinkSet, RateLimit, RestClient};
use crate::rest::errors::{json_type_name, ResourceError};
use crate::rest::resource::{Resource, ResourceType};

/// Name used for errors raised by a collection itself.
const COLLECTION: &str = "Collection";

/// One fetched page of raw element documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    documents: Vec<Map<String, Value>>,
    rate_limit: Option<RateLimit>,
}

impl Page {
    /// Creates a page from a list response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedShape`] if the body is not an array
    /// or one of its elements is not an object.
    pub fn from_body(
        resource: &'static str,
        body: Value,
        rate_limit: Option<RateLimit>,
    ) -> Result<Self, ResourceError> {
        let items = match body {
            Value::Array(items) => items,
            other => {
                return Err(ResourceError::UnexpectedShape {
                    resource,
                    expected: "an array",
                    actual: json_type_name(&other),
                })
            }
        };

        let documents = items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(ResourceError::UnexpectedShape {
                    resource,
                    expected: "an array of objects",
                    actual: json_type_name(&other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            documents,
            rate_limit,
        })
    }

    /// Returns the raw element documents in server order.
    #[must_use]
    pub fn documents(&self) -> &[Map<String, Value>] {
        &self.documents
    }

    /// Returns the rate-limit snapshot of the fetch that produced this page.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// Returns the number of elements on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Whether a collection can still grow.
///
/// While a page is being fetched the collection is mutably borrowed by the
/// pending future, so the transient fetching state is never observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionState {
    /// A `next` relation exists and the cap, if any, has not been reached.
    Ready,
    /// No further page will be fetched.
    Exhausted,
}

/// A paginated, ordered sequence of resources of type `T`.
pub struct Collection<T: ResourceType> {
    client: RestClient,
    pages: Vec<Page>,
    links: LinkSet,
    rate_limit: Option<RateLimit>,
    item_count: usize,
    max_items: Option<usize>,
    _element: PhantomData<fn() -> T>,
}

impl<T: ResourceType> Collection<T> {
    /// Creates a collection from the response to a list request.
    ///
    /// The element cap is taken from the client.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedShape`] if the body is not an array
    /// of objects.
    pub fn new(client: RestClient, fetched: Fetched) -> Result<Self, ResourceError> {
        let page = Page::from_body(T::kind().name, fetched.body, fetched.rate_limit.clone())?;
        Ok(Self {
            max_items: client.max_items(),
            client,
            item_count: page.len(),
            pages: vec![page],
            links: fetched.links,
            rate_limit: fetched.rate_limit,
            _element: PhantomData,
        })
    }

    /// Returns the pages fetched so far, in fetch order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the link relations of the most recent fetch.
    #[must_use]
    pub const fn links(&self) -> &LinkSet {
        &self.links
    }

    /// Returns the rate-limit snapshot of the most recent fetch.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// Returns the number of elements across all fetched pages.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns the element cap, if any.
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Returns `true` if another page would be fetched on demand.
    #[must_use]
    pub fn can_fetch_more(&self) -> bool {
        let below_cap = self.max_items.map_or(true, |cap| self.item_count < cap);
        below_cap && self.links.contains("next")
    }

    /// Returns whether the collection can still grow.
    #[must_use]
    pub fn state(&self) -> CollectionState {
        if self.can_fetch_more() {
            CollectionState::Ready
        } else {
            CollectionState::Exhausted
        }
    }

    /// Fetches the page behind the `next` relation and appends it.
    ///
    /// The page is appended only once it has been fetched and validated;
    /// an error or a dropped future leaves the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRelation`] if there is no `next`
    /// relation, plus transport and shape errors.
    pub async fn fetch_next_page(&mut self) -> Result<&Page, ResourceError> {
        let next = self
            .links
            .next()
            .ok_or_else(|| ResourceError::InvalidRelation {
                resource: COLLECTION,
                relation: "next".to_string(),
            })?
            .to_string();
        tracing::debug!(url = %next, "Fetching next page");

        let fetched = self.client.fetch_absolute(&next).await?;
        let page = Page::from_body(T::kind().name, fetched.body, fetched.rate_limit.clone())?;

        self.item_count += page.len();
        self.rate_limit = fetched.rate_limit;
        self.links = fetched.links;
        self.pages.push(page);
        tracing::debug!(
            page_number = self.pages.len(),
            item_count = self.item_count,
            "Appended page"
        );

        let last = self.pages.len() - 1;
        Ok(&self.pages[last])
    }

    /// Returns every element of every page, fetching further pages while
    /// below the cap and a `next` relation exists.
    ///
    /// # Errors
    ///
    /// Any error of [`Collection::fetch_next_page`], plus coercion errors of
    /// the element documents.
    pub async fn materialize_all(&mut self) -> Result<Vec<T>, ResourceError> {
        let mut items = Vec::with_capacity(self.item_count);
        for page in &self.pages {
            self.extend_from_page(page, &mut items)?;
        }

        while self.can_fetch_more() {
            self.fetch_next_page().await?;
            let last = &self.pages[self.pages.len() - 1];
            self.extend_from_page(last, &mut items)?;
        }

        Ok(items)
    }

    /// Starts a traversal from the first page.
    ///
    /// Pages already held are replayed without fetching; pages beyond them
    /// are fetched forward as the traversal reaches them.
    pub fn iter(&mut self) -> CollectionIter<'_, T> {
        CollectionIter {
            collection: self,
            cursor: Cursor::default(),
        }
    }

    /// Converts the collection into a `Stream` of elements.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ResourceError>> {
        stream::unfold(Some((self, Cursor::default())), |state| async move {
            let (mut collection, mut cursor) = state?;
            match collection.advance(&mut cursor).await {
                Ok(Some(item)) => Some((Ok(item), Some((collection, cursor)))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    async fn advance(&mut self, cursor: &mut Cursor) -> Result<Option<T>, ResourceError> {
        loop {
            if let Some(page) = self.pages.get(cursor.page) {
                if let Some(document) = page.documents.get(cursor.index) {
                    cursor.index += 1;
                    return self.element(page, document).map(Some);
                }
                if cursor.page + 1 < self.pages.len() {
                    cursor.next_page();
                    continue;
                }
            }

            if !self.can_fetch_more() {
                return Ok(None);
            }
            self.fetch_next_page().await?;
            cursor.next_page();
        }
    }

    fn element(&self, page: &Page, document: &Map<String, Value>) -> Result<T, ResourceError> {
        Resource::new(
            T::kind(),
            self.client.clone(),
            document.clone(),
            page.rate_limit.clone(),
            LinkSet::default(),
        )
        .map(T::from_resource)
    }

    fn extend_from_page(&self, page: &Page, items: &mut Vec<T>) -> Result<(), ResourceError> {
        for document in &page.documents {
            items.push(self.element(page, document)?);
        }
        Ok(())
    }
}

impl<T: ResourceType> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &T::kind().name)
            .field("pages", &self.pages.len())
            .field("item_count", &self.item_count)
            .field("max_items", &self.max_items)
            .field("links", &self.links)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    page: usize,
    index: usize,
}

impl Cursor {
    fn next_page(&mut self) {
        self.page += 1;
        self.index = 0;
    }
}

/// A single traversal over a [`Collection`].
pub struct CollectionIter<'a, T: ResourceType> {
    collection: &'a mut Collection<T>,
    cursor: Cursor,
}

impl<T: ResourceType> CollectionIter<'_, T> {
    /// Returns the next element, fetching a page if needed.
    ///
    /// Returns `None` once every held page has been walked and no further
    /// page can be fetched.
    pub async fn next(&mut self) -> Option<Result<T, ResourceError>> {
        self.collection.advance(&mut self.cursor).await.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, MockTransport, RequestTarget, Transport};
    use crate::rest::resources::User;
    use chrono::{TimeZone, Utc};
    use futures::StreamExt;
    use serde_json::json;
    use std::sync::Arc;

    fn users(from: usize, count: usize) -> Value {
        Value::Array(
            (from..from + count)
                .map(|i| json!({"login": format!("user{i}"), "id": i}))
                .collect(),
        )
    }

    fn next(url: &str) -> LinkSet {
        std::iter::once(("next".to_string(), url.to_string())).collect()
    }

    fn page_url(n: usize) -> String {
        format!("https://api.github.com/users?page={n}")
    }

    fn collection(mock: &MockTransport, first: Fetched, cap: Option<usize>) -> Collection<User> {
        let client = RestClient::with_transport(Arc::new(mock.clone()), cap);
        Collection::new(client, first).unwrap()
    }

    fn logins(items: &[User]) -> Vec<String> {
        items.iter().map(|u| u.login().unwrap().to_string()).collect()
    }

    #[tokio::test]
    async fn test_materialize_all_stops_at_or_past_cap() {
        let mock = MockTransport::new();
        for n in 2..=6 {
            mock.on_absolute(
                page_url(n),
                Fetched::new(users((n - 1) * 30, 30)).with_links(next(&page_url(n + 1))),
            );
        }
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 30)).with_links(next(&page_url(2))),
            Some(100),
        );

        let all = users.materialize_all().await.unwrap();

        assert_eq!(all.len(), 120);
        assert_eq!(users.pages().len(), 4);
        assert_eq!(users.item_count(), 120);
        assert_eq!(mock.request_count(), 3);
        assert_eq!(users.state(), CollectionState::Exhausted);
        assert_eq!(all[119].login().unwrap(), "user119");
    }

    #[tokio::test]
    async fn test_materialize_all_stops_when_next_disappears() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(users(30, 12)));
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 30)).with_links(next(&page_url(2))),
            Some(100),
        );

        let all = users.materialize_all().await.unwrap();

        assert_eq!(all.len(), 42);
        assert!(users.links().is_empty());
    }

    #[tokio::test]
    async fn test_iteration_over_two_held_pages() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(users(5, 3)));
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 5)).with_links(next(&page_url(2))),
            None,
        );
        users.fetch_next_page().await.unwrap();

        let mut seen = Vec::new();
        let mut iter = users.iter();
        while let Some(user) = iter.next().await {
            seen.push(user.unwrap().login().unwrap().to_string());
        }

        let expected: Vec<String> = (0..8).map(|i| format!("user{i}")).collect();
        assert_eq!(seen, expected);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_iteration_fetches_lazily_and_replays_held_pages() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(users(2, 2)));
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 2)).with_links(next(&page_url(2))),
            None,
        );

        let mut iter = users.iter();
        iter.next().await.unwrap().unwrap();
        iter.next().await.unwrap().unwrap();
        assert_eq!(mock.request_count(), 0);
        iter.next().await.unwrap().unwrap();
        assert_eq!(mock.request_count(), 1);
        iter.next().await.unwrap().unwrap();
        assert!(iter.next().await.is_none());

        let again = users.materialize_all().await.unwrap();
        assert_eq!(logins(&again), ["user0", "user1", "user2", "user3"]);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_iteration_skips_empty_pages() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(json!([])).with_links(next(&page_url(3))))
            .on_absolute(page_url(3), Fetched::new(users(1, 1)));
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 1)).with_links(next(&page_url(2))),
            None,
        );

        let mut seen = Vec::new();
        let mut iter = users.iter();
        while let Some(user) = iter.next().await {
            seen.push(user.unwrap());
        }

        assert_eq!(logins(&seen), ["user0", "user1"]);
        assert_eq!(users.pages().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_next_page_without_next_relation() {
        let mock = MockTransport::new();
        let mut users = collection(&mock, Fetched::new(users(0, 3)), None);

        let err = users.fetch_next_page().await.unwrap_err();

        assert!(matches!(
            err,
            ResourceError::InvalidRelation { resource: "Collection", relation } if relation == "next"
        ));
        assert_eq!(users.pages().len(), 1);
        assert_eq!(users.item_count(), 3);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_appends_nothing() {
        let mock = MockTransport::new();
        mock.fail_absolute(page_url(2), 500);
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 3)).with_links(next(&page_url(2))),
            None,
        );

        let err = users.fetch_next_page().await.unwrap_err();

        assert!(matches!(err, ResourceError::Http(HttpError::Response(_))));
        assert_eq!(users.pages().len(), 1);
        assert_eq!(users.item_count(), 3);
        assert_eq!(users.links().next(), Some(page_url(2).as_str()));
    }

    /// Never completes a fetch.
    struct StalledTransport;

    #[async_trait::async_trait]
    impl Transport for StalledTransport {
        async fn get_relative(&self, _path: &str) -> Result<Fetched, HttpError> {
            futures::future::pending().await
        }

        async fn get_absolute(&self, _url: &str) -> Result<Fetched, HttpError> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_cancelled_fetch_appends_nothing() {
        let client = RestClient::with_transport(Arc::new(StalledTransport), None);
        let mut users: Collection<User> = Collection::new(
            client,
            Fetched::new(users(0, 1)).with_links(next(&page_url(2))),
        )
        .unwrap();

        let pending = users.fetch_next_page();
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), pending)
            .await
            .is_err();

        assert!(timed_out);
        assert_eq!(users.pages().len(), 1);
        assert_eq!(users.item_count(), 1);
        assert_eq!(users.links().next(), Some(page_url(2).as_str()));
        assert_eq!(users.state(), CollectionState::Ready);
    }

    #[tokio::test]
    async fn test_malformed_page_appends_nothing() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(json!([{"login": "a"}, 7])));
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 3)).with_links(next(&page_url(2))),
            None,
        );

        let err = users.fetch_next_page().await.unwrap_err();

        assert!(matches!(
            err,
            ResourceError::UnexpectedShape { expected: "an array of objects", actual: "a number", .. }
        ));
        assert_eq!(users.pages().len(), 1);
    }

    #[tokio::test]
    async fn test_elements_carry_their_page_rate_limit() {
        let snapshot = |remaining| crate::clients::RateLimit {
            limit: 5000,
            remaining,
            reset_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            used: None,
            resource: None,
        };
        let mock = MockTransport::new();
        mock.on_absolute(
            page_url(2),
            Fetched::new(users(1, 1)).with_rate_limit(snapshot(4998)),
        );
        let mut users = collection(
            &mock,
            Fetched::new(users(0, 1))
                .with_rate_limit(snapshot(4999))
                .with_links(next(&page_url(2))),
            None,
        );

        let all = users.materialize_all().await.unwrap();

        assert_eq!(all[0].rate_limit().map(|r| r.remaining), Some(4999));
        assert_eq!(all[1].rate_limit().map(|r| r.remaining), Some(4998));
        assert_eq!(users.rate_limit().map(|r| r.remaining), Some(4998));
        assert_eq!(users.pages()[0].rate_limit().map(|r| r.remaining), Some(4999));
    }

    #[tokio::test]
    async fn test_stream_yields_every_element_then_ends() {
        let mock = MockTransport::new();
        mock.on_absolute(page_url(2), Fetched::new(users(2, 1)));
        let users = collection(
            &mock,
            Fetched::new(users(0, 2)).with_links(next(&page_url(2))),
            None,
        );

        let items: Vec<_> = users.into_stream().collect().await;

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(Result::is_ok));
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        let mock = MockTransport::new();
        mock.fail_absolute(page_url(2), 502);
        let users = collection(
            &mock,
            Fetched::new(users(0, 1)).with_links(next(&page_url(2))),
            None,
        );

        let items: Vec<_> = users.into_stream().collect().await;

        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
        assert_eq!(
            mock.requests(),
            vec![RequestTarget::Absolute(page_url(2))]
        );
    }

    #[test]
    fn test_new_rejects_object_body() {
        let client = RestClient::with_transport(Arc::new(MockTransport::new()), None);
        let result = Collection::<User>::new(client, Fetched::new(json!({"message": "x"})));
        assert!(matches!(
            result,
            Err(ResourceError::UnexpectedShape { resource: "User", actual: "an object", .. })
        ));
    }

    #[test]
    fn test_state_reflects_cap_and_links() {
        let mock = MockTransport::new();
        let capped = collection(
            &mock,
            Fetched::new(users(0, 10)).with_links(next(&page_url(2))),
            Some(10),
        );
        assert_eq!(capped.state(), CollectionState::Exhausted);

        let open = collection(
            &mock,
            Fetched::new(users(0, 10)).with_links(next(&page_url(2))),
            Some(11),
        );
        assert_eq!(open.state(), CollectionState::Ready);
    }
}
