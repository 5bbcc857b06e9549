//! The generic JSON-backed resource.
//!
//! A [`Resource`] wraps one JSON object returned by the API together with the
//! client it came from, the rate-limit snapshot of the fetch that produced it
//! and that fetch's link relations. Per-type behaviour (canonical URL, default
//! relation URLs, nested field types) is supplied by a static
//! [`ResourceKind`] capability table rather than by subclassing.
//!
//! # Field coercion
//!
//! Every time a document is assigned (construction or [`Resource::refresh`]):
//!
//! - keys ending in `_at` holding text are parsed into [`DateTime<Utc>`]
//! - otherwise, keys listed in the kind's `key_mappings` holding an object are
//!   wrapped as a nested [`Resource`] of the mapped kind
//!
//! Both steps are idempotent: structured values are left as they are.
//!
//! # Example
//!
//! ```rust
//! use github_api::clients::{MockTransport, RestClient};
//! use github_api::rest::{Field, Resource};
//! use github_api::rest::resources::REPO_KIND;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let client = RestClient::with_transport(Arc::new(MockTransport::new()), None);
//! let body = json!({
//!     "name": "Hello-World",
//!     "owner": {"login": "octocat"},
//!     "updated_at": "2011-01-26T19:14:43Z"
//! });
//! let serde_json::Value::Object(map) = body else { unreachable!() };
//!
//! let repo = Resource::new(&REPO_KIND, client, map, None, Default::default()).unwrap();
//! assert!(matches!(repo.get("updated_at").unwrap(), Field::Timestamp(_)));
//! assert_eq!(repo.nested("owner").unwrap().str_field("login").unwrap(), "octocat");
//! assert_eq!(
//!     repo.format_template("repos/{owner[login]}/{name}/branches{{/branch}}").unwrap(),
//!     "repos/octocat/Hello-World/branches{/branch}"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::{Fetched, LinkSet, RateLimit, RestClient};
use crate::rest::collection::Collection;
use crate::rest::errors::{json_type_name, ResourceError};
use crate::rest::template::{self, FieldRef};

/// Suffix marking fields that hold timestamps.
pub const TIMESTAMP_SUFFIX: &str = "_at";

/// A resource document after coercion.
pub type Document = HashMap<String, Field>;

/// Static capability table describing one kind of resource.
///
/// # Example
///
/// ```rust
/// use github_api::rest::ResourceKind;
///
/// static GIST_KIND: ResourceKind = ResourceKind {
///     name: "Gist",
///     url: Some("gists/{id}"),
///     default_urls: &[("commits_url", "gists/{id}/commits")],
///     key_mappings: &[],
/// };
///
/// assert_eq!(GIST_KIND.default_url("commits_url"), Some("gists/{id}/commits"));
/// assert!(GIST_KIND.default_url("forks_url").is_none());
/// ```
pub struct ResourceKind {
    /// Kind name used in errors and logs.
    pub name: &'static str,
    /// Canonical URL template used by [`Resource::refresh`].
    pub url: Option<&'static str>,
    /// Default URL templates for relations the document may not embed.
    pub default_urls: &'static [(&'static str, &'static str)],
    /// Fields that hold nested resources, with the kind to wrap them as.
    pub key_mappings: &'static [(&'static str, &'static ResourceKind)],
}

impl ResourceKind {
    /// Returns the default URL template registered for a relation.
    #[must_use]
    pub fn default_url(&self, relation: &str) -> Option<&'static str> {
        self.default_urls
            .iter()
            .find(|(name, _)| *name == relation)
            .map(|(_, template)| *template)
    }

    /// Returns the nested kind registered for a field.
    #[must_use]
    pub fn nested_kind(&self, field: &str) -> Option<&'static Self> {
        self.key_mappings
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }
}

impl PartialEq for ResourceKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResourceKind {}

// Key mappings may be cyclic (a Repo's parent is a Repo), so only names are printed.
impl fmt::Debug for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceKind")
            .field("name", &self.name)
            .field("url", &self.url)
            .field(
                "default_urls",
                &self.default_urls.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            )
            .field(
                "key_mappings",
                &self
                    .key_mappings
                    .iter()
                    .map(|(k, kind)| (*k, kind.name))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Capability table for payloads without a dedicated type.
pub static GENERIC_KIND: ResourceKind = ResourceKind {
    name: "Resource",
    url: None,
    default_urls: &[],
    key_mappings: &[],
};

/// A single coerced document value.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// A JSON value kept as decoded.
    Value(Value),
    /// A `*_at` value parsed into a UTC date-time.
    Timestamp(DateTime<Utc>),
    /// A nested object wrapped as a resource of the mapped kind.
    Resource(Box<Resource>),
}

impl Field {
    /// Returns the raw JSON value, if this field was not coerced.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string value, if this field is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Returns the timestamp, if this field was coerced to one.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Returns the nested resource, if this field was coerced to one.
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Returns `true` for a JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    /// Converts the field back to JSON. Timestamps render as RFC 3339.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Timestamp(ts) => Value::String(format_timestamp(ts)),
            Self::Resource(r) => r.to_json(),
        }
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Self::Value(Value::Null) => Unexpected::Unit,
            Self::Value(Value::Bool(b)) => Unexpected::Bool(*b),
            Self::Value(Value::Number(_)) => Unexpected::Other("number"),
            Self::Value(Value::String(s)) => Unexpected::Str(s),
            Self::Value(Value::Array(_)) => Unexpected::Seq,
            Self::Value(Value::Object(_)) | Self::Resource(_) => Unexpected::Map,
            Self::Timestamp(_) => Unexpected::Other("timestamp"),
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A related URL after both expansion passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelatedUrl {
    /// Expanded from a template embedded in the document.
    Absolute(String),
    /// Expanded from the kind's default template, relative to the base URL.
    Relative(String),
}

impl fmt::Display for RelatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) | Self::Relative(url) => f.write_str(url),
        }
    }
}

/// Types that wrap a [`Resource`] of a fixed kind.
///
/// The concrete types in [`crate::rest::resources`] implement this through a
/// macro; [`Resource`] itself implements it with [`GENERIC_KIND`].
pub trait ResourceType: Sized + Send + Sync {
    /// The capability table for this type.
    fn kind() -> &'static ResourceKind;

    /// Wraps an already-coerced resource.
    fn from_resource(resource: Resource) -> Self;

    /// Borrows the underlying resource.
    fn resource(&self) -> &Resource;

    /// Unwraps the underlying resource.
    fn into_resource(self) -> Resource;
}

/// A single JSON-backed API entity.
#[derive(Clone)]
pub struct Resource {
    kind: &'static ResourceKind,
    client: RestClient,
    document: Document,
    rate_limit: Option<RateLimit>,
    links: LinkSet,
}

impl Resource {
    /// Creates a resource from a raw JSON object, coercing its fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TimestampParse`] if a `*_at` field cannot be
    /// parsed, here or in any nested resource.
    pub fn new(
        kind: &'static ResourceKind,
        client: RestClient,
        document: Map<String, Value>,
        rate_limit: Option<RateLimit>,
        links: LinkSet,
    ) -> Result<Self, ResourceError> {
        let document = document
            .into_iter()
            .map(|(key, value)| (key, Field::Value(value)))
            .collect();
        Self::from_document(kind, client, document, rate_limit, links)
    }

    /// Creates a resource from a possibly already-coerced document.
    ///
    /// Fields that are already structured are kept unchanged, nested
    /// resources of a different kind are re-wrapped as the mapped kind.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::new`].
    pub fn from_document(
        kind: &'static ResourceKind,
        client: RestClient,
        document: Document,
        rate_limit: Option<RateLimit>,
        links: LinkSet,
    ) -> Result<Self, ResourceError> {
        let document = coerce(kind, &client, rate_limit.as_ref(), document)?;
        Ok(Self {
            kind,
            client,
            document,
            rate_limit,
            links,
        })
    }

    /// Creates a resource from a transport result.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedShape`] if the body is not a JSON
    /// object, otherwise the same errors as [`Resource::new`].
    pub fn from_fetched(
        kind: &'static ResourceKind,
        client: RestClient,
        fetched: Fetched,
    ) -> Result<Self, ResourceError> {
        match fetched.body {
            Value::Object(map) => Self::new(kind, client, map, fetched.rate_limit, fetched.links),
            other => Err(ResourceError::UnexpectedShape {
                resource: kind.name,
                expected: "an object",
                actual: json_type_name(&other),
            }),
        }
    }

    /// Returns the capability table of this resource.
    #[must_use]
    pub const fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Returns the client this resource fetches related data through.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Returns the coerced document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the rate-limit snapshot of the fetch that produced this document.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// Returns the link relations of the fetch that produced this document.
    #[must_use]
    pub const fn links(&self) -> &LinkSet {
        &self.links
    }

    /// Returns `true` if the document has the field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.document.contains_key(name)
    }

    /// Returns a field. No network I/O is performed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent.
    pub fn get(&self, name: &str) -> Result<&Field, ResourceError> {
        self.document
            .get(name)
            .ok_or_else(|| ResourceError::MissingField {
                resource: self.kind.name,
                field: name.to_string(),
            })
    }

    /// Reads a field as any deserializable type.
    ///
    /// Timestamps deserialize from their RFC 3339 form and nested resources
    /// from their document, so `field::<Option<String>>("description")` and
    /// `field::<DateTime<Utc>>("created_at")` both work.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent and
    /// [`ResourceError::FieldType`] if it does not convert to `T`.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResourceError> {
        let field = self.get(name)?;
        serde_json::from_value(field.to_json()).map_err(|source| ResourceError::FieldType {
            resource: self.kind.name,
            field: name.to_string(),
            source,
        })
    }

    /// Reads a string field without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent and
    /// [`ResourceError::FieldType`] if it is not a string.
    pub fn str_field(&self, name: &str) -> Result<&str, ResourceError> {
        let field = self.get(name)?;
        field
            .as_str()
            .ok_or_else(|| self.type_error(name, field, "a string"))
    }

    /// Reads a coerced timestamp field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent and
    /// [`ResourceError::FieldType`] if it is not a timestamp (e.g. `null`).
    pub fn timestamp(&self, name: &str) -> Result<DateTime<Utc>, ResourceError> {
        let field = self.get(name)?;
        field
            .as_timestamp()
            .copied()
            .ok_or_else(|| self.type_error(name, field, "a timestamp"))
    }

    /// Reads a nested resource field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent and
    /// [`ResourceError::FieldType`] if it was not coerced to a resource.
    pub fn nested(&self, name: &str) -> Result<&Resource, ResourceError> {
        let field = self.get(name)?;
        field
            .as_resource()
            .ok_or_else(|| self.type_error(name, field, "a nested resource"))
    }

    /// Reads a nested resource field as a concrete type.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::nested`], plus coercion errors when the nested
    /// resource has to be re-wrapped as `T`'s kind.
    pub fn nested_as<T: ResourceType>(&self, name: &str) -> Result<T, ResourceError> {
        self.nested(name)?
            .clone()
            .into_kind(T::kind())
            .map(T::from_resource)
    }

    /// Re-wraps this resource as another kind, re-running coercion.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::new`].
    pub fn into_kind(self, kind: &'static ResourceKind) -> Result<Self, ResourceError> {
        if self.kind == kind {
            return Ok(self);
        }
        Self::from_document(kind, self.client, self.document, self.rate_limit, self.links)
    }

    /// Converts the document back to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.document
                .iter()
                .map(|(key, field)| (key.clone(), field.to_json()))
                .collect(),
        )
    }

    /// Runs the first expansion pass of `template` against this document.
    ///
    /// `{name}` and `{name[key]...}` are replaced by the referenced value;
    /// `{{` and `}}` are left as single braces for the second pass.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] for references to absent
    /// fields, [`ResourceError::UnresolvableField`] for references to arrays
    /// or objects, and [`ResourceError::Template`] for malformed templates.
    pub fn format_template(&self, template: &str) -> Result<String, ResourceError> {
        template::format_fields(template, |field: &FieldRef<'_>| self.render_field(field))
    }

    /// Resolves a relation to a concrete URL without fetching it.
    ///
    /// A string field named `property` is used as an absolute URL template.
    /// Otherwise the kind's default template for `property` goes through
    /// [`Resource::format_template`] and the result is relative.
    /// Either way `args` are then substituted by RFC 6570 expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRelation`] if neither source provides
    /// the relation, plus any error of [`Resource::format_template`].
    pub fn resolve_related(
        &self,
        property: &str,
        args: &[(&str, &str)],
    ) -> Result<RelatedUrl, ResourceError> {
        if let Some(embedded) = self.document.get(property).and_then(Field::as_str) {
            return Ok(RelatedUrl::Absolute(template::expand(embedded, args)));
        }

        let default = self
            .kind
            .default_url(property)
            .ok_or_else(|| ResourceError::InvalidRelation {
                resource: self.kind.name,
                relation: property.to_string(),
            })?;
        let partial = self.format_template(default)?;
        Ok(RelatedUrl::Relative(template::expand(&partial, args)))
    }

    /// Fetches a related single resource.
    ///
    /// # Errors
    ///
    /// Any error of [`Resource::resolve_related`], transport errors, and
    /// construction errors for the fetched document.
    pub async fn fetch_related_resource<T: ResourceType>(
        &self,
        property: &str,
        args: &[(&str, &str)],
    ) -> Result<T, ResourceError> {
        let url = self.resolve_related(property, args)?;
        tracing::debug!(
            resource = self.kind.name,
            relation = property,
            url = %url,
            "Fetching related resource"
        );
        match url {
            RelatedUrl::Absolute(url) => self.client.get_absolute(&url).await,
            RelatedUrl::Relative(path) => self.client.get_relative(&path).await,
        }
    }

    /// Fetches a related paginated collection.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::fetch_related_resource`], with
    /// [`ResourceError::UnexpectedShape`] if the body is not an array.
    pub async fn fetch_related_collection<T: ResourceType>(
        &self,
        property: &str,
        args: &[(&str, &str)],
    ) -> Result<Collection<T>, ResourceError> {
        let url = self.resolve_related(property, args)?;
        tracing::debug!(
            resource = self.kind.name,
            relation = property,
            url = %url,
            "Fetching related collection"
        );
        match url {
            RelatedUrl::Absolute(url) => self.client.get_list_absolute(&url).await,
            RelatedUrl::Relative(path) => self.client.get_list_relative(&path).await,
        }
    }

    /// Re-fetches this resource from its canonical URL.
    ///
    /// The document, rate-limit snapshot and links are replaced together once
    /// the new document has been fetched and coerced; on error the resource
    /// is unchanged. Concurrent refreshes are not coordinated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRelation`] for kinds without a
    /// canonical URL, plus template, transport and coercion errors.
    pub async fn refresh(&mut self) -> Result<(), ResourceError> {
        let template = self.kind.url.ok_or_else(|| ResourceError::InvalidRelation {
            resource: self.kind.name,
            relation: "url".to_string(),
        })?;
        let path = self.format_template(template)?;
        tracing::debug!(resource = self.kind.name, path = %path, "Refreshing resource");

        let fetched = self.client.fetch_relative(&path).await?;
        let refreshed = Self::from_fetched(self.kind, self.client.clone(), fetched)?;

        self.document = refreshed.document;
        self.rate_limit = refreshed.rate_limit;
        self.links = refreshed.links;
        Ok(())
    }

    fn type_error(&self, name: &str, field: &Field, expected: &str) -> ResourceError {
        ResourceError::FieldType {
            resource: self.kind.name,
            field: name.to_string(),
            source: serde_json::Error::invalid_type(field.unexpected(), &expected),
        }
    }

    fn render_field(&self, field: &FieldRef<'_>) -> Result<String, ResourceError> {
        let reference = || {
            field
                .keys
                .iter()
                .fold(field.name.to_string(), |acc, key| format!("{acc}[{key}]"))
        };

        let mut current = Slot::Field(self.get(field.name)?);
        for key in &field.keys {
            let next = match current {
                Slot::Field(Field::Resource(r)) => r.document.get(*key).map(Slot::Field),
                Slot::Field(Field::Value(v)) | Slot::Value(v) => index_value(v, key).map(Slot::Value),
                Slot::Field(Field::Timestamp(_)) => None,
            };
            current = next.ok_or_else(|| ResourceError::MissingField {
                resource: self.kind.name,
                field: reference(),
            })?;
        }

        current
            .render()
            .ok_or_else(|| ResourceError::UnresolvableField {
                resource: self.kind.name,
                field: reference(),
            })
    }
}

impl ResourceType for Resource {
    fn kind() -> &'static ResourceKind {
        &GENERIC_KIND
    }

    fn from_resource(resource: Resource) -> Self {
        resource
    }

    fn resource(&self) -> &Resource {
        self
    }

    fn into_resource(self) -> Resource {
        self
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.document == other.document
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.kind.name)
            .field("document", &self.document)
            .field("rate_limit", &self.rate_limit)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[derive(Clone, Copy)]
enum Slot<'a> {
    Field(&'a Field),
    Value(&'a Value),
}

impl Slot<'_> {
    fn render(self) -> Option<String> {
        let value = match self {
            Self::Field(Field::Timestamp(ts)) => return Some(format_timestamp(ts)),
            Self::Field(Field::Resource(_)) => return None,
            Self::Field(Field::Value(v)) | Self::Value(v) => v,
        };
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn index_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

fn coerce(
    kind: &'static ResourceKind,
    client: &RestClient,
    rate_limit: Option<&RateLimit>,
    document: Document,
) -> Result<Document, ResourceError> {
    document
        .into_iter()
        .map(|(key, field)| {
            let field = coerce_field(kind, client, rate_limit, &key, field)?;
            Ok((key, field))
        })
        .collect()
}

fn coerce_field(
    kind: &'static ResourceKind,
    client: &RestClient,
    rate_limit: Option<&RateLimit>,
    key: &str,
    field: Field,
) -> Result<Field, ResourceError> {
    if key.ends_with(TIMESTAMP_SUFFIX) {
        return match field {
            Field::Value(Value::String(text)) => parse_timestamp(key, &text).map(Field::Timestamp),
            other => Ok(other),
        };
    }

    let Some(nested_kind) = kind.nested_kind(key) else {
        return Ok(field);
    };

    match field {
        Field::Value(Value::Object(map)) => Resource::new(
            nested_kind,
            client.clone(),
            map,
            rate_limit.cloned(),
            LinkSet::default(),
        )
        .map(|r| Field::Resource(Box::new(r))),
        Field::Resource(nested) => nested
            .into_kind(nested_kind)
            .map(|r| Field::Resource(Box::new(r))),
        other => Ok(other),
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y/%m/%d %H:%M:%S %z",
];

/// Parses a timestamp in RFC 3339 or one of the variants the API has used.
///
/// Accepted besides RFC 3339: `+hhmm` offsets without a colon, a space
/// instead of `T`, slash-separated dates with an offset, and offset-less
/// times, which are taken as UTC.
///
/// # Errors
///
/// Returns [`ResourceError::TimestampParse`] carrying the RFC 3339 parser's
/// error if no format matches.
pub fn parse_timestamp(field: &str, text: &str) -> Result<DateTime<Utc>, ResourceError> {
    let text = text.trim();
    let rfc3339_error = match DateTime::parse_from_rfc3339(text) {
        Ok(ts) => return Ok(ts.with_timezone(&Utc)),
        Err(e) => e,
    };

    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
        .map(|ts| ts.with_timezone(&Utc));
    let naive = || {
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|ts| ts.and_utc())
    };

    with_offset
        .or_else(naive)
        .ok_or_else(|| ResourceError::TimestampParse {
            field: field.to_string(),
            value: text.to_string(),
            source: rfc3339_error,
        })
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
