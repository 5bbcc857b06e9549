//! Error types for the resource layer.
//!
//! [`ResourceError`] covers everything that can go wrong while reading fields,
//! resolving related URLs, coercing documents and paging through collections.
//! Transport failures are carried unchanged in [`ResourceError::Http`].
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::rest::ResourceError;
//!
//! match repo.get_branch("main").await {
//!     Ok(branch) => println!("Head: {}", branch.name()?),
//!     Err(ResourceError::InvalidRelation { resource, relation }) => {
//!         println!("{resource} has no relation {relation}");
//!     }
//!     Err(ResourceError::Http(e)) => println!("Transport failure: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{HttpError, RestError};
use crate::rest::template::TemplateError;
use thiserror::Error;

/// Error type for resource and collection operations.
///
/// # Example
///
/// ```rust
/// use github_api::rest::ResourceError;
///
/// let error = ResourceError::MissingField {
///     resource: "Repo",
///     field: "language".to_string(),
/// };
/// assert_eq!(error.to_string(), "Repo has no field 'language'");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A field was read that is absent from the current document.
    #[error("{resource} has no field '{field}'")]
    MissingField {
        /// The kind name of the resource (e.g. "Repo").
        resource: &'static str,
        /// The requested field.
        field: String,
    },

    /// A relation was followed that neither the document nor the kind's
    /// default URL table provides, or `next` was requested on a collection
    /// without a `next` link.
    #[error("{resource} has no relation '{relation}'")]
    InvalidRelation {
        /// The kind name of the resource or collection.
        resource: &'static str,
        /// The relation that was requested.
        relation: String,
    },

    /// A `*_at` field held text that is not a recognised date-time.
    #[error("Cannot parse '{value}' in field '{field}' as a timestamp: {source}")]
    TimestampParse {
        /// The field being coerced.
        field: String,
        /// The raw value.
        value: String,
        /// The final parser error.
        #[source]
        source: chrono::ParseError,
    },

    /// A response body did not have the expected JSON shape.
    #[error("Expected {expected} for {resource}, got {actual}")]
    UnexpectedShape {
        /// The kind name being constructed.
        resource: &'static str,
        /// The expected shape (e.g. "an object").
        expected: &'static str,
        /// The JSON type actually received.
        actual: &'static str,
    },

    /// A template referenced a field that cannot be rendered into a URL.
    #[error("Field '{field}' of {resource} cannot be substituted into a URL")]
    UnresolvableField {
        /// The kind name of the resource.
        resource: &'static str,
        /// The field reference, e.g. `owner[login]`.
        field: String,
    },

    /// A field value could not be converted to the requested type.
    #[error("Field '{field}' of {resource} has an unexpected type: {source}")]
    FieldType {
        /// The kind name of the resource.
        resource: &'static str,
        /// The field that was read.
        field: String,
        /// The conversion error.
        #[source]
        source: serde_json::Error,
    },

    /// A URL template was malformed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The transport failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The REST client rejected the request before sending it.
    #[error(transparent)]
    Rest(RestError),
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(e) => Self::Http(e),
            other => Self::Rest(other),
        }
    }
}

impl ResourceError {
    /// Returns the transport error, if this is one.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    ///
    /// Useful for debugging and error reporting.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::MaxRetries(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Names the JSON type of a value for [`ResourceError::UnexpectedShape`].
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
