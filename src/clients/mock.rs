//! Canned-response transport for testing code built on the resource layer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::RequestTarget;
use crate::clients::transport::{Fetched, Transport};

#[derive(Clone, Debug)]
enum MockOutcome {
    Ok(Fetched),
    Status { code: u16, message: String },
}

/// A [`Transport`] that replays registered responses and records every
/// request it receives.
///
/// Responses are registered per target. When several responses are queued for
/// the same target they are served in order and the last one is repeated.
/// Unregistered targets fail with a 404 [`HttpError::Response`].
///
/// # Example
///
/// ```rust
/// use github_api::clients::{Fetched, MockTransport, Transport};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mock = MockTransport::new();
/// mock.on_relative("users/octocat", Fetched::new(json!({"login": "octocat"})));
///
/// let fetched = mock.get_relative("users/octocat").await.unwrap();
/// assert_eq!(fetched.body["login"], "octocat");
/// assert_eq!(mock.request_count(), 1);
/// # });
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<RequestTarget, VecDeque<MockOutcome>>>>,
    requests: Arc<Mutex<Vec<RequestTarget>>>,
}

impl MockTransport {
    /// Creates a transport with no registered responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response for a relative path.
    pub fn on_relative(&self, path: impl Into<String>, fetched: Fetched) -> &Self {
        self.push(RequestTarget::Relative(path.into()), MockOutcome::Ok(fetched))
    }

    /// Queues a successful response for an absolute URL.
    pub fn on_absolute(&self, url: impl Into<String>, fetched: Fetched) -> &Self {
        self.push(RequestTarget::Absolute(url.into()), MockOutcome::Ok(fetched))
    }

    /// Queues a failing status for a relative path.
    pub fn fail_relative(&self, path: impl Into<String>, code: u16) -> &Self {
        self.push(RequestTarget::Relative(path.into()), Self::status(code))
    }

    /// Queues a failing status for an absolute URL.
    pub fn fail_absolute(&self, url: impl Into<String>, code: u16) -> &Self {
        self.push(RequestTarget::Absolute(url.into()), Self::status(code))
    }

    /// Returns every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RequestTarget> {
        lock(&self.requests).clone()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn status(code: u16) -> MockOutcome {
        MockOutcome::Status {
            code,
            message: format!(r#"{{"message":"mock status {code}"}}"#),
        }
    }

    fn push(&self, target: RequestTarget, outcome: MockOutcome) -> &Self {
        lock(&self.responses)
            .entry(target)
            .or_default()
            .push_back(outcome);
        self
    }

    fn respond(&self, target: RequestTarget) -> Result<Fetched, HttpError> {
        lock(&self.requests).push(target.clone());

        let outcome = {
            let mut responses = lock(&self.responses);
            responses.get_mut(&target).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match outcome {
            Some(MockOutcome::Ok(fetched)) => Ok(fetched),
            Some(MockOutcome::Status { code, message }) => {
                Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_reference: None,
                }))
            }
            None => Err(HttpError::Response(HttpResponseError {
                code: 404,
                message: format!(r#"{{"message":"Not Found","target":"{target}"}}"#),
                error_reference: None,
            })),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_relative(&self, path: &str) -> Result<Fetched, HttpError> {
        self.respond(RequestTarget::Relative(path.to_string()))
    }

    async fn get_absolute(&self, url: &str) -> Result<Fetched, HttpError> {
        self.respond(RequestTarget::Absolute(url.to_string()))
    }
}
