//! Mock transport for testing without a network.
//!
//! [`MockTransport`] implements [`Transport`] over an in-memory response
//! registry keyed by method and path, and records every request it sees
//! so tests can assert on what the pipeline actually dispatched.

use crate::errors::{Error, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;

/// Behavior when no response is registered for a request.
#[derive(Debug, Clone, Copy, Default)]
pub enum DefaultBehavior {
    /// Answer 404, as the live API does for unknown routes.
    #[default]
    NotFound,
    /// Fail the call with a transport-level error.
    Error,
    /// Panic, for tests that must enumerate every expected request.
    Panic,
}

/// A canned response for [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Parsed response body.
    pub content: Value,
}

impl MockResponse {
    /// 200 with the given body.
    pub fn ok(content: Value) -> Self {
        Self { status: 200, content }
    }

    /// 201 with the given body.
    pub fn created(content: Value) -> Self {
        Self { status: 201, content }
    }

    /// 204 with an empty body.
    pub fn no_content() -> Self {
        Self { status: 204, content: Value::Null }
    }

    /// 404 with the API's standard error shape.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            content: json!({"message": "Not Found"}),
        }
    }

    /// 401 with the API's standard error shape.
    pub fn unauthorized() -> Self {
        Self {
            status: 401,
            content: json!({"message": "Requires authentication"}),
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            content: json!({"message": message}),
        }
    }

    /// 422 with per-field validation errors.
    pub fn validation_failed(errors: Value) -> Self {
        Self {
            status: 422,
            content: json!({"message": "Validation Failed", "errors": errors}),
        }
    }

    /// 500 with the given message.
    pub fn server_error(message: &str) -> Self {
        Self {
            status: 500,
            content: json!({"message": message}),
        }
    }
}

impl From<MockResponse> for ApiResponse {
    fn from(mock: MockResponse) -> Self {
        ApiResponse {
            status: mock.status,
            content: mock.content,
        }
    }
}

/// A request recorded by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Full request URL, query string included.
    pub url: String,
    /// Headers as sent.
    pub headers: Vec<(String, String)>,
    /// Serialized body, if any.
    pub body: Option<String>,
    /// When the transport saw the request.
    pub timestamp: DateTime<Utc>,
}

impl RecordedRequest {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct ResponseStore {
    responses: HashMap<String, Vec<MockResponse>>,
}

/// In-memory [`Transport`] with a response registry and request history.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RwLock<ResponseStore>,
    requests: RwLock<Vec<RecordedRequest>>,
    default_behavior: DefaultBehavior,
}

impl MockTransport {
    /// Creates a mock transport that answers 404 for unmatched requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the behavior for unmatched requests.
    pub fn with_default_behavior(mut self, behavior: DefaultBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    /// Registers a response for a method and path. Responses queue up:
    /// repeated registrations for the same key are consumed in order.
    pub fn register(&self, method: &str, path: &str, response: MockResponse) {
        let key = registry_key(method, path);
        let mut store = self.responses.write().unwrap();
        store.responses.entry(key).or_default().push(response);
    }

    /// Registers a GET response.
    pub fn on_get(&self, path: &str, response: MockResponse) {
        self.register("GET", path, response);
    }

    /// Registers a POST response.
    pub fn on_post(&self, path: &str, response: MockResponse) {
        self.register("POST", path, response);
    }

    /// Registers a PUT response.
    pub fn on_put(&self, path: &str, response: MockResponse) {
        self.register("PUT", path, response);
    }

    /// Registers a PATCH response.
    pub fn on_patch(&self, path: &str, response: MockResponse) {
        self.register("PATCH", path, response);
    }

    /// Registers a DELETE response.
    pub fn on_delete(&self, path: &str, response: MockResponse) {
        self.register("DELETE", path, response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Gets the most recently recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().unwrap().last().cloned()
    }

    /// Checks whether a request for a method and path was made.
    pub fn verify_request(&self, method: &str, path: &str) -> bool {
        self.requests.read().unwrap().iter().any(|r| {
            r.method.eq_ignore_ascii_case(method) && request_path(&r.url).as_deref() == Some(path)
        })
    }

    /// Number of requests recorded so far.
    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// Clears recorded requests and registered responses.
    pub fn reset(&self) {
        self.requests.write().unwrap().clear();
        self.responses.write().unwrap().responses.clear();
    }

    fn take_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        let key = registry_key(method, path);
        let mut store = self.responses.write().unwrap();
        let queue = store.responses.get_mut(&key)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }
}

fn registry_key(method: &str, path: &str) -> String {
    format!("{} /{}", method.to_uppercase(), path.trim_start_matches('/'))
}

fn request_path(request_url: &str) -> Option<String> {
    url::Url::parse(request_url)
        .ok()
        .map(|parsed| parsed.path().to_string())
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        {
            let mut requests = self.requests.write().unwrap();
            requests.push(RecordedRequest {
                method: request.method.to_string(),
                url: request.url.clone(),
                headers: request.headers.clone(),
                body: request.body.clone(),
                timestamp: Utc::now(),
            });
        }

        let path = request_path(&request.url)
            .ok_or_else(|| Error::api(format!("unparseable request url: {}", request.url)))?;

        match self.take_response(request.method.as_str(), &path) {
            Some(response) => Ok(response.into()),
            None => match self.default_behavior {
                DefaultBehavior::NotFound => Ok(MockResponse::not_found().into()),
                DefaultBehavior::Error => Err(Error::api(format!(
                    "no mock response for {} {}",
                    request.method, path
                ))),
                DefaultBehavior::Panic => {
                    panic!("no mock response for {} {}", request.method, path)
                }
            },
        }
    }
}
