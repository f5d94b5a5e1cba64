//! Transport seam: request/response values and the adapter that sends them.
//!
//! The pipeline core is agnostic to how requests reach the network. It builds
//! an [`ApiRequest`], hands it to a [`Transport`], and gets back an
//! [`ApiResponse`] whose content has already been JSON-decoded. The default
//! implementation is [`HttpTransport`] over reqwest; tests substitute
//! [`crate::mocks::MockTransport`].

use crate::config::ClientConfig;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

/// An outgoing API request. Constructed fresh for every call, never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Full URL including the API origin and any query string.
    pub url: String,
    /// Header name/value pairs, in the order they will be sent.
    pub headers: Vec<(String, String)>,
    /// Pre-serialized body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns true if a header with this name is present (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(header, _)| header.eq_ignore_ascii_case(name))
    }

    /// Returns the first value of a header, if present (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw API response: status code plus JSON-decoded content.
///
/// Lifetime is call-scoped; the pipeline either consumes it during
/// classification or hands it back to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body. Empty bodies decode to `Value::Null`; non-JSON bodies
    /// are carried as `Value::String`.
    pub content: Value,
}

/// Sends a constructed request and returns the raw response.
///
/// Implementations own connection handling, TLS, timeouts, and cancellation.
/// The pipeline performs no retries: any error returned here propagates
/// straight to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatches the request.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with pool and timeout settings from the config.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                Error::InvalidConfiguration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.http.request(request.method.clone(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        debug!(method = %request.method, url = %request.url, status, "request completed");

        let content = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok(ApiResponse { status, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers() {
        let request = ApiRequest::new(Method::GET, "https://api.github.com/user")
            .with_header("Accept", "application/json");

        assert!(request.has_header("accept"));
        assert!(!request.has_header("Authorization"));
        assert_eq!(request.header("ACCEPT"), Some("application/json"));
    }

    #[test]
    fn test_request_body() {
        let request = ApiRequest::new(Method::POST, "https://api.github.com/gists")
            .with_body(r#"{"description":"hi"}"#);

        assert_eq!(request.body.as_deref(), Some(r#"{"description":"hi"}"#));
    }
}
