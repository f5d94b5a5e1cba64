//! GitHub API client: the pipeline every resource wrapper funnels through.
//!
//! [`GitHubClient`] owns the authentication lifecycle, builds one request
//! per call, applies the stored [`Authenticator`] while logged in, hands
//! the request to the [`Transport`], and classifies the raw response into
//! an [`Outcome`] or an error.

use crate::auth::{AuthState, Authenticator};
use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::errors::{Error, Result};
use crate::services::{
    GistsService, IssuesService, OrganizationsService, RepositoriesService, UsersService,
};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Ordered request parameters. GET requests encode these as the query
/// string; other verbs JSON-serialize them into the body.
pub type Params = serde_json::Map<String, Value>;

/// Header name/value pairs merged into a request after the defaults.
pub type Headers = Vec<(String, String)>;

// Status codes the classification switch distinguishes.
const HTTP_STATUS_OK: u16 = 200;
const HTTP_STATUS_CREATED: u16 = 201;
const HTTP_STATUS_NO_CONTENT: u16 = 204;
const HTTP_STATUS_UNAUTHORIZED: u16 = 401;
const HTTP_STATUS_NOT_FOUND: u16 = 404;

/// Builds a parameter map from key/value pairs, dropping null values and
/// preserving key order.
///
/// Update-style endpoints treat many fields as optional, and sending a
/// null the API would reject is worse than omitting the key. Callers pass
/// `Value::Null` for absent fields and this filter removes them:
///
/// ```
/// use github_v3_client::build_params;
/// use serde_json::{json, Value};
///
/// let params = build_params([("title", json!("deploy key")), ("key", Value::Null)]);
/// assert!(params.contains_key("title"));
/// assert!(!params.contains_key("key"));
/// ```
pub fn build_params<K, I>(raw: I) -> Params
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    raw.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.into(), value))
        .collect()
}

/// Classified result of an API call.
///
/// The mapping from HTTP status to variant is the contract every resource
/// wrapper depends on:
///
/// | status                  | result                       |
/// |-------------------------|------------------------------|
/// | 200, 201                | `Content` with the body      |
/// | 204                     | `NoContent` (affirmative)    |
/// | 404                     | `NotFound` (negative)        |
/// | 401                     | `Error::AuthenticationRequired` |
/// | 400, 422, anything else | `Other` with the raw response |
///
/// 400 and 422 responses carry validation detail the caller may want to
/// inspect, so they are data rather than errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 200 or 201: the response content, unchanged.
    Content(Value),
    /// 204: the operation succeeded with nothing to return.
    NoContent,
    /// 404: the resource does not exist (or is hidden from this caller).
    NotFound,
    /// 400, 422, or any unclassified status: the raw response for
    /// inspection.
    Other(ApiResponse),
}

impl Outcome {
    /// Consumes the outcome, returning the content for 200/201 results.
    pub fn into_content(self) -> Option<Value> {
        match self {
            Self::Content(value) => Some(value),
            _ => None,
        }
    }

    /// Boolean view of existence-style calls: `NoContent` is true,
    /// `NotFound` is false.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::NoContent => Some(true),
            Self::NotFound => Some(false),
            _ => None,
        }
    }

    /// Returns true for 200/201/204 results.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Content(_) | Self::NoContent)
    }

    /// Borrows the raw response of an unclassified outcome.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Other(response) => Some(response),
            _ => None,
        }
    }
}

/// GitHub API client.
///
/// Authentication state is per-instance and not safe for concurrent
/// mutation; the lifecycle methods take `&mut self` so the borrow checker
/// serializes them against in-flight requests on the same instance.
pub struct GitHubClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    authenticator: Option<Box<dyn Authenticator>>,
    logged_in: bool,
}

impl GitHubClient {
    /// Creates a client with the reqwest-backed transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over a caller-supplied transport. Used by tests to
    /// substitute a mock, and by anything else that wants to own dispatch.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            authenticator: None,
            logged_in: false,
        }
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // Authentication lifecycle

    /// Stores an authenticator. Does not log in: a call to [`login`] must
    /// be made as well. Overwrites any previously stored authenticator.
    ///
    /// [`login`]: GitHubClient::login
    pub fn set_credentials(&mut self, authenticator: impl Authenticator + 'static) {
        self.authenticator = Some(Box::new(authenticator));
    }

    /// Discards the stored authenticator.
    ///
    /// Fails while logged in; call [`logout`] first.
    ///
    /// [`logout`]: GitHubClient::logout
    pub fn clear_credentials(&mut self) -> Result<()> {
        if self.logged_in {
            return Err(Error::api("must logout first"));
        }
        self.authenticator = None;
        Ok(())
    }

    /// Applies authentication to all subsequent calls.
    ///
    /// Fails if no credentials have been set.
    pub fn login(&mut self) -> Result<()> {
        if self.authenticator.is_none() {
            return Err(Error::api("credentials not set"));
        }
        self.logged_in = true;
        Ok(())
    }

    /// Cancels authentication for subsequent calls. When
    /// `clear_credentials` is true the stored authenticator is discarded
    /// as well; otherwise it is kept and a later [`login`] reuses it.
    ///
    /// [`login`]: GitHubClient::login
    pub fn logout(&mut self, clear_credentials: bool) {
        self.logged_in = false;
        if clear_credentials {
            self.authenticator = None;
        }
    }

    /// Returns true if authentication is applied to subsequent calls.
    pub fn is_authenticated(&self) -> bool {
        self.logged_in
    }

    /// Current authentication lifecycle state.
    pub fn auth_state(&self) -> AuthState {
        if self.logged_in {
            AuthState::LoggedIn
        } else if self.authenticator.is_some() {
            AuthState::CredentialsSet
        } else {
            AuthState::NoCredentials
        }
    }

    // Resource services

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Gets the gists service.
    pub fn gists(&self) -> GistsService<'_> {
        GistsService::new(self)
    }

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    // HTTP verbs

    /// Makes a GET request. Parameters are encoded as the query string.
    pub async fn get(&self, path: &str, params: Params, headers: Headers) -> Result<Outcome> {
        self.request(Method::GET, path, params, headers).await
    }

    /// Makes a POST request. Parameters are JSON-serialized into the body.
    pub async fn post(&self, path: &str, params: Params, headers: Headers) -> Result<Outcome> {
        self.request(Method::POST, path, params, headers).await
    }

    /// Makes a PUT request. Parameters are JSON-serialized into the body.
    pub async fn put(&self, path: &str, params: Params, headers: Headers) -> Result<Outcome> {
        self.request(Method::PUT, path, params, headers).await
    }

    /// Makes a PATCH request. Parameters are JSON-serialized into the body.
    pub async fn patch(&self, path: &str, params: Params, headers: Headers) -> Result<Outcome> {
        self.request(Method::PATCH, path, params, headers).await
    }

    /// Makes a DELETE request. Parameters are JSON-serialized into the body.
    pub async fn delete(&self, path: &str, params: Params, headers: Headers) -> Result<Outcome> {
        self.request(Method::DELETE, path, params, headers).await
    }

    // Internals

    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        headers: Headers,
    ) -> Result<Outcome> {
        let action = format!("{} {}", method, path.trim_start_matches('/'));
        let request = self.build_request(method, path, params, headers)?;

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.send(&request).await?;
        debug!(status = response.status, action = %action, "classifying response");

        self.process_response(response, &action)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        headers: Headers,
    ) -> Result<ApiRequest> {
        let mut url = self.build_url(path);
        let mut body = None;

        if method == Method::GET {
            if !params.is_empty() {
                let separator = if url.contains('?') { '&' } else { '?' };
                url = format!("{}{}{}", url, separator, encode_query(&params)?);
            }
        } else if !params.is_empty() {
            body = Some(serde_json::to_string(&params)?);
        }

        let mut request =
            ApiRequest::new(method, url).with_header("User-Agent", self.config.user_agent.clone());

        if let Some(body) = body {
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        for (name, value) in headers {
            request = request.with_header(name, value);
        }

        if !request.has_header("Accept") {
            request = request.with_header("Accept", "application/json");
        }

        // Only a logged-in client authenticates. A missing authenticator
        // while logged in dispatches unauthenticated.
        if self.logged_in {
            if let Some(authenticator) = &self.authenticator {
                request = authenticator.authenticate(request);
            }
        }

        Ok(request)
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn process_response(&self, response: ApiResponse, action: &str) -> Result<Outcome> {
        match response.status {
            HTTP_STATUS_OK | HTTP_STATUS_CREATED => Ok(Outcome::Content(response.content)),
            HTTP_STATUS_NO_CONTENT => Ok(Outcome::NoContent),
            HTTP_STATUS_NOT_FOUND => Ok(Outcome::NotFound),
            HTTP_STATUS_UNAUTHORIZED => Err(Error::authentication_required(action)),
            _ => Ok(Outcome::Other(response)),
        }
    }
}

fn encode_query(params: &Params) -> Result<String> {
    let pairs: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect();

    serde_urlencoded::to_string(pairs)
        .map_err(|e| Error::api(format!("failed to encode query parameters: {}", e)))
}

/// Builder for [`GitHubClient`].
pub struct GitHubClientBuilder {
    config_builder: ClientConfigBuilder,
    transport: Option<Arc<dyn Transport>>,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: ClientConfig::builder(),
            transport: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Substitutes the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<GitHubClient> {
        let config = self.config_builder.build()?;
        match self.transport {
            Some(transport) => Ok(GitHubClient::with_transport(config, transport)),
            None => GitHubClient::new(config),
        }
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Basic;
    use serde_json::json;
    use test_case::test_case;

    fn test_client() -> GitHubClient {
        GitHubClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = test_client();
        assert_eq!(
            client.build_url("repos/octocat/hello-world"),
            "https://api.github.com/repos/octocat/hello-world"
        );
        assert_eq!(
            client.build_url("/repos/octocat/hello-world"),
            "https://api.github.com/repos/octocat/hello-world"
        );
    }

    #[test]
    fn test_build_params_drops_nulls_preserves_order() {
        let params = build_params([
            ("a", json!(1)),
            ("b", Value::Null),
            ("c", json!("x")),
        ]);

        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(params.get("a"), Some(&json!(1)));
        assert_eq!(params.get("c"), Some(&json!("x")));
    }

    #[test]
    fn test_get_request_encodes_query() {
        let client = test_client();
        let mut params = Params::new();
        params.insert("page".to_string(), json!(2));
        params.insert("per_page".to_string(), json!(50));

        let request = client
            .build_request(Method::GET, "user/repos", params, Vec::new())
            .unwrap();

        assert_eq!(
            request.url,
            "https://api.github.com/user/repos?page=2&per_page=50"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_post_request_serializes_body() {
        let client = test_client();
        let mut params = Params::new();
        params.insert("name".to_string(), json!("hello-world"));

        let request = client
            .build_request(Method::POST, "user/repos", params, Vec::new())
            .unwrap();

        assert_eq!(request.body.as_deref(), Some(r#"{"name":"hello-world"}"#));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_empty_params_means_no_body() {
        let client = test_client();
        let request = client
            .build_request(Method::PUT, "user/following/octocat", Params::new(), Vec::new())
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_caller_accept_header_wins() {
        let client = test_client();
        let headers = vec![(
            "Accept".to_string(),
            "application/vnd.github-issue.raw+json".to_string(),
        )];
        let request = client
            .build_request(Method::GET, "repos/o/r/issues/1", Params::new(), headers)
            .unwrap();

        assert_eq!(
            request.header("Accept"),
            Some("application/vnd.github-issue.raw+json")
        );
    }

    #[test]
    fn test_request_unauthenticated_until_login() {
        let mut client = test_client();
        client.set_credentials(Basic::new("user", "pass"));

        let request = client
            .build_request(Method::GET, "user", Params::new(), Vec::new())
            .unwrap();
        assert!(!request.has_header("Authorization"));

        client.login().unwrap();
        let request = client
            .build_request(Method::GET, "user", Params::new(), Vec::new())
            .unwrap();
        assert!(request.has_header("Authorization"));
    }

    #[test]
    fn test_state_machine() {
        let mut client = test_client();
        assert_eq!(client.auth_state(), AuthState::NoCredentials);

        // login without credentials fails and leaves state alone
        assert!(client.login().is_err());
        assert_eq!(client.auth_state(), AuthState::NoCredentials);

        client.set_credentials(Basic::new("user", "pass"));
        assert_eq!(client.auth_state(), AuthState::CredentialsSet);
        assert!(!client.is_authenticated());

        client.login().unwrap();
        assert_eq!(client.auth_state(), AuthState::LoggedIn);
        assert!(client.is_authenticated());

        // clearing while logged in fails and performs no state change
        assert!(client.clear_credentials().is_err());
        assert_eq!(client.auth_state(), AuthState::LoggedIn);

        client.logout(false);
        assert_eq!(client.auth_state(), AuthState::CredentialsSet);

        // credentials kept, so login works again
        client.login().unwrap();
        client.logout(true);
        assert_eq!(client.auth_state(), AuthState::NoCredentials);
    }

    #[test]
    fn test_clear_credentials_when_not_logged_in() {
        let mut client = test_client();
        client.set_credentials(Basic::new("user", "pass"));
        client.clear_credentials().unwrap();
        assert_eq!(client.auth_state(), AuthState::NoCredentials);
    }

    #[test_case(200 => true ; "ok")]
    #[test_case(201 => true ; "created")]
    #[test_case(204 => true ; "no content")]
    #[test_case(400 => false ; "bad request")]
    #[test_case(404 => false ; "not found")]
    #[test_case(422 => false ; "unprocessable")]
    #[test_case(500 => false ; "server error")]
    fn test_success_by_status(status: u16) -> bool {
        let client = test_client();
        client
            .process_response(ApiResponse { status, content: Value::Null }, "GET x")
            .unwrap()
            .is_success()
    }

    #[test]
    fn test_process_response_classification() {
        let client = test_client();
        let content = json!({"login": "octocat"});

        let ok = client
            .process_response(ApiResponse { status: 200, content: content.clone() }, "GET user")
            .unwrap();
        assert_eq!(ok, Outcome::Content(content.clone()));

        let created = client
            .process_response(ApiResponse { status: 201, content: content.clone() }, "POST gists")
            .unwrap();
        assert_eq!(created, Outcome::Content(content));

        let no_content = client
            .process_response(ApiResponse { status: 204, content: Value::Null }, "PUT x")
            .unwrap();
        assert_eq!(no_content.as_bool(), Some(true));

        let not_found = client
            .process_response(ApiResponse { status: 404, content: Value::Null }, "GET x")
            .unwrap();
        assert_eq!(not_found.as_bool(), Some(false));

        let unauthorized =
            client.process_response(ApiResponse { status: 401, content: Value::Null }, "GET user");
        assert!(unauthorized.unwrap_err().is_authentication());

        let unprocessable = client
            .process_response(
                ApiResponse { status: 422, content: json!({"message": "Validation Failed"}) },
                "POST x",
            )
            .unwrap();
        assert_eq!(unprocessable.response().unwrap().status, 422);

        let teapot = client
            .process_response(ApiResponse { status: 418, content: Value::Null }, "GET x")
            .unwrap();
        assert_eq!(teapot.response().unwrap().status, 418);
    }
}
