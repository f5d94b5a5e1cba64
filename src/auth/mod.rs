//! Authentication strategies for the GitHub API.
//!
//! An [`Authenticator`] embeds credentials into an outgoing request. Two
//! strategies are provided: [`Basic`] (username/password header) and
//! [`Token`] (OAuth access token appended to the URL). The client applies
//! the stored strategy only while logged in; see
//! [`crate::client::GitHubClient::login`].

use crate::transport::ApiRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};

/// Authentication lifecycle state.
///
/// Transitions:
/// - `NoCredentials --set_credentials--> CredentialsSet`
/// - `CredentialsSet --login--> LoggedIn`
/// - `LoggedIn --logout--> CredentialsSet` (or `NoCredentials` when clearing)
/// - `CredentialsSet --clear_credentials--> NoCredentials`
///
/// `login` without credentials and `clear_credentials` while logged in are
/// errors that leave the state unchanged. There is no terminal state; a
/// client is reusable across many login/logout cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No authenticator stored.
    NoCredentials,
    /// An authenticator is stored but not applied to requests.
    CredentialsSet,
    /// The stored authenticator is applied to every request.
    LoggedIn,
}

/// Strategy that embeds credentials into an outgoing request.
///
/// Implementations are pure transformations on the request value and have
/// no side effects on the authenticator itself.
pub trait Authenticator: Send + Sync {
    /// Returns the request with credentials embedded.
    fn authenticate(&self, request: ApiRequest) -> ApiRequest;
}

/// Basic HTTP authentication.
#[derive(Debug)]
pub struct Basic {
    username: String,
    password: SecretString,
}

impl Basic {
    /// Creates the strategy with a username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replaces the username.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Gets the password.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Replaces the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::new(password.into());
    }
}

impl Authenticator for Basic {
    fn authenticate(&self, request: ApiRequest) -> ApiRequest {
        let encoded = STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        request.with_header("Authorization", format!("Basic {}", encoded))
    }
}

/// OAuth access token authentication.
///
/// The token is carried as an `access_token` query parameter on the
/// request URL.
#[derive(Debug)]
pub struct Token {
    access_token: SecretString,
}

impl Token {
    /// Creates the strategy with an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
        }
    }

    /// Gets the access token.
    pub fn token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Replaces the access token.
    pub fn set_token(&mut self, access_token: impl Into<String>) {
        self.access_token = SecretString::new(access_token.into());
    }
}

impl Authenticator for Token {
    fn authenticate(&self, mut request: ApiRequest) -> ApiRequest {
        let separator = if request.url.contains('?') { '&' } else { '?' };
        request.url = format!(
            "{}{}access_token={}",
            request.url,
            separator,
            self.access_token.expose_secret()
        );
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_basic_adds_authorization_header() {
        let auth = Basic::new("user", "pass");
        let request = auth.authenticate(ApiRequest::new(Method::GET, "https://api.github.com/user"));

        let header = request.header("Authorization").unwrap();
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "user:pass");
    }

    #[test]
    fn test_basic_accessors() {
        let mut auth = Basic::new("user", "pass");
        assert_eq!(auth.username(), "user");
        assert_eq!(auth.password(), "pass");

        auth.set_username("other");
        auth.set_password("secret");
        assert_eq!(auth.username(), "other");
        assert_eq!(auth.password(), "secret");
    }

    #[test]
    fn test_token_appends_query_string() {
        let auth = Token::new("T");
        let request = auth.authenticate(ApiRequest::new(Method::GET, "https://api.github.com/user"));
        assert_eq!(request.url, "https://api.github.com/user?access_token=T");
    }

    #[test]
    fn test_token_extends_existing_query_string() {
        let auth = Token::new("T");
        let request = auth.authenticate(ApiRequest::new(
            Method::GET,
            "https://api.github.com/users?name=x",
        ));
        assert_eq!(request.url, "https://api.github.com/users?name=x&access_token=T");
    }

    #[test]
    fn test_token_accessor() {
        let mut auth = Token::new("T");
        assert_eq!(auth.token(), "T");
        auth.set_token("U");
        assert_eq!(auth.token(), "U");
    }
}
