//! Error types for the GitHub client.

use thiserror::Error;

/// Result type alias for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
///
/// Only two situations are treated as exceptional: the remote API reporting
/// 401, and local misuse of the client (authentication lifecycle violations,
/// unsupported option values). Statuses such as 400 and 422 are returned to
/// the caller as data via [`crate::client::Outcome`] so the response can be
/// inspected.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote API rejected the call with 401 Unauthorized.
    #[error("Unauthorized: Authentication required for [{action}]")]
    AuthenticationRequired {
        /// The attempted action, as `METHOD path`.
        action: String,
    },

    /// Local misuse of the client: login without credentials, clearing
    /// credentials while logged in, or an unsupported enumerated option.
    #[error("{0}")]
    Api(String),

    /// The transport failed to deliver the request. Propagated immediately,
    /// never retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request parameters or a response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client was constructed with an invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Creates an API misuse error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates an authentication error for the given attempted action.
    pub fn authentication_required(action: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            action: action.into(),
        }
    }

    /// Returns true if this error is the remote API demanding authentication.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_display() {
        let error = Error::authentication_required("GET user/emails");
        let display = format!("{}", error);
        assert!(display.contains("Authentication required"));
        assert!(display.contains("GET user/emails"));
    }

    #[test]
    fn test_api_error_display() {
        let error = Error::api("credentials not set");
        assert_eq!(format!("{}", error), "credentials not set");
    }

    #[test]
    fn test_is_authentication() {
        assert!(Error::authentication_required("GET user").is_authentication());
        assert!(!Error::api("must logout first").is_authentication());
    }
}
