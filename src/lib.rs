//! # GitHub v3 API Client
//!
//! A client for the GitHub REST API v3 built around a single request
//! pipeline:
//! - Explicit authentication lifecycle (set credentials, login, logout)
//! - Basic and token authenticator strategies
//! - Pluggable transport for testing and custom dispatch
//! - Exact response classification (content, no-content, not-found)
//! - Thin resource services for users, repos, gists, issues and orgs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_v3_client::{Basic, GitHubClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = GitHubClient::new(ClientConfig::default())?;
//!
//!     // Anonymous calls work immediately.
//!     let user = client.users().get(Some("octocat")).await?;
//!     println!("{:?}", user.into_content());
//!
//!     // Authenticated calls need the explicit lifecycle.
//!     client.set_credentials(Basic::new("username", "password"));
//!     client.login()?;
//!     let me = client.users().get(None).await?;
//!     println!("{:?}", me.into_content());
//!     client.logout(true);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;
pub mod transport;

// Pagination and media-format helpers
pub mod media;
pub mod pagination;

// API Services
pub mod services;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use auth::{AuthState, Authenticator, Basic, Token};
pub use client::{build_params, GitHubClient, GitHubClientBuilder, Headers, Outcome, Params};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use errors::{Error, Result};
pub use media::MediaFormat;
pub use pagination::{PageParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
