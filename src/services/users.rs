//! User operations.

use crate::client::{build_params, GitHubClient, Headers, Outcome, Params};
use crate::errors::Result;
use crate::pagination::PageParams;
use serde_json::{json, Value};

/// Service for user operations.
///
/// Operations taking `username: Option<&str>` act on the authenticated
/// user when `None` is passed.
pub struct UsersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets a user by username, or the authenticated user.
    pub async fn get(&self, username: Option<&str>) -> Result<Outcome> {
        let path = match username {
            Some(name) => format!("users/{}", name),
            None => "user".to_string(),
        };
        self.client.get(&path, Params::new(), Headers::new()).await
    }

    /// Updates the authenticated user. Null-valued details are dropped
    /// before dispatch.
    pub async fn update(&self, details: Params) -> Result<Outcome> {
        let params = build_params(details);
        self.client.patch("user", params, Headers::new()).await
    }

    /// Lists followers for a user.
    pub async fn followers(&self, username: Option<&str>, page: PageParams) -> Result<Outcome> {
        let path = match username {
            Some(name) => format!("users/{}/followers", name),
            None => "user/followers".to_string(),
        };
        self.client.get(&path, page.to_params(), Headers::new()).await
    }

    /// Lists users a user is following.
    pub async fn following(&self, username: Option<&str>, page: PageParams) -> Result<Outcome> {
        let path = match username {
            Some(name) => format!("users/{}/following", name),
            None => "user/following".to_string(),
        };
        self.client.get(&path, page.to_params(), Headers::new()).await
    }

    /// Checks if the authenticated user is following a user. The outcome's
    /// [`Outcome::as_bool`] carries the answer.
    pub async fn is_following(&self, username: &str) -> Result<Outcome> {
        self.client
            .get(&format!("user/following/{}", username), Params::new(), Headers::new())
            .await
    }

    /// Follows a user.
    pub async fn follow(&self, username: &str) -> Result<Outcome> {
        self.client
            .put(&format!("user/following/{}", username), Params::new(), Headers::new())
            .await
    }

    /// Unfollows a user.
    pub async fn unfollow(&self, username: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("user/following/{}", username), Params::new(), Headers::new())
            .await
    }

    /// Provides access to email operations for the authenticated user.
    pub fn emails(&self) -> EmailsService<'a> {
        EmailsService::new(self.client)
    }

    /// Provides access to SSH key operations for the authenticated user.
    pub fn keys(&self) -> UserKeysService<'a> {
        UserKeysService::new(self.client)
    }
}

/// Email operations for the authenticated user.
pub struct EmailsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> EmailsService<'a> {
    /// Creates a new emails service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists email addresses.
    pub async fn list(&self) -> Result<Outcome> {
        self.client.get("user/emails", Params::new(), Headers::new()).await
    }

    /// Adds email addresses.
    pub async fn add(&self, emails: &[&str]) -> Result<Outcome> {
        let params = build_params([("emails", json!(emails))]);
        self.client.post("user/emails", params, Headers::new()).await
    }

    /// Removes email addresses.
    pub async fn remove(&self, emails: &[&str]) -> Result<Outcome> {
        let params = build_params([("emails", json!(emails))]);
        self.client.delete("user/emails", params, Headers::new()).await
    }
}

/// SSH key operations for the authenticated user.
pub struct UserKeysService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UserKeysService<'a> {
    /// Creates a new keys service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists public keys.
    pub async fn list(&self) -> Result<Outcome> {
        self.client.get("user/keys", Params::new(), Headers::new()).await
    }

    /// Gets a public key.
    pub async fn get(&self, id: u64) -> Result<Outcome> {
        self.client
            .get(&format!("user/keys/{}", id), Params::new(), Headers::new())
            .await
    }

    /// Creates a public key.
    pub async fn create(&self, title: &str, key: &str) -> Result<Outcome> {
        let params = build_params([("title", json!(title)), ("key", json!(key))]);
        self.client.post("user/keys", params, Headers::new()).await
    }

    /// Updates a public key. Both fields are optional; absent ones are not
    /// sent.
    pub async fn update(
        &self,
        id: u64,
        title: Option<&str>,
        key: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("title", title.map_or(Value::Null, |t| json!(t))),
            ("key", key.map_or(Value::Null, |k| json!(k))),
        ]);
        self.client
            .patch(&format!("user/keys/{}", id), params, Headers::new())
            .await
    }

    /// Deletes a public key.
    pub async fn remove(&self, id: u64) -> Result<Outcome> {
        self.client
            .delete(&format!("user/keys/{}", id), Params::new(), Headers::new())
            .await
    }
}
