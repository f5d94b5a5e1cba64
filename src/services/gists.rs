//! Gist operations.

use crate::client::{build_params, GitHubClient, Headers, Outcome, Params};
use crate::errors::{Error, Result};
use crate::media::{with_format, MediaFormat};
use crate::pagination::PageParams;
use serde_json::{json, Value};

/// MIME resource identifier for gist comments.
const GIST_COMMENT_RESOURCE: &str = "gistcomment";

/// Gist listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GistType {
    /// Public gists.
    #[default]
    Public,
    /// Private gists of the authenticated user.
    Private,
    /// Gists the authenticated user has starred.
    Starred,
}

/// Service for gist operations.
pub struct GistsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> GistsService<'a> {
    /// Creates a new gists service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists gists.
    ///
    /// With a username, only public gists can be listed. Without one, an
    /// unauthenticated client gets all public gists, while an
    /// authenticated client gets its own gists (or its starred gists for
    /// [`GistType::Starred`]).
    pub async fn list(
        &self,
        username: Option<&str>,
        gist_type: GistType,
        page: PageParams,
    ) -> Result<Outcome> {
        let path = match username {
            Some(name) => {
                if gist_type != GistType::Public {
                    return Err(Error::api(
                        "Unsupported gist type option. Requests for another user can only list public gists",
                    ));
                }
                format!("users/{}/gists", name)
            }
            None => {
                if self.client.is_authenticated() && gist_type == GistType::Starred {
                    "gists/starred".to_string()
                } else {
                    "gists".to_string()
                }
            }
        };

        self.client.get(&path, page.to_params(), Headers::new()).await
    }

    /// Gets a gist.
    pub async fn get(&self, id: &str) -> Result<Outcome> {
        self.client
            .get(&format!("gists/{}", id), Params::new(), Headers::new())
            .await
    }

    /// Creates a gist. `files` maps filename to `{"content": ...}` values.
    pub async fn create(&self, files: Value, public: bool, description: &str) -> Result<Outcome> {
        let params = build_params([
            ("description", json!(description)),
            ("public", json!(public)),
            ("files", files),
        ]);
        self.client.post("gists", params, Headers::new()).await
    }

    /// Updates a gist. Absent fields are not sent.
    pub async fn update(
        &self,
        id: &str,
        files: Option<Value>,
        description: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("description", description.map_or(Value::Null, |d| json!(d))),
            ("files", files.unwrap_or(Value::Null)),
        ]);
        self.client
            .patch(&format!("gists/{}", id), params, Headers::new())
            .await
    }

    /// Deletes a gist.
    pub async fn remove(&self, id: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("gists/{}", id), Params::new(), Headers::new())
            .await
    }

    /// Stars a gist.
    pub async fn star(&self, id: &str) -> Result<Outcome> {
        self.client
            .put(&format!("gists/{}/star", id), Params::new(), Headers::new())
            .await
    }

    /// Unstars a gist.
    pub async fn unstar(&self, id: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("gists/{}/star", id), Params::new(), Headers::new())
            .await
    }

    /// Checks if a gist is starred; see [`Outcome::as_bool`].
    pub async fn is_starred(&self, id: &str) -> Result<Outcome> {
        self.client
            .get(&format!("gists/{}/star", id), Params::new(), Headers::new())
            .await
    }

    /// Forks a gist.
    pub async fn fork(&self, id: &str) -> Result<Outcome> {
        self.client
            .post(&format!("gists/{}/fork", id), Params::new(), Headers::new())
            .await
    }

    /// Provides access to gist comment operations.
    pub fn comments(&self) -> GistCommentsService<'a> {
        GistCommentsService::new(self.client)
    }
}

/// Gist comment operations.
pub struct GistCommentsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> GistCommentsService<'a> {
    /// Creates a new gist comments service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists comments on a gist.
    pub async fn list(&self, gist_id: &str, format: MediaFormat) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, GIST_COMMENT_RESOURCE);
        self.client
            .get(&format!("gists/{}/comments", gist_id), Params::new(), headers)
            .await
    }

    /// Gets a comment.
    pub async fn get(&self, id: u64, format: MediaFormat) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, GIST_COMMENT_RESOURCE);
        self.client
            .get(&format!("gists/comments/{}", id), Params::new(), headers)
            .await
    }

    /// Comments on a gist.
    pub async fn create(&self, gist_id: &str, body: &str, format: MediaFormat) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, GIST_COMMENT_RESOURCE);
        let params = build_params([("body", json!(body))]);
        self.client
            .post(&format!("gists/{}/comments", gist_id), params, headers)
            .await
    }

    /// Edits a comment.
    pub async fn update(&self, id: u64, body: &str, format: MediaFormat) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, GIST_COMMENT_RESOURCE);
        let params = build_params([("body", json!(body))]);
        self.client
            .patch(&format!("gists/comments/{}", id), params, headers)
            .await
    }

    /// Deletes a comment.
    pub async fn remove(&self, id: u64) -> Result<Outcome> {
        self.client
            .delete(&format!("gists/comments/{}", id), Params::new(), Headers::new())
            .await
    }
}
