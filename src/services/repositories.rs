//! Repository operations.

use crate::client::{build_params, GitHubClient, Headers, Outcome, Params};
use crate::errors::{Error, Result};
use crate::pagination::PageParams;
use serde_json::{json, Value};

/// Repository type filter for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoType {
    /// All repositories visible to the caller.
    All,
    /// Public repositories only.
    Public,
    /// Private repositories only.
    Private,
    /// Repositories the caller is a member of.
    Member,
}

impl RepoType {
    /// The query-parameter token for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repo types accepted when listing a user's repositories.
pub const USER_REPO_TYPES: &[RepoType] = &[
    RepoType::All,
    RepoType::Public,
    RepoType::Private,
    RepoType::Member,
];

/// Repo types accepted when listing an organization's repositories.
pub const ORG_REPO_TYPES: &[RepoType] = &[RepoType::All, RepoType::Public, RepoType::Private];

/// Rejects a repo type outside the allowed set for the calling context.
pub(crate) fn ensure_repo_type(repo_type: RepoType, allowed: &[RepoType]) -> Result<()> {
    if allowed.contains(&repo_type) {
        return Ok(());
    }
    let available: Vec<&str> = allowed.iter().map(RepoType::as_str).collect();
    Err(Error::api(format!(
        "Unsupported {} option. Available types are {}",
        repo_type,
        available.join(", ")
    )))
}

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists repositories for a user, or for the authenticated user when
    /// `username` is `None`.
    ///
    /// Requests for another user can only list public repositories; other
    /// repo types require the authenticated-user form.
    pub async fn list(
        &self,
        username: Option<&str>,
        repo_type: RepoType,
        page: PageParams,
    ) -> Result<Outcome> {
        ensure_repo_type(repo_type, USER_REPO_TYPES)?;

        let path = match username {
            None => "user/repos".to_string(),
            Some(name) => {
                if repo_type != RepoType::Public {
                    return Err(Error::api(format!(
                        "Unsupported {} option. Requests for another user can only list public repositories",
                        repo_type
                    )));
                }
                format!("users/{}/repos", name)
            }
        };

        let params = page.merge_into(build_params([("type", json!(repo_type.as_str()))]));
        self.client.get(&path, params, Headers::new()).await
    }

    /// Gets a repository. Private repositories require authentication by
    /// an owner or collaborator; otherwise the API answers 404.
    pub async fn get(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Creates a repository for the authenticated user. `details` may carry
    /// any optional creation fields; nulls are dropped.
    pub async fn create(&self, repo: &str, details: Params) -> Result<Outcome> {
        let mut details = details;
        details.insert("name".to_string(), json!(repo));
        self.client
            .post("user/repos", build_params(details), Headers::new())
            .await
    }

    /// Edits a repository.
    pub async fn edit(&self, owner: &str, repo: &str, details: Params) -> Result<Outcome> {
        let mut details = details;
        details.insert("name".to_string(), json!(repo));
        self.client
            .patch(
                &format!("repos/{}/{}", owner, repo),
                build_params(details),
                Headers::new(),
            )
            .await
    }

    /// Lists repository contributors.
    pub async fn contributors(
        &self,
        owner: &str,
        repo: &str,
        include_anonymous: bool,
    ) -> Result<Outcome> {
        let params = build_params([("anon", json!(include_anonymous))]);
        self.client
            .get(&format!("repos/{}/{}/contributors", owner, repo), params, Headers::new())
            .await
    }

    /// Lists repository languages.
    pub async fn languages(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/languages", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Lists repository teams.
    pub async fn teams(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/teams", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Lists repository tags.
    pub async fn tags(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/tags", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Lists repository branches.
    pub async fn branches(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/branches", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Lists repository watchers.
    pub async fn watchers(&self, owner: &str, repo: &str, page: PageParams) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/watchers", owner, repo),
                page.to_params(),
                Headers::new(),
            )
            .await
    }

    /// Lists repositories a user is watching, or the authenticated user's
    /// watched repositories when `username` is `None`.
    pub async fn watched(&self, username: Option<&str>) -> Result<Outcome> {
        let path = match username {
            Some(name) => format!("users/{}/watched", name),
            None => "user/watched".to_string(),
        };
        self.client.get(&path, Params::new(), Headers::new()).await
    }

    /// Checks if the authenticated user is watching a repository; see
    /// [`Outcome::as_bool`].
    pub async fn is_watched(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("user/watched/{}/{}", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Watches a repository.
    pub async fn watch(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .put(&format!("user/watched/{}/{}", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Stops watching a repository.
    pub async fn unwatch(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("user/watched/{}/{}", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Provides access to fork operations.
    pub fn forks(&self) -> ForksService<'a> {
        ForksService::new(self.client)
    }

    /// Provides access to deploy key operations.
    pub fn keys(&self) -> RepoKeysService<'a> {
        RepoKeysService::new(self.client)
    }

    /// Provides access to collaborator operations.
    pub fn collaborators(&self) -> CollaboratorsService<'a> {
        CollaboratorsService::new(self.client)
    }

    /// Provides access to commit operations.
    pub fn commits(&self) -> CommitsService<'a> {
        CommitsService::new(self.client)
    }
}

/// Fork operations.
pub struct ForksService<'a> {
    client: &'a GitHubClient,
}

impl<'a> ForksService<'a> {
    /// Creates a new forks service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists forks of a repository.
    pub async fn list(&self, owner: &str, repo: &str, page: PageParams) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/forks", owner, repo),
                page.to_params(),
                Headers::new(),
            )
            .await
    }

    /// Forks a repository for the authenticated user, or into an
    /// organization when `org` is given.
    pub async fn create(&self, owner: &str, repo: &str, org: Option<&str>) -> Result<Outcome> {
        let params = build_params([("org", org.map_or(Value::Null, |o| json!(o)))]);
        self.client
            .post(&format!("repos/{}/{}/forks", owner, repo), params, Headers::new())
            .await
    }
}

/// Deploy key operations.
pub struct RepoKeysService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepoKeysService<'a> {
    /// Creates a new repository keys service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists deploy keys.
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/keys", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Gets a deploy key.
    pub async fn get(&self, owner: &str, repo: &str, id: u64) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/keys/{}", owner, repo, id), Params::new(), Headers::new())
            .await
    }

    /// Creates a deploy key.
    pub async fn create(&self, owner: &str, repo: &str, title: &str, key: &str) -> Result<Outcome> {
        let params = build_params([("title", json!(title)), ("key", json!(key))]);
        self.client
            .post(&format!("repos/{}/{}/keys", owner, repo), params, Headers::new())
            .await
    }

    /// Updates a deploy key. Absent fields are not sent.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        title: Option<&str>,
        key: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("title", title.map_or(Value::Null, |t| json!(t))),
            ("key", key.map_or(Value::Null, |k| json!(k))),
        ]);
        self.client
            .patch(&format!("repos/{}/{}/keys/{}", owner, repo, id), params, Headers::new())
            .await
    }

    /// Deletes a deploy key.
    pub async fn remove(&self, owner: &str, repo: &str, id: u64) -> Result<Outcome> {
        self.client
            .delete(&format!("repos/{}/{}/keys/{}", owner, repo, id), Params::new(), Headers::new())
            .await
    }
}

/// Collaborator operations.
pub struct CollaboratorsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> CollaboratorsService<'a> {
    /// Creates a new collaborators service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists collaborators.
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/collaborators", owner, repo),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Checks if a user is a collaborator; see [`Outcome::as_bool`].
    pub async fn is_collaborator(&self, owner: &str, repo: &str, username: &str) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/collaborators/{}", owner, repo, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Adds a collaborator.
    pub async fn add(&self, owner: &str, repo: &str, username: &str) -> Result<Outcome> {
        self.client
            .put(
                &format!("repos/{}/{}/collaborators/{}", owner, repo, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Removes a collaborator.
    pub async fn remove(&self, owner: &str, repo: &str, username: &str) -> Result<Outcome> {
        self.client
            .delete(
                &format!("repos/{}/{}/collaborators/{}", owner, repo, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }
}

/// Commit operations.
pub struct CommitsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> CommitsService<'a> {
    /// Creates a new commits service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists commits, optionally narrowed to a starting SHA or a file path.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        sha: Option<&str>,
        path: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("sha", sha.map_or(Value::Null, |s| json!(s))),
            ("path", path.map_or(Value::Null, |p| json!(p))),
        ]);
        self.client
            .get(&format!("repos/{}/{}/commits", owner, repo), params, Headers::new())
            .await
    }

    /// Gets a single commit.
    pub async fn get(&self, owner: &str, repo: &str, sha: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/commits/{}", owner, repo, sha), Params::new(), Headers::new())
            .await
    }

    /// Lists comments on a commit.
    pub async fn comments(&self, owner: &str, repo: &str, sha: &str) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/commits/{}/comments", owner, repo, sha),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Comments on a commit. `path`/`position` pin the comment to a line.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        body: &str,
        path: Option<&str>,
        position: Option<u32>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("body", json!(body)),
            ("commit_id", json!(sha)),
            ("path", path.map_or(Value::Null, |p| json!(p))),
            ("position", position.map_or(Value::Null, |p| json!(p))),
        ]);
        self.client
            .post(
                &format!("repos/{}/{}/commits/{}/comments", owner, repo, sha),
                params,
                Headers::new(),
            )
            .await
    }

    /// Deletes a commit comment.
    pub async fn remove_comment(&self, owner: &str, repo: &str, id: u64) -> Result<Outcome> {
        self.client
            .delete(&format!("repos/{}/{}/comments/{}", owner, repo, id), Params::new(), Headers::new())
            .await
    }
}
