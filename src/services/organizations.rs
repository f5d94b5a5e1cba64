//! Organization operations.

use crate::client::{build_params, GitHubClient, Headers, Outcome, Params};
use crate::errors::{Error, Result};
use crate::pagination::PageParams;
use crate::services::repositories::{ensure_repo_type, RepoType, ORG_REPO_TYPES};
use serde_json::json;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists organizations for a user, or for the authenticated user when
    /// `username` is `None`.
    pub async fn list_for_user(&self, username: Option<&str>) -> Result<Outcome> {
        let path = match username {
            Some(name) => format!("users/{}/orgs", name),
            None => "user/orgs".to_string(),
        };
        self.client.get(&path, Params::new(), Headers::new()).await
    }

    /// Gets an organization.
    pub async fn get(&self, org: &str) -> Result<Outcome> {
        self.client
            .get(&format!("orgs/{}", org), Params::new(), Headers::new())
            .await
    }

    /// Updates an organization. Null-valued details are dropped before
    /// dispatch.
    pub async fn update(&self, org: &str, details: Params) -> Result<Outcome> {
        self.client
            .patch(&format!("orgs/{}", org), build_params(details), Headers::new())
            .await
    }

    /// Lists an organization's repositories.
    ///
    /// An unauthenticated client can only list public repositories.
    pub async fn repos(
        &self,
        org: &str,
        repo_type: RepoType,
        page: PageParams,
    ) -> Result<Outcome> {
        ensure_repo_type(repo_type, ORG_REPO_TYPES)?;
        if !self.client.is_authenticated() && repo_type != RepoType::Public {
            return Err(Error::api(format!(
                "Unsupported {} option. Unauthenticated requests can only list public repositories",
                repo_type
            )));
        }

        let params = page.merge_into(build_params([("type", json!(repo_type.as_str()))]));
        self.client
            .get(&format!("orgs/{}/repos", org), params, Headers::new())
            .await
    }

    /// Creates a repository in an organization the authenticated user
    /// belongs to. `details` may carry any optional creation fields; nulls
    /// are dropped.
    pub async fn create_repo(&self, org: &str, repo: &str, details: Params) -> Result<Outcome> {
        let mut details = details;
        details.insert("name".to_string(), json!(repo));
        self.client
            .post(&format!("orgs/{}/repos", org), build_params(details), Headers::new())
            .await
    }

    /// Provides access to membership operations.
    pub fn members(&self) -> OrgMembersService<'a> {
        OrgMembersService::new(self.client)
    }

    /// Provides access to team operations.
    pub fn teams(&self) -> OrgTeamsService<'a> {
        OrgTeamsService::new(self.client)
    }
}

/// Organization membership operations.
pub struct OrgMembersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrgMembersService<'a> {
    /// Creates a new members service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists members of an organization.
    pub async fn list(&self, org: &str, page: PageParams) -> Result<Outcome> {
        self.client
            .get(&format!("orgs/{}/members", org), page.to_params(), Headers::new())
            .await
    }

    /// Checks if a user is a member; see [`Outcome::as_bool`].
    pub async fn is_member(&self, org: &str, username: &str) -> Result<Outcome> {
        self.client
            .get(&format!("orgs/{}/members/{}", org, username), Params::new(), Headers::new())
            .await
    }

    /// Removes a member.
    pub async fn remove(&self, org: &str, username: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("orgs/{}/members/{}", org, username), Params::new(), Headers::new())
            .await
    }

    /// Lists public members of an organization.
    pub async fn list_public(&self, org: &str, page: PageParams) -> Result<Outcome> {
        self.client
            .get(&format!("orgs/{}/public_members", org), page.to_params(), Headers::new())
            .await
    }

    /// Checks if a user is a public member; see [`Outcome::as_bool`].
    pub async fn is_public_member(&self, org: &str, username: &str) -> Result<Outcome> {
        self.client
            .get(
                &format!("orgs/{}/public_members/{}", org, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Publicizes a user's membership.
    pub async fn publicize(&self, org: &str, username: &str) -> Result<Outcome> {
        self.client
            .put(
                &format!("orgs/{}/public_members/{}", org, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Conceals a user's membership.
    pub async fn conceal(&self, org: &str, username: &str) -> Result<Outcome> {
        self.client
            .delete(
                &format!("orgs/{}/public_members/{}", org, username),
                Params::new(),
                Headers::new(),
            )
            .await
    }
}

/// Organization team operations.
pub struct OrgTeamsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrgTeamsService<'a> {
    /// Creates a new teams service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists teams in an organization.
    pub async fn list(&self, org: &str) -> Result<Outcome> {
        self.client
            .get(&format!("orgs/{}/teams", org), Params::new(), Headers::new())
            .await
    }

    /// Gets a team.
    pub async fn get(&self, id: u64) -> Result<Outcome> {
        self.client
            .get(&format!("teams/{}", id), Params::new(), Headers::new())
            .await
    }

    /// Creates a team. `permission` is `pull`, `push` or `admin`.
    pub async fn create(
        &self,
        org: &str,
        name: &str,
        permission: Option<&str>,
        repo_names: &[&str],
    ) -> Result<Outcome> {
        let params = build_params([
            ("name", json!(name)),
            (
                "permission",
                permission.map_or(serde_json::Value::Null, |p| json!(p)),
            ),
            (
                "repo_names",
                if repo_names.is_empty() {
                    serde_json::Value::Null
                } else {
                    json!(repo_names)
                },
            ),
        ]);
        self.client
            .post(&format!("orgs/{}/teams", org), params, Headers::new())
            .await
    }

    /// Updates a team. Absent fields are not sent.
    pub async fn update(
        &self,
        id: u64,
        name: Option<&str>,
        permission: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("name", name.map_or(serde_json::Value::Null, |n| json!(n))),
            (
                "permission",
                permission.map_or(serde_json::Value::Null, |p| json!(p)),
            ),
        ]);
        self.client
            .patch(&format!("teams/{}", id), params, Headers::new())
            .await
    }

    /// Deletes a team.
    pub async fn remove(&self, id: u64) -> Result<Outcome> {
        self.client
            .delete(&format!("teams/{}", id), Params::new(), Headers::new())
            .await
    }

    /// Lists members of a team.
    pub async fn members(&self, id: u64) -> Result<Outcome> {
        self.client
            .get(&format!("teams/{}/members", id), Params::new(), Headers::new())
            .await
    }

    /// Checks if a user is a team member; see [`Outcome::as_bool`].
    pub async fn is_member(&self, id: u64, username: &str) -> Result<Outcome> {
        self.client
            .get(&format!("teams/{}/members/{}", id, username), Params::new(), Headers::new())
            .await
    }

    /// Adds a user to a team.
    pub async fn add_member(&self, id: u64, username: &str) -> Result<Outcome> {
        self.client
            .put(&format!("teams/{}/members/{}", id, username), Params::new(), Headers::new())
            .await
    }

    /// Removes a user from a team.
    pub async fn remove_member(&self, id: u64, username: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("teams/{}/members/{}", id, username), Params::new(), Headers::new())
            .await
    }

    /// Lists a team's repositories.
    pub async fn repos(&self, id: u64) -> Result<Outcome> {
        self.client
            .get(&format!("teams/{}/repos", id), Params::new(), Headers::new())
            .await
    }

    /// Checks if a repository is managed by a team; see
    /// [`Outcome::as_bool`].
    pub async fn manages_repo(&self, id: u64, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("teams/{}/repos/{}/{}", id, owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Adds a repository to a team.
    pub async fn add_repo(&self, id: u64, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .put(&format!("teams/{}/repos/{}/{}", id, owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Removes a repository from a team.
    pub async fn remove_repo(&self, id: u64, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("teams/{}/repos/{}/{}", id, owner, repo), Params::new(), Headers::new())
            .await
    }
}
