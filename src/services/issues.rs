//! Issue operations.

use crate::client::{build_params, GitHubClient, Headers, Outcome, Params};
use crate::errors::Result;
use crate::media::{with_format, MediaFormat};
use crate::pagination::PageParams;
use serde_json::{json, Value};

/// MIME resource identifier for issues.
const ISSUE_RESOURCE: &str = "issue";

/// MIME resource identifier for issue comments.
const ISSUE_COMMENT_RESOURCE: &str = "issuecomment";

/// Issue listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueFilter {
    /// Issues assigned to the caller.
    #[default]
    Assigned,
    /// Issues created by the caller.
    Created,
    /// Issues mentioning the caller.
    Mentioned,
    /// Issues the caller is subscribed to.
    Subscribed,
}

impl IssueFilter {
    /// The query-parameter token for this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Created => "created",
            Self::Mentioned => "mentioned",
            Self::Subscribed => "subscribed",
        }
    }
}

/// Issue state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    /// Open issues.
    #[default]
    Open,
    /// Closed issues.
    Closed,
}

impl IssueState {
    /// The query-parameter token for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Issue sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueSort {
    /// Sort by creation time.
    #[default]
    Created,
    /// Sort by last update time.
    Updated,
    /// Sort by comment count.
    Comments,
}

impl IssueSort {
    /// The query-parameter token for this sort column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Comments => "comments",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Descending.
    #[default]
    Desc,
    /// Ascending.
    Asc,
}

impl SortDirection {
    /// The query-parameter token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Asc => "asc",
        }
    }
}

/// Optional filters for issue listing. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct IssueListOptions {
    /// Relationship filter.
    pub filter: Option<IssueFilter>,
    /// State filter.
    pub state: Option<IssueState>,
    /// Comma-separated label names.
    pub labels: Option<String>,
    /// Sort column.
    pub sort: Option<IssueSort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
}

impl IssueListOptions {
    fn to_params(&self) -> Params {
        build_params([
            (
                "filter",
                self.filter.map_or(Value::Null, |f| json!(f.as_str())),
            ),
            (
                "state",
                self.state.map_or(Value::Null, |s| json!(s.as_str())),
            ),
            (
                "labels",
                self.labels.as_deref().map_or(Value::Null, |l| json!(l)),
            ),
            ("sort", self.sort.map_or(Value::Null, |s| json!(s.as_str()))),
            (
                "direction",
                self.direction.map_or(Value::Null, |d| json!(d.as_str())),
            ),
        ])
    }
}

/// Service for issue operations.
pub struct IssuesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists issues for the authenticated user across repositories.
    pub async fn list(&self, options: IssueListOptions, page: PageParams) -> Result<Outcome> {
        let params = page.merge_into(options.to_params());
        self.client.get("issues", params, Headers::new()).await
    }

    /// Lists issues for a repository.
    pub async fn list_for_repo(
        &self,
        owner: &str,
        repo: &str,
        options: IssueListOptions,
        page: PageParams,
    ) -> Result<Outcome> {
        let params = page.merge_into(options.to_params());
        self.client
            .get(&format!("repos/{}/{}/issues", owner, repo), params, Headers::new())
            .await
    }

    /// Gets an issue.
    pub async fn get(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_RESOURCE);
        self.client
            .get(&format!("repos/{}/{}/issues/{}", owner, repo, number), Params::new(), headers)
            .await
    }

    /// Opens an issue. `details` may carry body, assignee, milestone,
    /// labels; nulls are dropped.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        details: Params,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let mut details = details;
        details.insert("title".to_string(), json!(title));
        let headers = with_format(Headers::new(), format, ISSUE_RESOURCE);
        self.client
            .post(
                &format!("repos/{}/{}/issues", owner, repo),
                build_params(details),
                headers,
            )
            .await
    }

    /// Edits an issue.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        details: Params,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_RESOURCE);
        self.client
            .patch(
                &format!("repos/{}/{}/issues/{}", owner, repo, number),
                build_params(details),
                headers,
            )
            .await
    }

    /// Provides access to issue comment operations.
    pub fn comments(&self) -> IssueCommentsService<'a> {
        IssueCommentsService::new(self.client)
    }

    /// Provides access to label operations.
    pub fn labels(&self) -> LabelsService<'a> {
        LabelsService::new(self.client)
    }

    /// Provides access to milestone operations.
    pub fn milestones(&self) -> MilestonesService<'a> {
        MilestonesService::new(self.client)
    }
}

/// Issue comment operations.
pub struct IssueCommentsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> IssueCommentsService<'a> {
    /// Creates a new issue comments service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists comments on an issue.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_COMMENT_RESOURCE);
        self.client
            .get(
                &format!("repos/{}/{}/issues/{}/comments", owner, repo, issue_number),
                Params::new(),
                headers,
            )
            .await
    }

    /// Gets a comment.
    pub async fn get(&self, owner: &str, repo: &str, id: u64, format: MediaFormat) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_COMMENT_RESOURCE);
        self.client
            .get(
                &format!("repos/{}/{}/issues/comments/{}", owner, repo, id),
                Params::new(),
                headers,
            )
            .await
    }

    /// Comments on an issue.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_COMMENT_RESOURCE);
        let params = build_params([("body", json!(body))]);
        self.client
            .post(
                &format!("repos/{}/{}/issues/{}/comments", owner, repo, issue_number),
                params,
                headers,
            )
            .await
    }

    /// Edits a comment.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        body: &str,
        format: MediaFormat,
    ) -> Result<Outcome> {
        let headers = with_format(Headers::new(), format, ISSUE_COMMENT_RESOURCE);
        let params = build_params([("body", json!(body))]);
        self.client
            .patch(
                &format!("repos/{}/{}/issues/comments/{}", owner, repo, id),
                params,
                headers,
            )
            .await
    }

    /// Deletes a comment.
    pub async fn remove(&self, owner: &str, repo: &str, id: u64) -> Result<Outcome> {
        self.client
            .delete(
                &format!("repos/{}/{}/issues/comments/{}", owner, repo, id),
                Params::new(),
                Headers::new(),
            )
            .await
    }
}

/// Label operations.
pub struct LabelsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> LabelsService<'a> {
    /// Creates a new labels service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists labels for a repository.
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/labels", owner, repo), Params::new(), Headers::new())
            .await
    }

    /// Gets a label.
    pub async fn get(&self, owner: &str, repo: &str, name: &str) -> Result<Outcome> {
        self.client
            .get(&format!("repos/{}/{}/labels/{}", owner, repo, name), Params::new(), Headers::new())
            .await
    }

    /// Creates a label. `color` is a 6-character hex code without `#`.
    pub async fn create(&self, owner: &str, repo: &str, name: &str, color: &str) -> Result<Outcome> {
        let params = build_params([("name", json!(name)), ("color", json!(color))]);
        self.client
            .post(&format!("repos/{}/{}/labels", owner, repo), params, Headers::new())
            .await
    }

    /// Updates a label. Absent fields are not sent.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        new_name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("name", new_name.map_or(Value::Null, |n| json!(n))),
            ("color", color.map_or(Value::Null, |c| json!(c))),
        ]);
        self.client
            .patch(&format!("repos/{}/{}/labels/{}", owner, repo, name), params, Headers::new())
            .await
    }

    /// Deletes a label.
    pub async fn remove(&self, owner: &str, repo: &str, name: &str) -> Result<Outcome> {
        self.client
            .delete(&format!("repos/{}/{}/labels/{}", owner, repo, name), Params::new(), Headers::new())
            .await
    }

    /// Lists labels on an issue.
    pub async fn list_for_issue(&self, owner: &str, repo: &str, issue_number: u64) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Adds labels to an issue.
    pub async fn add_to_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[&str],
    ) -> Result<Outcome> {
        let params = build_params([("labels", json!(labels))]);
        self.client
            .post(
                &format!("repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                params,
                Headers::new(),
            )
            .await
    }

    /// Replaces every label on an issue.
    pub async fn replace_for_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[&str],
    ) -> Result<Outcome> {
        let params = build_params([("labels", json!(labels))]);
        self.client
            .put(
                &format!("repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                params,
                Headers::new(),
            )
            .await
    }

    /// Removes a label from an issue.
    pub async fn remove_from_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        name: &str,
    ) -> Result<Outcome> {
        self.client
            .delete(
                &format!("repos/{}/{}/issues/{}/labels/{}", owner, repo, issue_number, name),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Removes every label from an issue.
    pub async fn remove_all_from_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<Outcome> {
        self.client
            .delete(
                &format!("repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                Params::new(),
                Headers::new(),
            )
            .await
    }
}

/// Milestone operations.
pub struct MilestonesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> MilestonesService<'a> {
    /// Creates a new milestones service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists milestones for a repository.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        state: Option<IssueState>,
        page: PageParams,
    ) -> Result<Outcome> {
        let params = page.merge_into(build_params([(
            "state",
            state.map_or(Value::Null, |s| json!(s.as_str())),
        )]));
        self.client
            .get(&format!("repos/{}/{}/milestones", owner, repo), params, Headers::new())
            .await
    }

    /// Gets a milestone.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> Result<Outcome> {
        self.client
            .get(
                &format!("repos/{}/{}/milestones/{}", owner, repo, number),
                Params::new(),
                Headers::new(),
            )
            .await
    }

    /// Creates a milestone. `due_on` is an ISO 8601 timestamp.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        description: Option<&str>,
        due_on: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("title", json!(title)),
            ("description", description.map_or(Value::Null, |d| json!(d))),
            ("due_on", due_on.map_or(Value::Null, |d| json!(d))),
        ]);
        self.client
            .post(&format!("repos/{}/{}/milestones", owner, repo), params, Headers::new())
            .await
    }

    /// Updates a milestone. Absent fields are not sent.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        title: Option<&str>,
        state: Option<IssueState>,
        description: Option<&str>,
        due_on: Option<&str>,
    ) -> Result<Outcome> {
        let params = build_params([
            ("title", title.map_or(Value::Null, |t| json!(t))),
            ("state", state.map_or(Value::Null, |s| json!(s.as_str()))),
            ("description", description.map_or(Value::Null, |d| json!(d))),
            ("due_on", due_on.map_or(Value::Null, |d| json!(d))),
        ]);
        self.client
            .patch(
                &format!("repos/{}/{}/milestones/{}", owner, repo, number),
                params,
                Headers::new(),
            )
            .await
    }

    /// Deletes a milestone.
    pub async fn remove(&self, owner: &str, repo: &str, number: u64) -> Result<Outcome> {
        self.client
            .delete(
                &format!("repos/{}/{}/milestones/{}", owner, repo, number),
                Params::new(),
                Headers::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_drop_unset_fields() {
        let options = IssueListOptions {
            state: Some(IssueState::Closed),
            sort: Some(IssueSort::Comments),
            ..Default::default()
        };
        let params = options.to_params();

        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, ["state", "sort"]);
        assert_eq!(params.get("state"), Some(&json!("closed")));
    }

    #[test]
    fn test_filter_tokens() {
        assert_eq!(IssueFilter::Subscribed.as_str(), "subscribed");
        assert_eq!(SortDirection::Asc.as_str(), "asc");
        assert_eq!(IssueSort::Updated.as_str(), "updated");
    }
}
