//! Scripted in-memory gateway for testing.
//!
//! Every query answers from canned responses registered up front, and every
//! call is logged so tests can assert what the pipeline did (and did not)
//! ask for.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::{GatewayError, GatewayResult};
use crate::domain::models::{CommitSummary, PullRequestSummary};
use crate::domain::ports::RepositoryGateway;

/// In-memory [`RepositoryGateway`] answering from canned responses.
///
/// Unscripted lookups answer the way an empty repository would: branches
/// do not exist, files/PRs/commits are 404, and PR listings are empty.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    branches: HashMap<String, GatewayResult<bool>>,
    files: HashMap<(String, String), GatewayResult<String>>,
    pull_listings: HashMap<String, GatewayResult<Vec<PullRequestSummary>>>,
    pulls: HashMap<u64, GatewayResult<PullRequestSummary>>,
    commits: HashMap<String, GatewayResult<CommitSummary>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a branch as existing.
    #[must_use]
    pub fn with_branch(self, name: impl Into<String>) -> Self {
        self.with_branch_result(name, Ok(true))
    }

    #[must_use]
    pub fn with_branch_result(mut self, name: impl Into<String>, result: GatewayResult<bool>) -> Self {
        self.branches.insert(name.into(), result);
        self
    }

    /// Serve `content` for `path` at `git_ref`.
    #[must_use]
    pub fn with_file(
        self,
        path: impl Into<String>,
        git_ref: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.with_file_result(path, git_ref, Ok(content.into()))
    }

    #[must_use]
    pub fn with_file_result(
        mut self,
        path: impl Into<String>,
        git_ref: impl Into<String>,
        result: GatewayResult<String>,
    ) -> Self {
        self.files.insert((path.into(), git_ref.into()), result);
        self
    }

    /// Serve a closed-PR listing for `base_branch`, in the given order.
    #[must_use]
    pub fn with_pull_requests(
        self,
        base_branch: impl Into<String>,
        pulls: Vec<PullRequestSummary>,
    ) -> Self {
        self.with_pull_request_listing(base_branch, Ok(pulls))
    }

    #[must_use]
    pub fn with_pull_request_listing(
        mut self,
        base_branch: impl Into<String>,
        result: GatewayResult<Vec<PullRequestSummary>>,
    ) -> Self {
        self.pull_listings.insert(base_branch.into(), result);
        self
    }

    /// Serve a single-PR fetch.
    #[must_use]
    pub fn with_pull_request(mut self, pull: PullRequestSummary) -> Self {
        self.pulls.insert(pull.number, Ok(pull));
        self
    }

    #[must_use]
    pub fn with_pull_request_result(
        mut self,
        number: u64,
        result: GatewayResult<PullRequestSummary>,
    ) -> Self {
        self.pulls.insert(number, result);
        self
    }

    #[must_use]
    pub fn with_commit(mut self, commit: CommitSummary) -> Self {
        self.commits.insert(commit.sha.clone(), Ok(commit));
        self
    }

    #[must_use]
    pub fn with_commit_result(
        mut self,
        sha: impl Into<String>,
        result: GatewayResult<CommitSummary>,
    ) -> Self {
        self.commits.insert(sha.into(), result);
        self
    }

    /// Every query made so far, in call order, e.g. `"branch_exists main"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl RepositoryGateway for ScriptedGateway {
    async fn branch_exists(&self, _owner: &str, _repo: &str, branch: &str) -> GatewayResult<bool> {
        self.record(format!("branch_exists {branch}"));
        self.branches.get(branch).cloned().unwrap_or(Ok(false))
    }

    async fn get_file_content(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        git_ref: &str,
    ) -> GatewayResult<String> {
        self.record(format!("get_file_content {path}@{git_ref}"));
        self.files
            .get(&(path.to_string(), git_ref.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(GatewayError::NotFound {
                    resource: format!("contents/{path}?ref={git_ref}"),
                })
            })
    }

    async fn find_merged_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        base_branch: &str,
    ) -> GatewayResult<Vec<PullRequestSummary>> {
        self.record(format!("find_merged_pull_requests {base_branch}"));
        self.pull_listings
            .get(base_branch)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> GatewayResult<PullRequestSummary> {
        self.record(format!("get_pull_request {number}"));
        self.pulls.get(&number).cloned().unwrap_or_else(|| {
            Err(GatewayError::NotFound {
                resource: format!("pulls/{number}"),
            })
        })
    }

    async fn get_commit(&self, _owner: &str, _repo: &str, sha: &str) -> GatewayResult<CommitSummary> {
        self.record(format!("get_commit {sha}"));
        self.commits.get(sha).cloned().unwrap_or_else(|| {
            Err(GatewayError::NotFound {
                resource: format!("commits/{sha}"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_lookups_look_empty() {
        let gateway = ScriptedGateway::new();
        assert_eq!(gateway.branch_exists("o", "r", "main").await, Ok(false));
        assert!(gateway
            .get_file_content("o", "r", "README.md", "main")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(gateway
            .find_merged_pull_requests("o", "r", "main")
            .await
            .unwrap()
            .is_empty());
        assert!(gateway.get_pull_request("o", "r", 1).await.is_err());
        assert!(gateway.get_commit("o", "r", "abc").await.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_logged_in_order() {
        let gateway = ScriptedGateway::new()
            .with_branch("main")
            .with_file("Cargo.toml", "main", "[package]");
        gateway.branch_exists("o", "r", "main").await.unwrap();
        gateway
            .get_file_content("o", "r", "Cargo.toml", "main")
            .await
            .unwrap();
        assert_eq!(
            gateway.calls(),
            vec![
                "branch_exists main".to_string(),
                "get_file_content Cargo.toml@main".to_string(),
            ]
        );
    }
}
