use async_trait::async_trait;

use crate::domain::errors::GatewayResult;
use crate::domain::models::{CommitSummary, PullRequestSummary};

/// Read-only queries against one hosted repository.
///
/// Implementations own transport concerns: authentication, the bounded
/// per-call timeout, and any retry policy. Callers treat every `Err` as a
/// final answer for that call; the verification pipeline never retries.
///
/// # Ordering contract
///
/// [`find_merged_pull_requests`](Self::find_merged_pull_requests) must return
/// pull requests most-recent-first, in the order the hosting API lists them.
/// Release PR discovery takes the first match, so an implementation that
/// re-sorts changes which PR is verified.
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// `Ok(true)` when the branch exists, `Ok(false)` when the API reports
    /// it missing (404). Any other failure is an `Err`.
    async fn branch_exists(&self, owner: &str, repo: &str, branch: &str) -> GatewayResult<bool>;

    /// Decoded UTF-8 text of `path` at `git_ref`.
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> GatewayResult<String>;

    /// Closed pull requests targeting `base_branch`, merged or not.
    async fn find_merged_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base_branch: &str,
    ) -> GatewayResult<Vec<PullRequestSummary>>;

    /// A single pull request, fetched fresh.
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GatewayResult<PullRequestSummary>;

    /// A single commit.
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> GatewayResult<CommitSummary>;
}
