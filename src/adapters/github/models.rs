//! GitHub REST API v3 response models.
//!
//! Only the fields the release checks read are modelled; everything else in
//! the payloads is ignored. These structs are internal to the GitHub adapter
//! and convert into the domain summaries.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{CommitSummary, PullRequestSummary};

/// Response of `GET repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubContent {
    /// Base64 payload, wrapped with newlines every 60 characters.
    #[serde(default)]
    pub content: String,
    /// Always `"base64"` for files.
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A pull request from `GET pulls` or `GET pulls/{number}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    /// Null until merged.
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    pub base: GitHubRef,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
}

/// The `base` / `head` object of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

impl From<GitHubPullRequest> for PullRequestSummary {
    fn from(pr: GitHubPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            merged_at: pr.merged_at,
            base_ref: pr.base.ref_name,
            merge_commit_sha: pr.merge_commit_sha.filter(|sha| !sha.is_empty()),
        }
    }
}

/// Response of `GET commits/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<GitHubParent>,
    pub commit: GitHubCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubParent {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitDetail {
    #[serde(default)]
    pub message: String,
}

impl From<GitHubCommit> for CommitSummary {
    fn from(commit: GitHubCommit) -> Self {
        Self {
            sha: commit.sha,
            parent_shas: commit.parents.into_iter().map(|p| p.sha).collect(),
            message: commit.commit.message,
        }
    }
}
