//! GitHub HTTP client.
//!
//! Wraps the read-only slice of the GitHub REST API v3 the release checks
//! need. Every call is a single GET bounded by the client timeout; there is
//! no retry or rate limiting, so a failed call is final.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::errors::{GatewayError, GatewayResult};
use crate::domain::models::{CommitSummary, GithubConfig, PullRequestSummary};
use crate::domain::ports::RepositoryGateway;
use crate::infrastructure::logging::scrub_secrets;

use super::models::{GitHubCommit, GitHubContent, GitHubPullRequest};

/// Characters of an error response body kept in diagnostics.
const ERROR_BODY_EXCERPT: usize = 200;

/// HTTP client for the GitHub REST API v3.
#[derive(Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client, carrying the request timeout.
    http: Client,
    /// Release token with read access to the repository.
    token: String,
    /// API root without trailing slash.
    api_base: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("release-verifier")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            token: config.token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET `repos/{owner}/{repo}/{endpoint}` and decode a 200 JSON body.
    ///
    /// 404 maps to [`GatewayError::NotFound`]; any other non-200 status to
    /// [`GatewayError::Api`] with a scrubbed excerpt of the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> GatewayResult<T> {
        let url = format!("{}/repos/{}/{}/{}", self.api_base, owner, repo, endpoint);
        let resource = describe_resource(endpoint, query);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                resource: resource.clone(),
                message: if e.is_timeout() {
                    format!("timed out: {e}")
                } else {
                    scrub_secrets(&e.to_string())
                },
            })?;

        let status = resp.status();
        tracing::debug!(resource = %resource, status = status.as_u16(), "GitHub API response");

        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound { resource });
        }
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                resource,
                status: status.as_u16(),
                body: excerpt(&scrub_secrets(&body), ERROR_BODY_EXCERPT),
            });
        }

        resp.json::<T>().await.map_err(|e| GatewayError::Malformed {
            resource,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RepositoryGateway for GitHubClient {
    async fn branch_exists(&self, owner: &str, repo: &str, branch: &str) -> GatewayResult<bool> {
        match self
            .get_json::<serde_json::Value>(owner, repo, &format!("branches/{branch}"), &[])
            .await
        {
            Ok(_) => Ok(true),
            Err(GatewayError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> GatewayResult<String> {
        let content: GitHubContent = self
            .get_json(owner, repo, &format!("contents/{path}"), &[("ref", git_ref)])
            .await?;
        decode_content(path, &content)
    }

    async fn find_merged_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base_branch: &str,
    ) -> GatewayResult<Vec<PullRequestSummary>> {
        let pulls: Vec<GitHubPullRequest> = self
            .get_json(
                owner,
                repo,
                "pulls",
                &[("state", "closed"), ("base", base_branch), ("per_page", "100")],
            )
            .await?;
        Ok(pulls.into_iter().map(PullRequestSummary::from).collect())
    }

    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GatewayResult<PullRequestSummary> {
        let pull: GitHubPullRequest = self
            .get_json(owner, repo, &format!("pulls/{number}"), &[])
            .await?;
        Ok(pull.into())
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> GatewayResult<CommitSummary> {
        let commit: GitHubCommit = self
            .get_json(owner, repo, &format!("commits/{sha}"), &[])
            .await?;
        Ok(commit.into())
    }
}

/// Decode a contents payload into UTF-8 text.
///
/// GitHub wraps the base64 payload with newlines; whitespace is stripped
/// before decoding.
fn decode_content(path: &str, content: &GitHubContent) -> GatewayResult<String> {
    if let Some(encoding) = content.encoding.as_deref() {
        if encoding != "base64" {
            return Err(GatewayError::Decode {
                path: path.to_string(),
                message: format!("unsupported encoding '{encoding}'"),
            });
        }
    }

    let compact: String = content
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64.decode(compact).map_err(|e| GatewayError::Decode {
        path: path.to_string(),
        message: format!("invalid base64: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| GatewayError::Decode {
        path: path.to_string(),
        message: format!("not valid UTF-8: {e}"),
    })
}

fn describe_resource(endpoint: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return endpoint.to_string();
    }
    let params: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", endpoint, params.join("&"))
}

/// First `max` characters of `text`, never splitting a character.
fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
