//! Repository-side records the checks read, plus the shared run context.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ContextError;
use crate::domain::ports::RepositoryGateway;

/// Identifies the repository under test and carries the gateway used to
/// query it. Read-only for the lifetime of a pipeline run.
#[derive(Clone)]
pub struct RepositoryContext {
    organization: String,
    repository: String,
    gateway: Arc<dyn RepositoryGateway>,
}

impl RepositoryContext {
    /// Build a context, rejecting blank organization or repository names.
    pub fn new(
        organization: impl Into<String>,
        repository: impl Into<String>,
        gateway: Arc<dyn RepositoryGateway>,
    ) -> Result<Self, ContextError> {
        let organization = organization.into();
        let repository = repository.into();
        if organization.trim().is_empty() {
            return Err(ContextError::EmptyOrganization);
        }
        if repository.trim().is_empty() {
            return Err(ContextError::EmptyRepository);
        }
        Ok(Self {
            organization,
            repository,
            gateway,
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn gateway(&self) -> &dyn RepositoryGateway {
        self.gateway.as_ref()
    }

    /// `org/repo`, as shown in narration.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.organization, self.repository)
    }
}

impl fmt::Debug for RepositoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryContext")
            .field("organization", &self.organization)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

/// The fields of a pull request the checks rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    /// Present only once the PR has been merged.
    pub merged_at: Option<DateTime<Utc>>,
    /// Branch the PR targets.
    pub base_ref: String,
    pub merge_commit_sha: Option<String>,
}

impl PullRequestSummary {
    pub const fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// The fields of a commit the merge topology check relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    /// Parent SHAs in the order the hosting API lists them.
    pub parent_shas: Vec<String>,
    pub message: String,
}

impl CommitSummary {
    /// Whether the message carries the `#<number>` reference a squash merge writes.
    pub fn references_pull_request(&self, number: u64) -> bool {
        self.message.contains(&format!("#{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::ScriptedGateway;

    #[test]
    fn test_context_rejects_blank_names() {
        let gateway = Arc::new(ScriptedGateway::new());
        assert_eq!(
            RepositoryContext::new(" ", "harmony", gateway.clone()).unwrap_err(),
            ContextError::EmptyOrganization
        );
        assert_eq!(
            RepositoryContext::new("acme", "", gateway).unwrap_err(),
            ContextError::EmptyRepository
        );
    }

    #[test]
    fn test_context_slug() {
        let ctx =
            RepositoryContext::new("acme", "harmony", Arc::new(ScriptedGateway::new())).unwrap();
        assert_eq!(ctx.slug(), "acme/harmony");
    }

    #[test]
    fn test_commit_reference_matches_exact_number_text() {
        let commit = CommitSummary {
            sha: "abc".to_string(),
            parent_shas: vec!["p1".to_string()],
            message: "Release v1.1.0 (#42)".to_string(),
        };
        assert!(commit.references_pull_request(42));
        assert!(!commit.references_pull_request(43));
        // Literal substring semantics: "#4" is inside "#42".
        assert!(commit.references_pull_request(4));
    }
}
