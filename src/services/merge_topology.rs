//! Merge topology validation.
//!
//! A squash merge leaves exactly one commit on the base branch, with the
//! base tip as its only parent and `#<pr>` in its message. A merge commit
//! has two parents; a squash whose message was edited loses the reference.
//! Both are rejected, with distinct diagnostics.

use std::fmt;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::errors::GatewayError;
use crate::domain::models::{CommitSummary, PipelineStage, ReleaseSpec, RepositoryContext, StepResult};

use super::verification_pipeline::{RunFacts, VerificationStep};

/// Why a PR's merge is not an acceptable squash merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyViolation {
    PullRequestUnavailable { pr: u64, error: GatewayError },
    NoMergeCommit { pr: u64 },
    CommitUnavailable { sha: String, error: GatewayError },
    WrongParentCount { sha: String, actual: usize },
    MissingPrReference { sha: String, pr: u64 },
}

impl fmt::Display for TopologyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequestUnavailable { pr, error } => {
                write!(f, "could not fetch PR #{pr}: {error}")
            }
            Self::NoMergeCommit { pr } => write!(
                f,
                "PR #{pr} has no merge commit - likely unmerged or merge pending"
            ),
            Self::CommitUnavailable { sha, error } => {
                write!(f, "could not fetch merge commit {sha}: {error}")
            }
            Self::WrongParentCount { sha, actual } => write!(
                f,
                "wrong parent count: merge commit {sha} has {actual} parents, a squash merge has exactly 1"
            ),
            Self::MissingPrReference { sha, pr } => write!(
                f,
                "missing PR reference: merge commit {sha} message does not contain '#{pr}'"
            ),
        }
    }
}

/// Check a commit against the squash-merge shape for `pr`.
///
/// Returns every violated condition, parent count first.
pub fn commit_violations(commit: &CommitSummary, pr: u64) -> Vec<TopologyViolation> {
    let mut violations = Vec::new();
    if commit.parent_shas.len() != 1 {
        violations.push(TopologyViolation::WrongParentCount {
            sha: commit.sha.clone(),
            actual: commit.parent_shas.len(),
        });
    }
    if !commit.references_pull_request(pr) {
        violations.push(TopologyViolation::MissingPrReference {
            sha: commit.sha.clone(),
            pr,
        });
    }
    violations
}

/// Resolves a PR to its merge commit and validates that commit's shape.
pub struct MergeTopologyValidator<'a> {
    ctx: &'a RepositoryContext,
}

impl<'a> MergeTopologyValidator<'a> {
    pub const fn new(ctx: &'a RepositoryContext) -> Self {
        Self { ctx }
    }

    /// The merge commit when it is a valid squash merge of `pr`.
    pub async fn validate(&self, pr: u64) -> Result<CommitSummary, Vec<TopologyViolation>> {
        let gateway = self.ctx.gateway();
        let (owner, repo) = (self.ctx.organization(), self.ctx.repository());

        let pull = gateway
            .get_pull_request(owner, repo, pr)
            .await
            .map_err(|error| vec![TopologyViolation::PullRequestUnavailable { pr, error }])?;

        let sha = pull
            .merge_commit_sha
            .ok_or_else(|| vec![TopologyViolation::NoMergeCommit { pr }])?;

        let commit = gateway
            .get_commit(owner, repo, &sha)
            .await
            .map_err(|error| {
                vec![TopologyViolation::CommitUnavailable {
                    sha: sha.clone(),
                    error,
                }]
            })?;

        let violations = commit_violations(&commit, pr);
        if violations.is_empty() {
            Ok(commit)
        } else {
            Err(violations)
        }
    }

    pub async fn is_squash_merge(&self, pr: u64) -> bool {
        self.validate(pr).await.is_ok()
    }
}

/// Pipeline step wrapping [`MergeTopologyValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeMethodCheck;

#[async_trait]
impl VerificationStep for MergeMethodCheck {
    fn stage(&self) -> PipelineStage {
        PipelineStage::MergeMethod
    }

    fn name(&self) -> &'static str {
        "merge method"
    }

    async fn execute(
        &self,
        _spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        facts: &mut RunFacts,
    ) -> StepResult {
        let Some(number) = facts.release_pr_number() else {
            return StepResult::fail(
                self.stage(),
                self.name(),
                vec!["no release PR was discovered".to_string()],
            );
        };

        match MergeTopologyValidator::new(ctx).validate(number).await {
            Ok(commit) => {
                info!(pr = number, sha = %commit.sha, "squash merge confirmed");
                let line = format!("PR #{number} squash-merged as {}", commit.sha);
                facts.merge_commit = Some(commit);
                StepResult::pass(self.stage(), self.name(), vec![line])
            }
            Err(violations) => {
                for v in &violations {
                    warn!(pr = number, violation = %v, "merge method rejected");
                }
                StepResult::fail(
                    self.stage(),
                    self.name(),
                    violations.iter().map(ToString::to_string).collect(),
                )
            }
        }
    }
}
