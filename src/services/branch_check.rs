//! Branch existence check.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::models::{PipelineStage, ReleaseSpec, RepositoryContext, StepResult};

use super::verification_pipeline::{RunFacts, VerificationStep};

/// Confirms the release branch and the base branch both exist.
///
/// A 404 and a transport failure both fail the step; they differ only in
/// the diagnostic text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchCheck;

impl BranchCheck {
    /// Look up one branch. `Err` carries the diagnostic.
    async fn confirm(ctx: &RepositoryContext, role: &str, branch: &str) -> Result<String, String> {
        match ctx
            .gateway()
            .branch_exists(ctx.organization(), ctx.repository(), branch)
            .await
        {
            Ok(true) => Ok(format!("{role} branch '{branch}' exists")),
            Ok(false) => Err(format!("{role} branch '{branch}' not found")),
            Err(e) => Err(format!("{role} branch '{branch}' could not be confirmed: {e}")),
        }
    }
}

#[async_trait]
impl VerificationStep for BranchCheck {
    fn stage(&self) -> PipelineStage {
        PipelineStage::Branches
    }

    fn name(&self) -> &'static str {
        "branch existence"
    }

    async fn execute(
        &self,
        spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        _facts: &mut RunFacts,
    ) -> StepResult {
        let checks = [
            ("release", spec.release_branch.as_str()),
            ("base", spec.base_branch.as_str()),
        ];

        let mut confirmed = Vec::new();
        let mut failures = Vec::new();
        for (role, branch) in checks {
            match Self::confirm(ctx, role, branch).await {
                Ok(line) => confirmed.push(line),
                Err(line) => {
                    warn!(branch, role, "branch check failed");
                    failures.push(line);
                }
            }
        }

        if failures.is_empty() {
            info!(
                release = %spec.release_branch,
                base = %spec.base_branch,
                "branches confirmed"
            );
            StepResult::pass(self.stage(), self.name(), confirmed)
        } else {
            StepResult::fail(self.stage(), self.name(), failures)
        }
    }
}
