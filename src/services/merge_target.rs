//! Merge target check.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::models::{
    PipelineStage, PullRequestSummary, ReleaseSpec, RepositoryContext, StepResult,
};

use super::verification_pipeline::{RunFacts, VerificationStep};

/// `Err` names the actual and expected base when they differ.
pub fn check_merge_target(spec: &ReleaseSpec, pr: &PullRequestSummary) -> Result<(), String> {
    if pr.base_ref == spec.base_branch {
        Ok(())
    } else {
        Err(format!(
            "PR #{} was merged into '{}', expected '{}'",
            pr.number, pr.base_ref, spec.base_branch
        ))
    }
}

/// Confirms the release PR targeted the base branch.
///
/// The PR is fetched again by number rather than trusting the listing that
/// discovery used.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeTargetCheck;

#[async_trait]
impl VerificationStep for MergeTargetCheck {
    fn stage(&self) -> PipelineStage {
        PipelineStage::PrTarget
    }

    fn name(&self) -> &'static str {
        "merge target"
    }

    async fn execute(
        &self,
        spec: &ReleaseSpec,
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

        let pr = match ctx
            .gateway()
            .get_pull_request(ctx.organization(), ctx.repository(), number)
            .await
        {
            Ok(pr) => pr,
            Err(e) => {
                warn!(pr = number, error = %e, "could not fetch release PR");
                return StepResult::fail(
                    self.stage(),
                    self.name(),
                    vec![format!("could not fetch PR #{number}: {e}")],
                );
            }
        };

        match check_merge_target(spec, &pr) {
            Ok(()) => {
                info!(pr = number, base = %pr.base_ref, "merge target confirmed");
                StepResult::pass(
                    self.stage(),
                    self.name(),
                    vec![format!("PR #{number} merged into '{}'", pr.base_ref)],
                )
            }
            Err(line) => {
                warn!(pr = number, actual = %pr.base_ref, expected = %spec.base_branch, "wrong merge target");
                StepResult::fail(self.stage(), self.name(), vec![line])
            }
        }
    }
}
