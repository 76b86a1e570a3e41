//! Release pull request discovery.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::models::{
    PipelineStage, PullRequestSummary, ReleaseSpec, RepositoryContext, StepResult,
};

use super::verification_pipeline::{RunFacts, VerificationStep};

/// First PR, in gateway order, whose title carries the release keyword and
/// which has actually been merged.
///
/// Gateway order is most-recent-first, so the first match is the most recent
/// merged release PR. Later matches are ignored.
pub fn discover_release_pr<'a>(
    spec: &ReleaseSpec,
    pulls: &'a [PullRequestSummary],
) -> Option<&'a PullRequestSummary> {
    pulls
        .iter()
        .find(|pr| pr.is_merged() && spec.title_matches(&pr.title))
}

/// Finds the merged release PR and records it for the later steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PullRequestDiscovery;

#[async_trait]
impl VerificationStep for PullRequestDiscovery {
    fn stage(&self) -> PipelineStage {
        PipelineStage::PrDiscovery
    }

    fn name(&self) -> &'static str {
        "release PR discovery"
    }

    async fn execute(
        &self,
        spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        facts: &mut RunFacts,
    ) -> StepResult {
        let pulls = match ctx
            .gateway()
            .find_merged_pull_requests(ctx.organization(), ctx.repository(), &spec.base_branch)
            .await
        {
            Ok(pulls) => pulls,
            Err(e) => {
                warn!(error = %e, "listing closed pull requests failed");
                return StepResult::fail(
                    self.stage(),
                    self.name(),
                    vec![format!("could not list closed PRs against '{}': {e}", spec.base_branch)],
                );
            }
        };

        let Some(pr) = discover_release_pr(spec, &pulls) else {
            warn!(scanned = pulls.len(), keyword = %spec.pr_title_keyword, "no release PR found");
            return StepResult::fail(
                self.stage(),
                self.name(),
                vec![format!(
                    "no matching merged release PR: none of {} closed PRs against '{}' has a title containing '{}' and a merge time",
                    pulls.len(),
                    spec.base_branch,
                    spec.pr_title_keyword
                )],
            );
        };

        let merged_on = pr
            .merged_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        info!(pr = pr.number, title = %pr.title, merged_on = %merged_on, "release PR found");

        let line = format!("PR #{} '{}' merged {}", pr.number, pr.title, merged_on);
        facts.release_pr = Some(pr.clone());
        StepResult::pass(self.stage(), self.name(), vec![line])
    }
}
