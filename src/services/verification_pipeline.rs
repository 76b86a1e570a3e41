//! Verification orchestrator.
//!
//! The pipeline is an ordered list of steps walked by one loop. A step
//! runs only if every step before it passed; each executed step appends
//! exactly one [`StepResult`], and the first failure ends the run.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{info, info_span, warn, Instrument};

use crate::domain::models::{
    CommitSummary, FileRule, PipelineStage, PullRequestSummary, ReleaseSpec, RepositoryContext,
    StepResult, VerificationReport,
};

use super::branch_check::BranchCheck;
use super::content_rules::FileIntegrityCheck;
use super::merge_target::MergeTargetCheck;
use super::merge_topology::MergeMethodCheck;
use super::pr_discovery::PullRequestDiscovery;

/// Values produced by one step for the steps after it. Lives for one run.
#[derive(Debug, Clone, Default)]
pub struct RunFacts {
    /// Set by release PR discovery.
    pub release_pr: Option<PullRequestSummary>,
    /// Set by the merge method check once the squash merge is confirmed.
    pub merge_commit: Option<CommitSummary>,
}

impl RunFacts {
    pub fn release_pr_number(&self) -> Option<u64> {
        self.release_pr.as_ref().map(|pr| pr.number)
    }
}

/// One check in the pipeline.
#[async_trait]
pub trait VerificationStep: Send + Sync {
    /// Pipeline state this step decides.
    fn stage(&self) -> PipelineStage;

    /// Label used in narration and in the report.
    fn name(&self) -> &'static str;

    /// Run the check. Gateway failures become a failed result, never an error.
    async fn execute(
        &self,
        spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        facts: &mut RunFacts,
    ) -> StepResult;
}

/// Receives progress while the pipeline runs.
pub trait PipelineObserver: Send + Sync {
    fn step_started(&self, _stage: PipelineStage, _name: &str) {}
    fn step_finished(&self, _result: &StepResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl PipelineObserver for SilentObserver {}

/// Outcome of a run: the sealed report plus the facts steps gathered.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub report: VerificationReport,
    pub facts: RunFacts,
}

/// Sequences verification steps over a shared repository context.
pub struct VerificationPipeline {
    steps: Vec<Box<dyn VerificationStep>>,
    deadline: Option<Duration>,
}

impl VerificationPipeline {
    /// Pipeline over an explicit step list, run in the given order.
    pub fn new(steps: Vec<Box<dyn VerificationStep>>) -> Self {
        Self {
            steps,
            deadline: None,
        }
    }

    /// The release checklist: branches, files, PR discovery, merge target,
    /// merge method.
    pub fn standard(file_rules: Vec<FileRule>) -> Self {
        Self::new(vec![
            Box::new(BranchCheck),
            Box::new(FileIntegrityCheck::new(file_rules)),
            Box::new(PullRequestDiscovery),
            Box::new(MergeTargetCheck),
            Box::new(MergeMethodCheck),
        ])
    }

    /// Bound the whole run. A step still running at the deadline fails and
    /// ends the run.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn stages(&self) -> Vec<PipelineStage> {
        self.steps.iter().map(|s| s.stage()).collect()
    }

    pub async fn run(&self, spec: &ReleaseSpec, ctx: &RepositoryContext) -> VerificationReport {
        self.run_observed(spec, ctx, &SilentObserver).await.report
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run_observed(
        &self,
        spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        observer: &dyn PipelineObserver,
    ) -> PipelineRun {
        let deadline = self.deadline.map(|d| Instant::now() + d);
        let mut facts = RunFacts::default();
        let mut results = Vec::with_capacity(self.steps.len());

        // A caller-supplied context satisfies the environment state.
        let mut state = PipelineStage::Environment.advance();

        info!(repository = %ctx.slug(), steps = self.steps.len(), "starting release verification");

        for step in &self.steps {
            observer.step_started(step.stage(), step.name());

            let span = info_span!("step", stage = %step.stage());
            let execution = step.execute(spec, ctx, &mut facts).instrument(span);
            let result = match deadline {
                None => execution.await,
                Some(at) => match tokio::time::timeout_at(at, execution).await {
                    Ok(result) => result,
                    Err(_) => StepResult::fail(
                        step.stage(),
                        step.name(),
                        vec!["deadline exceeded before the step completed".to_string()],
                    ),
                },
            };

            observer.step_finished(&result);
            let passed = result.passed;
            results.push(result);

            state = state.transition(passed);
            if !passed {
                warn!(stage = %step.stage(), "verification stopped at failing step");
                break;
            }
        }

        // Custom step lists may be shorter than the checklist.
        if state != PipelineStage::Failed {
            state = PipelineStage::Done;
        }

        let report = VerificationReport::finish(results, state);
        info!(passed = report.passed(), steps = report.steps().len(), "release verification finished");
        PipelineRun { report, facts }
    }
}
