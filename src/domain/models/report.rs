//! Pipeline stages, per-step results and the final report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// States of the verification pipeline.
///
/// The pipeline walks `Environment → Branches → Files → PrDiscovery →
/// PrTarget → MergeMethod → Done` and drops into the absorbing `Failed`
/// state on the first failing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Environment,
    Branches,
    Files,
    PrDiscovery,
    PrTarget,
    MergeMethod,
    Done,
    Failed,
}

impl PipelineStage {
    /// Number of checklist positions shown to operators (`[n/6]`).
    pub const CHECKLIST_LEN: usize = 6;

    /// The state reached when the current step passes.
    pub const fn advance(self) -> Self {
        match self {
            Self::Environment => Self::Branches,
            Self::Branches => Self::Files,
            Self::Files => Self::PrDiscovery,
            Self::PrDiscovery => Self::PrTarget,
            Self::PrTarget => Self::MergeMethod,
            Self::MergeMethod | Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    /// The state reached after a step outcome.
    pub const fn transition(self, passed: bool) -> Self {
        if passed {
            self.advance()
        } else {
            Self::Failed
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// 1-based checklist position, `None` for terminal states.
    pub const fn position(self) -> Option<usize> {
        match self {
            Self::Environment => Some(1),
            Self::Branches => Some(2),
            Self::Files => Some(3),
            Self::PrDiscovery => Some(4),
            Self::PrTarget => Some(5),
            Self::MergeMethod => Some(6),
            Self::Done | Self::Failed => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Branches => "branches",
            Self::Files => "files",
            Self::PrDiscovery => "pr_discovery",
            Self::PrTarget => "pr_target",
            Self::MergeMethod => "merge_method",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub stage: PipelineStage,
    pub name: String,
    pub passed: bool,
    /// Ordered diagnostics. Failure reasons on a failed step; narration
    /// details on a passing one.
    pub diagnostics: Vec<String>,
}

impl StepResult {
    pub fn pass(stage: PipelineStage, name: impl Into<String>, diagnostics: Vec<String>) -> Self {
        Self {
            stage,
            name: name.into(),
            passed: true,
            diagnostics,
        }
    }

    pub fn fail(stage: PipelineStage, name: impl Into<String>, diagnostics: Vec<String>) -> Self {
        Self {
            stage,
            name: name.into(),
            passed: false,
            diagnostics,
        }
    }
}

/// Terminal artifact of a run: every executed step in order plus the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    steps: Vec<StepResult>,
    passed: bool,
    final_stage: PipelineStage,
}

impl VerificationReport {
    /// Seal a report. It passes only when the pipeline reached `Done` and
    /// every recorded step passed.
    pub fn finish(steps: Vec<StepResult>, final_stage: PipelineStage) -> Self {
        let passed = final_stage == PipelineStage::Done && steps.iter().all(|s| s.passed);
        Self {
            steps,
            passed,
            final_stage,
        }
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    pub const fn passed(&self) -> bool {
        self.passed
    }

    pub const fn final_stage(&self) -> PipelineStage {
        self.final_stage
    }

    pub fn step(&self, stage: PipelineStage) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.stage == stage)
    }

    /// The step that stopped the pipeline, if any.
    pub fn first_failure(&self) -> Option<&StepResult> {
        self.steps.iter().find(|s| !s.passed)
    }

    /// Process exit code for this report.
    pub const fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_walk_reaches_done() {
        let mut stage = PipelineStage::Environment;
        let mut visited = vec![stage];
        while !stage.is_terminal() {
            stage = stage.transition(true);
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![
                PipelineStage::Environment,
                PipelineStage::Branches,
                PipelineStage::Files,
                PipelineStage::PrDiscovery,
                PipelineStage::PrTarget,
                PipelineStage::MergeMethod,
                PipelineStage::Done,
            ]
        );
    }

    #[test]
    fn test_failed_is_absorbing() {
        assert_eq!(PipelineStage::Files.transition(false), PipelineStage::Failed);
        assert_eq!(PipelineStage::Failed.transition(true), PipelineStage::Failed);
        assert!(PipelineStage::Failed.is_terminal());
    }

    #[test]
    fn test_report_requires_done() {
        let steps = vec![StepResult::pass(PipelineStage::Branches, "branches", vec![])];
        let report = VerificationReport::finish(steps.clone(), PipelineStage::Files);
        assert!(!report.passed());
        assert_eq!(report.exit_code(), 1);

        let report = VerificationReport::finish(steps, PipelineStage::Done);
        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_first_failure() {
        let report = VerificationReport::finish(
            vec![
                StepResult::pass(PipelineStage::Branches, "branches", vec![]),
                StepResult::fail(PipelineStage::Files, "files", vec!["boom".to_string()]),
            ],
            PipelineStage::Failed,
        );
        assert_eq!(
            report.first_failure().map(|s| s.stage),
            Some(PipelineStage::Files)
        );
    }
}
