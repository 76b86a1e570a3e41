//! Verification checks and the pipeline that sequences them.

pub mod branch_check;
pub mod content_rules;
pub mod merge_target;
pub mod merge_topology;
pub mod pr_discovery;
pub mod verification_pipeline;

pub use branch_check::BranchCheck;
pub use content_rules::{evaluate_content, FileIntegrityCheck, RuleOutcome, RuleViolation};
pub use merge_target::{check_merge_target, MergeTargetCheck};
pub use merge_topology::{
    commit_violations, MergeMethodCheck, MergeTopologyValidator, TopologyViolation,
};
pub use pr_discovery::{discover_release_pr, PullRequestDiscovery};
pub use verification_pipeline::{
    PipelineObserver, PipelineRun, RunFacts, SilentObserver, VerificationPipeline,
    VerificationStep,
};
