//! Release Verifier - release integration checks for GitHub repositories
//!
//! Confirms that a release was integrated correctly: the release and base
//! branches exist, the files each rule names carry the expected content at
//! their ref (the base branch by default), a merged PR with the release
//! keyword in its title targets the base branch, and that PR landed as a
//! single squash-merge commit.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Release policy, report model and the gateway port
//! - **Service Layer** (`services`): The individual checks and the fail-fast pipeline
//! - **Adapters** (`adapters`): GitHub REST client and a scripted in-memory gateway
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface and console narration
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use release_verifier::{RepositoryContext, ReleaseSpec, ScriptedGateway, VerificationPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = RepositoryContext::new("acme", "harmony", Arc::new(ScriptedGateway::new()))?;
//!     let report = VerificationPipeline::standard(vec![])
//!         .run(&ReleaseSpec::default(), &ctx)
//!         .await;
//!     std::process::exit(report.exit_code());
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{GitHubClient, ScriptedGateway};
pub use domain::models::{
    CommitSummary, Config, ContentPredicate, FileRule, PipelineStage, PullRequestSummary,
    ReleaseSpec, RepositoryContext, StepResult, VerificationReport,
};
pub use domain::ports::RepositoryGateway;
pub use domain::{ContextError, GatewayError, GatewayResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{PipelineObserver, PipelineRun, RunFacts, VerificationPipeline, VerificationStep};
