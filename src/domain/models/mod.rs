//! Domain models for release verification.

pub mod config;
pub mod release;
pub mod report;
pub mod repository;

pub use config::{Config, GithubConfig, LoggingConfig, PipelineConfig, RepositoryConfig};
pub use release::{default_file_rules, ContentPredicate, FileRule, ReleaseSpec};
pub use report::{PipelineStage, StepResult, VerificationReport};
pub use repository::{CommitSummary, PullRequestSummary, RepositoryContext};
