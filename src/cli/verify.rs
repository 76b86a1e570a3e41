//! The verification run behind the `release-verifier` binary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::adapters::GitHubClient;
use crate::cli::output::ReportPrinter;
use crate::domain::models::{Config, RepositoryContext};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::VerificationPipeline;

/// Load configuration, run the checklist against GitHub and return the
/// process exit code. Configuration and client setup failures are errors;
/// check failures are reported and turned into exit code 1.
pub async fn execute() -> Result<i32> {
    let config = ConfigLoader::load()?;
    LoggerImpl::init(&LogConfig::from(&config.logging))?;

    run(&config).await
}

/// Run the checklist for an already-loaded configuration.
pub async fn run(config: &Config) -> Result<i32> {
    let client = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;
    let ctx = RepositoryContext::new(
        config.repository.organization.clone(),
        config.repository.name.clone(),
        Arc::new(client),
    )?;

    let mut pipeline = VerificationPipeline::standard(config.files.clone());
    if let Some(secs) = config.pipeline.deadline_secs {
        pipeline = pipeline.with_deadline(Duration::from_secs(secs));
    }

    let printer = ReportPrinter::new();
    printer.environment_loaded(&ctx);

    let run = pipeline.run_observed(&config.release, &ctx, &printer).await;
    printer.summary(&config.release, &ctx, &run);

    Ok(run.report.exit_code())
}
