//! Console narration for a verification run.
//!
//! Progress goes to stdout, failure diagnostics to stderr.

use console::style;

use crate::domain::models::{PipelineStage, ReleaseSpec, RepositoryContext, StepResult};
use crate::services::{PipelineObserver, PipelineRun};

/// Prints each checklist step as the pipeline runs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPrinter;

impl ReportPrinter {
    pub const fn new() -> Self {
        Self
    }

    /// The first checklist line, printed once configuration has loaded.
    pub fn environment_loaded(&self, ctx: &RepositoryContext) {
        println!("{}", step_heading(PipelineStage::Environment, "environment"));
        println!("  {} credentials loaded for {}", style("✓").green(), ctx.slug());
    }

    /// Closing lines: a banner on success, the failing step otherwise.
    pub fn summary(&self, spec: &ReleaseSpec, ctx: &RepositoryContext, run: &PipelineRun) {
        if run.report.passed() {
            println!();
            for line in success_banner(spec, ctx, run) {
                println!("{line}");
            }
        } else if let Some(failed) = run.report.first_failure() {
            eprintln!();
            eprintln!("{}", failure_line(failed));
        }
    }
}

impl PipelineObserver for ReportPrinter {
    fn step_started(&self, stage: PipelineStage, name: &str) {
        println!("{}", step_heading(stage, name));
    }

    fn step_finished(&self, result: &StepResult) {
        if result.passed {
            if result.diagnostics.is_empty() {
                println!("  {} {} passed", style("✓").green(), result.name);
            }
            for line in &result.diagnostics {
                println!("  {} {line}", style("✓").green());
            }
        } else {
            for line in &result.diagnostics {
                eprintln!("  {} {line}", style("✗").red());
            }
        }
    }
}

/// `[n/6] Checking <name>...`
pub fn step_heading(stage: PipelineStage, name: &str) -> String {
    let position = stage.position().unwrap_or(PipelineStage::CHECKLIST_LEN);
    format!(
        "{} Checking {name}...",
        style(format!("[{position}/{}]", PipelineStage::CHECKLIST_LEN)).bold()
    )
}

pub fn failure_line(failed: &StepResult) -> String {
    let position = failed.stage.position().unwrap_or(0);
    format!(
        "{} Release verification failed at step {position}/{} ({})",
        style("✗").red().bold(),
        PipelineStage::CHECKLIST_LEN,
        failed.name
    )
}

pub fn success_banner(spec: &ReleaseSpec, ctx: &RepositoryContext, run: &PipelineRun) -> Vec<String> {
    let pull_request = run.facts.release_pr.as_ref().map_or_else(
        || "unknown".to_string(),
        |pr| format!("#{} {}", pr.number, pr.title),
    );

    vec![
        format!(
            "{} {}",
            style("✓").green().bold(),
            style(format!("{} verified", spec.pr_title_keyword)).bold()
        ),
        format!("  Repository:     {}", ctx.slug()),
        format!(
            "  Release branch: {} -> {}",
            spec.release_branch, spec.base_branch
        ),
        format!("  Pull request:   {pull_request}"),
        "  Merge method:   Squash and Merge".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::adapters::ScriptedGateway;
    use crate::domain::models::{PullRequestSummary, VerificationReport};
    use crate::services::RunFacts;

    fn ctx() -> RepositoryContext {
        RepositoryContext::new("acme", "harmony", Arc::new(ScriptedGateway::new())).unwrap()
    }

    #[test]
    fn test_step_heading_shows_checklist_position() {
        let heading = step_heading(PipelineStage::PrDiscovery, "release PR discovery");
        assert!(heading.contains("[4/6]"));
        assert!(heading.contains("Checking release PR discovery..."));
    }

    #[test]
    fn test_failure_line_names_step() {
        let failed = StepResult::fail(PipelineStage::MergeMethod, "merge method", vec![]);
        let line = failure_line(&failed);
        assert!(line.contains("step 6/6"));
        assert!(line.contains("(merge method)"));
    }

    #[test]
    fn test_success_banner_summarizes_release() {
        let run = PipelineRun {
            report: VerificationReport::finish(vec![], PipelineStage::Done),
            facts: RunFacts {
                release_pr: Some(PullRequestSummary {
                    number: 42,
                    title: "Release v1.1.0".to_string(),
                    merged_at: Some(Utc::now()),
                    base_ref: "main".to_string(),
                    merge_commit_sha: Some("m1".to_string()),
                }),
                merge_commit: None,
            },
        };

        let banner = success_banner(&ReleaseSpec::default(), &ctx(), &run).join("\n");
        assert!(banner.contains("acme/harmony"));
        assert!(banner.contains("release-v1.1.0 -> main"));
        assert!(banner.contains("#42 Release v1.1.0"));
        assert!(banner.contains("Squash and Merge"));
    }
}
