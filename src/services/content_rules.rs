//! Content rule engine and the file integrity step.
//!
//! Every rule is evaluated, in declared order, before the step decides; a
//! missing or malformed file fails its own rule without hiding the others.

use std::fmt;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::errors::GatewayError;
use crate::domain::models::{
    ContentPredicate, FileRule, PipelineStage, ReleaseSpec, RepositoryContext, StepResult,
};

use super::verification_pipeline::{RunFacts, VerificationStep};

/// Characters of a required snippet shown in a "missing content" diagnostic.
const SNIPPET_PREVIEW: usize = 50;

/// Why a file failed its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// The file could not be retrieved or decoded.
    Unavailable(GatewayError),
    /// Decoded text is shorter than the rule's minimum.
    TooSmall { actual: usize, required: usize },
    /// Required strings absent from the text.
    Missing {
        label: &'static str,
        missing: Vec<String>,
        abbreviate: bool,
    },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(err) if err.is_not_found() => f.write_str("not found"),
            Self::Unavailable(err) => write!(f, "unreadable: {err}"),
            Self::TooSmall { actual, required } => write!(
                f,
                "too small: {actual} bytes, at least {required} required ({} short)",
                required - actual
            ),
            Self::Missing {
                label,
                missing,
                abbreviate,
            } => {
                let shown: Vec<String> = missing
                    .iter()
                    .map(|s| {
                        if *abbreviate {
                            format!("'{}'", preview(s))
                        } else {
                            format!("'{s}'")
                        }
                    })
                    .collect();
                write!(f, "missing required {label}: {}", shown.join(", "))
            }
        }
    }
}

fn preview(snippet: &str) -> String {
    if snippet.chars().count() <= SNIPPET_PREVIEW {
        snippet.to_string()
    } else {
        let head: String = snippet.chars().take(SNIPPET_PREVIEW).collect();
        format!("{head}...")
    }
}

/// Check retrieved text against a rule's size threshold and predicate.
///
/// Size is measured on the decoded text in bytes. Matching is literal and
/// case-sensitive.
pub fn evaluate_content(rule: &FileRule, content: &str) -> Result<(), RuleViolation> {
    if content.len() < rule.min_size_bytes {
        return Err(RuleViolation::TooSmall {
            actual: content.len(),
            required: rule.min_size_bytes,
        });
    }

    let missing = rule.predicate.missing_from(content);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RuleViolation::Missing {
            label: rule.predicate.label(),
            missing: missing.into_iter().map(str::to_string).collect(),
            abbreviate: !matches!(rule.predicate, ContentPredicate::AllOfKeywords(_)),
        })
    }
}

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: FileRule,
    pub violation: Option<RuleViolation>,
}

impl RuleOutcome {
    pub const fn passed(&self) -> bool {
        self.violation.is_none()
    }

    /// One diagnostic line naming the file and the outcome.
    pub fn describe(&self) -> String {
        let target = format!("{} ({}@{})", self.rule.name, self.rule.path, self.rule.branch);
        match &self.violation {
            None => format!("{target}: ok"),
            Some(violation) => format!("{target}: {violation}"),
        }
    }
}

/// Evaluates the fixed list of file rules one at a time.
#[derive(Debug, Clone)]
pub struct FileIntegrityCheck {
    rules: Vec<FileRule>,
}

impl FileIntegrityCheck {
    pub const fn new(rules: Vec<FileRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FileRule] {
        &self.rules
    }

    /// Fetch and evaluate every rule in declared order.
    pub async fn evaluate_all(&self, ctx: &RepositoryContext) -> Vec<RuleOutcome> {
        let mut outcomes = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let violation = match ctx
                .gateway()
                .get_file_content(ctx.organization(), ctx.repository(), &rule.path, &rule.branch)
                .await
            {
                Ok(content) => evaluate_content(rule, &content).err(),
                Err(e) => Some(RuleViolation::Unavailable(e)),
            };

            if let Some(v) = &violation {
                warn!(file = %rule.path, branch = %rule.branch, violation = %v, "file rule failed");
            } else {
                info!(file = %rule.path, branch = %rule.branch, "file rule passed");
            }

            outcomes.push(RuleOutcome {
                rule: rule.clone(),
                violation,
            });
        }
        outcomes
    }
}

#[async_trait]
impl VerificationStep for FileIntegrityCheck {
    fn stage(&self) -> PipelineStage {
        PipelineStage::Files
    }

    fn name(&self) -> &'static str {
        "file integrity"
    }

    async fn execute(
        &self,
        _spec: &ReleaseSpec,
        ctx: &RepositoryContext,
        _facts: &mut RunFacts,
    ) -> StepResult {
        let outcomes = self.evaluate_all(ctx).await;

        if outcomes.iter().all(RuleOutcome::passed) {
            let lines = outcomes.iter().map(RuleOutcome::describe).collect();
            StepResult::pass(self.stage(), self.name(), lines)
        } else {
            let lines = outcomes
                .iter()
                .filter(|o| !o.passed())
                .map(RuleOutcome::describe)
                .collect();
            StepResult::fail(self.stage(), self.name(), lines)
        }
    }
}
