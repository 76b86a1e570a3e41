use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Env file holding release credentials, loaded before anything else.
pub const ENV_FILE: &str = ".env.release";

/// Optional project config overriding the built-in release policy.
pub const CONFIG_FILE: &str = ".release-verifier/config.yaml";

/// Release token variable.
pub const TOKEN_VAR: &str = "GITHUB_RELEASE_TOKEN";

/// Organization variable.
pub const ORGANIZATION_VAR: &str = "GITHUB_ORG_HARMONY";

/// Prefix for general overrides, `__` separating nested keys.
pub const ENV_PREFIX: &str = "RELEASE_VERIFIER_";

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_RELEASE_TOKEN is not set (add it to .env.release; the token needs repo read access)")]
    MissingToken,

    #[error("GITHUB_ORG_HARMONY is not set (add it to .env.release, e.g. my-team-harmony)")]
    MissingOrganization,

    #[error("Repository name cannot be empty")]
    EmptyRepository,

    #[error("The {0} branch name cannot be empty")]
    EmptyBranch(&'static str),

    #[error("The PR title keyword cannot be empty")]
    EmptyTitleKeyword,

    #[error("At least one file rule is required")]
    NoFileRules,

    #[error("File rule '{0}': path and branch cannot be empty")]
    IncompleteFileRule(String),

    #[error("File rule '{0}': min_size_bytes must be greater than 0")]
    InvalidMinSize(String),

    #[error("File rule '{0}': required content cannot be empty or blank")]
    EmptyPredicate(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid deadline_secs: {0}. Must be at least 1 when set")]
    InvalidDeadline(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Failed to read .env.release: {0}")]
    EnvFile(String),

    #[error("Failed to extract configuration: {0}")]
    Extract(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (the harmony v1.1.0 release policy)
    /// 2. .release-verifier/config.yaml (optional)
    /// 3. RELEASE_VERIFIER_* environment variables
    /// 4. GITHUB_RELEASE_TOKEN / GITHUB_ORG_HARMONY
    ///
    /// `.env.release` is read into the process environment first; variables
    /// already set in the environment win over the file.
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_env_file(ENV_FILE)?;
        Self::load_from(CONFIG_FILE)
    }

    /// Load without touching any env file, reading YAML from `path`
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let config: Config = Self::figment(path.as_ref())
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Read an env file into the process environment. A missing file is
    /// not an error; the variables may come from the real environment.
    /// A file that exists but cannot be parsed is.
    pub fn load_env_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
        match dotenvy::from_path(path.as_ref()) {
            Ok(()) => {
                tracing::debug!(path = %path.as_ref().display(), "loaded env file");
                Ok(())
            }
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.as_ref().display(), "no env file");
                Ok(())
            }
            Err(e) => Err(ConfigError::EnvFile(e.to_string())),
        }
    }

    /// The provider stack, exposed for tests and diagnostics
    ///
    /// Credential variables are merged verbatim as strings, so an all-digit
    /// organization name stays a name.
    pub fn figment(config_path: &Path) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        for (var, key) in [
            (TOKEN_VAR, "github.token"),
            (ORGANIZATION_VAR, "repository.organization"),
        ] {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if config.repository.organization.trim().is_empty() {
            return Err(ConfigError::MissingOrganization);
        }
        if config.repository.name.trim().is_empty() {
            return Err(ConfigError::EmptyRepository);
        }

        if config.release.release_branch.trim().is_empty() {
            return Err(ConfigError::EmptyBranch("release"));
        }
        if config.release.base_branch.trim().is_empty() {
            return Err(ConfigError::EmptyBranch("base"));
        }
        if config.release.pr_title_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyTitleKeyword);
        }

        if config.files.is_empty() {
            return Err(ConfigError::NoFileRules);
        }
        for rule in &config.files {
            if rule.path.trim().is_empty() || rule.branch.trim().is_empty() {
                return Err(ConfigError::IncompleteFileRule(rule.name.clone()));
            }
            if rule.min_size_bytes == 0 {
                return Err(ConfigError::InvalidMinSize(rule.name.clone()));
            }
            let required = rule.predicate.required();
            if required.is_empty() || required.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::EmptyPredicate(rule.name.clone()));
            }
        }

        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }
        if let Some(0) = config.pipeline.deadline_secs {
            return Err(ConfigError::InvalidDeadline(0));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
