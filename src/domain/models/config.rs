use std::fmt;

use serde::{Deserialize, Serialize};

use super::release::{default_file_rules, FileRule, ReleaseSpec};

/// Main configuration structure for the release verifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Repository under test
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// GitHub API access
    #[serde(default)]
    pub github: GithubConfig,

    /// Release policy under test
    #[serde(default)]
    pub release: ReleaseSpec,

    /// Required files, checked in declared order
    #[serde(default = "default_file_rules")]
    pub files: Vec<FileRule>,

    /// Pipeline limits
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            github: GithubConfig::default(),
            release: ReleaseSpec::default(),
            files: default_file_rules(),
            pipeline: PipelineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Repository coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RepositoryConfig {
    /// Owning organization; usually supplied through `GITHUB_ORG_HARMONY`
    #[serde(default)]
    pub organization: String,

    /// Repository name
    #[serde(default = "default_repository_name")]
    pub name: String,
}

fn default_repository_name() -> String {
    "harmony".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            name: default_repository_name(),
        }
    }
}

/// GitHub REST API settings
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// Release token; usually supplied through `GITHUB_RELEASE_TOKEN`
    #[serde(default)]
    pub token: String,

    /// API root, overridable for GitHub Enterprise
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Pipeline limits
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Overall run deadline in seconds; unset means no deadline
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
