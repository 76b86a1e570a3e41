//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Built-in release policy defaults
//! - Optional YAML project file
//! - Environment variable overrides and release credentials
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
