use super::config::{LogConfig, LogFormat};
use anyhow::Result;
use std::io;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logger implementation using tracing
///
/// Logs always go to stderr so stdout stays reserved for the verification
/// narration.
pub struct LoggerImpl;

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a subscriber is already set
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        // RUST_LOG, when set, refines the configured default
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(default_level).into())
            .from_env_lossy();

        match config.format {
            LogFormat::Json => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_filter(env_filter);

                tracing_subscriber::registry()
                    .with(stderr_layer)
                    .try_init()?;
            }
            LogFormat::Pretty => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .with_filter(env_filter);

                tracing_subscriber::registry()
                    .with(stderr_layer)
                    .try_init()?;
            }
        }

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            "logger initialized"
        );

        Ok(Self)
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
