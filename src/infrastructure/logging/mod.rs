//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON formatting on stderr
//! - `RUST_LOG` filtering on top of the configured level
//! - Secret scrubbing for text that leaves the process

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::{scrub_secrets, SecretScrubber};
