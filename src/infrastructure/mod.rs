//! Infrastructure layer module
//!
//! - Configuration management (figment, dotenvy)
//! - Logging infrastructure (tracing, secret scrubbing)
//!
//! The GitHub adapter lives under `adapters`; this layer only carries the
//! ambient concerns every run needs before the pipeline starts.

pub mod config;
pub mod logging;
