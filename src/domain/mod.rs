//! Domain layer for release verification
//!
//! This module contains the release policy, repository records, pipeline
//! results and the gateway port the checks query through.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ContextError, GatewayError, GatewayResult};
