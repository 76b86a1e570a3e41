//! CLI type definitions

use clap::Parser;

/// Everything the verifier needs comes from `.env.release`, the environment
/// and `.release-verifier/config.yaml`, so the command takes no arguments.
#[derive(Parser, Debug)]
#[command(name = "release-verifier")]
#[command(
    about = "Verify that a release was integrated into the base branch through a squash-merged PR",
    long_about = None
)]
#[command(version)]
pub struct Cli {}
