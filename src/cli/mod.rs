pub mod output;
pub mod types;
pub mod verify;

pub use output::ReportPrinter;
pub use types::Cli;

use console::style;

use crate::infrastructure::logging::scrub_secrets;

/// Print a fatal error and its causes to stderr.
pub fn handle_error(err: &anyhow::Error) {
    eprintln!("{} {}", style("error:").red().bold(), scrub_secrets(&err.to_string()));
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", scrub_secrets(&cause.to_string()));
    }
}
