//! release-verifier CLI entry point.

use clap::Parser;

use release_verifier::cli::{handle_error, verify, Cli};

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    let code = match verify::execute().await {
        Ok(code) => code,
        Err(err) => {
            handle_error(&err);
            1
        }
    };

    std::process::exit(code);
}
