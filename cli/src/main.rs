//! cf - command line client for Cloud Foundry style platforms

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use cf_cli::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr, filtered by `CF_LOG` (default `warn`, or
/// `debug` with `--verbose`). User-facing output never goes through here.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CF_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
