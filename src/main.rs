// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! CrowdFiber CLI
//!
//! Command-line interface for browsing zones, addresses, orders and notes

use clap::Parser;
use crowdfiber_kit::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
