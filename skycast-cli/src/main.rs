//! Binary crate for the `skycast` command-line dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Rendering pipeline results delivered to the main thread

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // The main thread owns all presentation output (the render context);
    // remote work runs on this runtime and reports back over a channel.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let cmd = cli::Cli::parse();
    cmd.run(&runtime)
}
