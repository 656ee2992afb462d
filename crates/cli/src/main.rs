//! snaptool - RDS snapshot lifecycle automation
//!
//! Copies, shares and expires database snapshots. Meant to be run
//! repeatedly by a scheduler; a nonzero exit asks for a later retry.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use snaptool::commands::{self, Cli};
use snaptool_core::config::log_directive;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then LOG_LEVEL; --debug overrides both
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(log_directive(std::env::var("LOG_LEVEL").ok().as_deref()))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
