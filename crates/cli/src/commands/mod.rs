//! CLI command definitions and execution
//!
//! Each subcommand runs one workflow for one invocation. Configuration comes
//! from command-line overrides, then the environment, then the settings file.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use snaptool_core::{Error, PassReport, RunOptions, Settings, SettingsManager, Source};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod copy;
mod delete;
mod share;

/// snaptool - RDS snapshot lifecycle automation
///
/// Copies snapshots to a disaster-recovery region, shares them with another
/// account, and deletes them once expired. Each run re-lists snapshots and
/// makes forward progress; failed items are retried by running again.
#[derive(Parser, Debug)]
#[command(name = "snaptool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Evaluate and report without copying, deleting or sharing anything
    #[arg(long, global = true, default_value = "false")]
    pub dry_run: bool,

    /// Settings file (defaults to ~/.config/snaptool/config.toml)
    #[arg(long, global = true, env = "SNAPTOOL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Measure snapshot ages against this instant instead of now (RFC 3339)
    #[arg(long, global = true)]
    pub now: Option<Timestamp>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy fresh snapshots to the destination region
    Copy(copy::CopyArgs),

    /// Delete snapshots older than the retention window
    Delete(delete::DeleteArgs),

    /// Share snapshots tagged shareAndCopy=YES with another account
    Share(share::ShareArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    });

    let settings = match load_settings(cli.config.clone()) {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&format!("Failed to load settings: {e}"));
            return ExitCode::UsageError;
        }
    };

    let options = RunOptions {
        now: cli.now.unwrap_or_else(Timestamp::now),
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Copy(args) => copy::execute(args, &settings, &options, &formatter).await,
        Commands::Delete(args) => delete::execute(args, &settings, &options, &formatter).await,
        Commands::Share(args) => share::execute(args, &settings, &options, &formatter).await,
    }
}

fn load_settings(path: Option<PathBuf>) -> snaptool_core::Result<Settings> {
    let manager = match path {
        Some(p) => SettingsManager::with_path(p),
        None => SettingsManager::new()?,
    };
    tracing::debug!("Loading settings from {}", manager.path().display());
    manager.load()
}

/// Command-line overrides keyed by environment variable name
pub(crate) type Overrides = HashMap<&'static str, String>;

/// Configuration source: overrides, then environment, then settings file
pub(crate) fn source<'a>(settings: &'a Settings, overrides: &'a Overrides) -> Source<'a> {
    Source::new(settings, move |key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })
}

/// Report the outcome of a workflow run and map it to an exit code
pub(crate) fn finish(result: snaptool_core::Result<PassReport>, formatter: &Formatter) -> ExitCode {
    match result {
        Ok(report) => {
            formatter.report(&report);
            if report.pending_count() > 0 {
                formatter.warning(&report.pending_message());
            }
            ExitCode::Success
        }
        Err(Error::PendingFailures { message, .. }) => {
            formatter.error(&message);
            ExitCode::RetryPending
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_i32(e.exit_code()).unwrap_or(ExitCode::GeneralError)
        }
    }
}
