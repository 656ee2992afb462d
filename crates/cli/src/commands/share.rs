//! share command - Share tagged snapshots with another account
//!
//! Adds the destination account to the restore permissions of every
//! available snapshot tagged shareAndCopy=YES. Pending shares are reported
//! but do not fail the run unless --strict is given.

use clap::Args;
use snaptool_core::{RunOptions, Settings, ShareConfig, run_share};
use snaptool_rds::RdsClient;

use super::{Overrides, finish, source};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Share tagged snapshots with another account
#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Snapshot pattern: a regex or ALL_INSTANCES [env: PATTERN]
    #[arg(long)]
    pub pattern: Option<String>,

    /// Account to share with [env: DEST_ACCOUNT]
    #[arg(long)]
    pub dest_account: Option<String>,

    /// Fail the run when any share is pending [env: SHARE_ESCALATE_FAILURES]
    #[arg(long)]
    pub strict: bool,

    /// Region to share from [env: REGION_OVERRIDE / AWS_DEFAULT_REGION]
    #[arg(long)]
    pub region: Option<String>,
}

impl ShareArgs {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::new();
        if let Some(p) = &self.pattern {
            overrides.insert("PATTERN", p.clone());
        }
        if let Some(a) = &self.dest_account {
            overrides.insert("DEST_ACCOUNT", a.clone());
        }
        if self.strict {
            overrides.insert("SHARE_ESCALATE_FAILURES", "true".into());
        }
        if let Some(r) = &self.region {
            overrides.insert("REGION_OVERRIDE", r.clone());
        }
        overrides
    }
}

/// Execute the share command
pub async fn execute(
    args: ShareArgs,
    settings: &Settings,
    options: &RunOptions,
    formatter: &Formatter,
) -> ExitCode {
    let overrides = args.overrides();
    let config = match ShareConfig::resolve(&source(settings, &overrides)) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let client = RdsClient::new(config.region.clone()).await;
    finish(run_share(&client, &config, options).await, formatter)
}
