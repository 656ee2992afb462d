//! delete command - Delete expired snapshots

use clap::Args;
use snaptool_core::{DeleteConfig, RunOptions, Settings, run_delete};
use snaptool_rds::RdsClient;

use super::{Overrides, finish, source};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete snapshots older than the retention window
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Snapshot pattern: a regex or ALL_INSTANCES [env: PATTERN]
    #[arg(long)]
    pub pattern: Option<String>,

    /// Delete snapshots older than this many days [env: RETENTION_DAYS, default: 7]
    #[arg(long)]
    pub retention_days: Option<i64>,

    /// Region to clean up [env: REGION_OVERRIDE / AWS_DEFAULT_REGION]
    #[arg(long)]
    pub region: Option<String>,
}

impl DeleteArgs {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::new();
        if let Some(p) = &self.pattern {
            overrides.insert("PATTERN", p.clone());
        }
        if let Some(d) = self.retention_days {
            overrides.insert("RETENTION_DAYS", d.to_string());
        }
        if let Some(r) = &self.region {
            overrides.insert("REGION_OVERRIDE", r.clone());
        }
        overrides
    }
}

/// Execute the delete command
pub async fn execute(
    args: DeleteArgs,
    settings: &Settings,
    options: &RunOptions,
    formatter: &Formatter,
) -> ExitCode {
    let overrides = args.overrides();
    let config = match DeleteConfig::resolve(&source(settings, &overrides)) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let client = RdsClient::new(config.region.clone()).await;
    finish(run_delete(&client, &config, options).await, formatter)
}
