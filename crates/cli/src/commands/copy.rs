//! copy command - Copy snapshots to the destination region
//!
//! Copies source-owned snapshots younger than the retention window into the
//! destination region, skipping those already there.

use clap::Args;
use snaptool_core::{CopyConfig, RunOptions, Settings, run_copy};
use snaptool_rds::RdsClient;

use super::{Overrides, finish, source};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Copy snapshots to the destination region
#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Snapshot pattern: a regex or ALL_SNAPSHOTS [env: SNAPSHOT_PATTERN]
    #[arg(long)]
    pub pattern: Option<String>,

    /// Region to copy into [env: DEST_REGION]
    #[arg(long)]
    pub dest_region: Option<String>,

    /// Only copy snapshots younger than this many days [env: RETENTION_DAYS]
    #[arg(long)]
    pub retention_days: Option<i64>,

    /// Key to encrypt copies with in the destination region [env: KMS_KEY_DEST_REGION]
    #[arg(long)]
    pub kms_key_dest: Option<String>,

    /// Key of encrypted source snapshots [env: KMS_KEY_SOURCE_REGION]
    #[arg(long)]
    pub kms_key_source: Option<String>,

    /// Region to copy from [env: REGION_OVERRIDE / AWS_DEFAULT_REGION]
    #[arg(long)]
    pub region: Option<String>,
}

impl CopyArgs {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::new();
        if let Some(p) = &self.pattern {
            overrides.insert("SNAPSHOT_PATTERN", p.clone());
        }
        if let Some(r) = &self.dest_region {
            overrides.insert("DEST_REGION", r.clone());
        }
        if let Some(d) = self.retention_days {
            overrides.insert("RETENTION_DAYS", d.to_string());
        }
        if let Some(k) = &self.kms_key_dest {
            overrides.insert("KMS_KEY_DEST_REGION", k.clone());
        }
        if let Some(k) = &self.kms_key_source {
            overrides.insert("KMS_KEY_SOURCE_REGION", k.clone());
        }
        if let Some(r) = &self.region {
            overrides.insert("REGION_OVERRIDE", r.clone());
        }
        overrides
    }
}

/// Execute the copy command
pub async fn execute(
    args: CopyArgs,
    settings: &Settings,
    options: &RunOptions,
    formatter: &Formatter,
) -> ExitCode {
    let overrides = args.overrides();
    let config = match CopyConfig::resolve(&source(settings, &overrides)) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let source_client = RdsClient::new(config.region.clone()).await;
    let dest_client = RdsClient::new(config.dest_region.clone()).await;
    tracing::debug!(
        "Copying from {} to {}",
        source_client.region(),
        dest_client.region()
    );

    finish(
        run_copy(&source_client, &dest_client, &config, options).await,
        formatter,
    )
}
