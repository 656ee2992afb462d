//! Cross-region copy dispatcher

use std::collections::HashSet;

use crate::config::CopyConfig;
use crate::report::{Outcome, PassReport};
use crate::retention;
use crate::snapshot::SnapshotRecord;
use crate::timestamp;
use crate::traits::{CopyJob, SnapshotService};
use crate::workflow::{RunOptions, Workflow};

/// Copy every eligible candidate into the destination region
///
/// `dest` must be a service bound to the destination region. Snapshots that
/// are not yet available count as pending: they are expected to become
/// copyable on a later invocation.
pub async fn copy_pass<D>(
    dest: &D,
    candidates: &[&SnapshotRecord],
    dest_owned: &HashSet<String>,
    config: &CopyConfig,
    options: &RunOptions,
) -> PassReport
where
    D: SnapshotService + ?Sized,
{
    let mut report = PassReport::new(Workflow::Copy, &config.region, options.dry_run);

    for snapshot in candidates {
        let outcome = copy_one(dest, snapshot, dest_owned, config, options).await;
        report.record(snapshot, outcome);
    }

    if candidates.is_empty() {
        tracing::debug!("No further snapshots found");
    }

    report
}

async fn copy_one<D>(
    dest: &D,
    snapshot: &SnapshotRecord,
    dest_owned: &HashSet<String>,
    config: &CopyConfig,
    options: &RunOptions,
) -> Outcome
where
    D: SnapshotService + ?Sized,
{
    let id = &snapshot.identifier;

    let Some(created) = timestamp::extract(snapshot) else {
        tracing::info!("Not copying {id}. No valid timestamp");
        return Outcome::Skipped("no valid timestamp".into());
    };

    let age = retention::age_days(created, options.now);
    if !config.retention.copy_eligible(age) {
        tracing::info!("Not copying {id}. Older than {} days", config.retention.days);
        return Outcome::Skipped(format!("older than {} days", config.retention.days));
    }

    if dest_owned.contains(id) {
        tracing::debug!("Not copying {id}. Already present in {}", config.dest_region);
        return Outcome::Skipped(format!("already present in {}", config.dest_region));
    }

    if config.region == config.dest_region {
        tracing::debug!("Not copying {id}. Source and destination region are the same");
        return Outcome::Skipped("source region is the destination region".into());
    }

    if !snapshot.status.is_available() {
        tracing::error!("Remote copy pending: {id}: {}", snapshot.arn);
        return Outcome::Pending(format!("status is {}", snapshot.status));
    }

    let job = build_job(snapshot, config);

    if options.dry_run {
        tracing::info!("Would copy {id} to {}", job.dest_region);
        return Outcome::DryRun;
    }

    match dest.copy_snapshot(&job).await {
        Ok(()) => {
            tracing::info!("Copying {id} to remote region {}", job.dest_region);
            Outcome::Acted
        }
        Err(e) => {
            tracing::error!("Remote copy pending: {id}: {}", snapshot.arn);
            tracing::debug!("Copy of {id} failed: {e}");
            Outcome::Pending(e.to_string())
        }
    }
}

/// Build the copy request, applying key overrides to encrypted snapshots
fn build_job(snapshot: &SnapshotRecord, config: &CopyConfig) -> CopyJob {
    let (source_kms_key_id, dest_kms_key_id) = if snapshot.encrypted {
        (
            config
                .kms_key_source
                .key()
                .map(str::to_string)
                .or_else(|| snapshot.kms_key_id.clone()),
            config.kms_key_dest.key().map(str::to_string),
        )
    } else {
        (None, None)
    };

    CopyJob {
        identifier: snapshot.identifier.clone(),
        source_arn: snapshot.arn.clone(),
        source_region: config.region.clone(),
        dest_region: config.dest_region.clone(),
        source_kms_key_id,
        dest_kms_key_id,
    }
}
