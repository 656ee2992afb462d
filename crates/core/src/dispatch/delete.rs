//! Expired snapshot deletion

use crate::config::DeleteConfig;
use crate::report::{Outcome, PassReport};
use crate::retention;
use crate::snapshot::SnapshotRecord;
use crate::timestamp;
use crate::traits::{DeleteJob, SnapshotService};
use crate::workflow::{RunOptions, Workflow};

/// Delete every candidate older than the retention window
pub async fn delete_pass<S>(
    service: &S,
    candidates: &[&SnapshotRecord],
    config: &DeleteConfig,
    options: &RunOptions,
) -> PassReport
where
    S: SnapshotService + ?Sized,
{
    let mut report = PassReport::new(Workflow::Delete, &config.region, options.dry_run);

    for snapshot in candidates {
        let outcome = delete_one(service, snapshot, config, options).await;
        report.record(snapshot, outcome);
    }

    report
}

async fn delete_one<S>(
    service: &S,
    snapshot: &SnapshotRecord,
    config: &DeleteConfig,
    options: &RunOptions,
) -> Outcome
where
    S: SnapshotService + ?Sized,
{
    let id = &snapshot.identifier;

    let Some(created) = timestamp::extract(snapshot) else {
        tracing::info!("Not deleting {id}. No valid timestamp");
        return Outcome::Skipped("no valid timestamp".into());
    };

    let age = retention::age_days(created, options.now);
    tracing::debug!("{id} created {age:.2} days ago");

    if !config.retention.delete_eligible(age) {
        tracing::info!("Not deleting {id}. Created only {age:.2} days ago");
        return Outcome::Skipped(format!("created {age:.2} days ago"));
    }

    // Re-evaluated on the next invocation once the snapshot settles.
    if !snapshot.status.is_available() {
        tracing::info!("Not deleting {id}. Status is {}", snapshot.status);
        return Outcome::Skipped(format!("status is {}", snapshot.status));
    }

    if options.dry_run {
        tracing::info!("Would delete {id}");
        return Outcome::DryRun;
    }

    tracing::info!("Deleting {id}");
    let job = DeleteJob {
        identifier: id.clone(),
    };

    match service.delete_snapshot(&job).await {
        Ok(()) => Outcome::Acted,
        Err(e) => {
            tracing::error!("Could not delete {id}: {e}");
            Outcome::Pending(e.to_string())
        }
    }
}
