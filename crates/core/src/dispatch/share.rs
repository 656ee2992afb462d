//! Cross-account sharing of tagged snapshots

use crate::config::ShareConfig;
use crate::report::{Outcome, PassReport};
use crate::snapshot::{SnapshotRecord, Tags};
use crate::traits::{ShareJob, SnapshotService};
use crate::workflow::{RunOptions, Workflow};

/// Tag that opts a snapshot into sharing
pub const SHARE_TAG_KEY: &str = "shareAndCopy";

/// Required value of [`SHARE_TAG_KEY`], matched exactly
pub const SHARE_TAG_VALUE: &str = "YES";

/// Grant the destination account restore access to every tagged candidate
///
/// Granting an account that already has access is a no-op on the remote
/// side, so every run re-issues the grant for all tagged snapshots.
pub async fn share_pass<S>(
    service: &S,
    candidates: &[&SnapshotRecord],
    config: &ShareConfig,
    options: &RunOptions,
) -> PassReport
where
    S: SnapshotService + ?Sized,
{
    let mut report = PassReport::new(Workflow::Share, &config.region, options.dry_run);

    for snapshot in candidates {
        let outcome = share_one(service, snapshot, config, options).await;
        report.record(snapshot, outcome);
    }

    report
}

/// Whether a tag set opts the snapshot into sharing
pub fn is_tagged_for_share(tags: &Tags) -> bool {
    tags.get(SHARE_TAG_KEY)
        .is_some_and(|value| value == SHARE_TAG_VALUE)
}

async fn share_one<S>(
    service: &S,
    snapshot: &SnapshotRecord,
    config: &ShareConfig,
    options: &RunOptions,
) -> Outcome
where
    S: SnapshotService + ?Sized,
{
    let id = &snapshot.identifier;

    if !snapshot.status.is_available() {
        tracing::debug!("Not sharing {id}. Status is {}", snapshot.status);
        return Outcome::Skipped(format!("status is {}", snapshot.status));
    }

    let fetched;
    let tags = if snapshot.tags.is_empty() {
        match service.list_tags(&snapshot.arn).await {
            Ok(tags) => {
                fetched = tags;
                &fetched
            }
            Err(e) => {
                tracing::error!("Exception sharing {id}: {e}");
                return Outcome::Pending(e.to_string());
            }
        }
    } else {
        &snapshot.tags
    };

    if !is_tagged_for_share(tags) {
        tracing::debug!("Not sharing {id}. Not tagged {SHARE_TAG_KEY}={SHARE_TAG_VALUE}");
        return Outcome::Skipped(format!("not tagged {SHARE_TAG_KEY}={SHARE_TAG_VALUE}"));
    }

    let job = ShareJob {
        identifier: id.clone(),
        account_id: config.dest_account.clone(),
    };

    if options.dry_run {
        tracing::info!("Would share {id} with {}", job.account_id);
        return Outcome::DryRun;
    }

    match service.share_snapshot(&job).await {
        Ok(()) => {
            tracing::info!("Shared {id} with {}", job.account_id);
            Outcome::Acted
        }
        Err(e) => {
            tracing::error!("Exception sharing {id}: {e}");
            Outcome::Pending(e.to_string())
        }
    }
}
