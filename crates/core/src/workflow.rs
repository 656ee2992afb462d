//! Workflow runners
//!
//! Each invocation runs exactly one workflow:
//! List → Filter → (Extract timestamp → Evaluate retention) → Dispatch → Aggregate.
//! Nothing is persisted between invocations; a failed pass is retried by
//! running the whole workflow again.

use std::fmt;

use jiff::Timestamp;
use serde::Serialize;

use crate::config::{CopyConfig, DeleteConfig, ShareConfig};
use crate::dispatch;
use crate::error::Result;
use crate::filter;
use crate::lister;
use crate::report::PassReport;
use crate::traits::SnapshotService;

/// The action a workflow dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Copy,
    Delete,
    Share,
}

impl Workflow {
    /// Whether pending items fail the invocation unless configured otherwise
    pub const fn escalates_by_default(self) -> bool {
        match self {
            Self::Copy | Self::Delete => true,
            Self::Share => false,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-invocation options shared by all workflows
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Instant ages are measured against
    pub now: Timestamp,
    /// Evaluate without issuing remote mutations
    pub dry_run: bool,
}

/// Copy fresh snapshots from the source region into the destination region
pub async fn run_copy<S, D>(
    source: &S,
    dest: &D,
    config: &CopyConfig,
    options: &RunOptions,
) -> Result<PassReport>
where
    S: SnapshotService + ?Sized,
    D: SnapshotService + ?Sized,
{
    let listed = lister::list_all(source).await?;
    let candidates = filter::source_owned(&config.pattern, &listed);

    let dest_listed = lister::list_all(dest).await?;
    let dest_owned = filter::dest_owned(&config.pattern, &dest_listed);

    tracing::info!(
        candidates = candidates.len(),
        in_destination = dest_owned.len(),
        "Evaluating snapshots for copy to {}",
        config.dest_region
    );

    let report = dispatch::copy::copy_pass(dest, &candidates, &dest_owned, config, options).await;
    report.into_result(Workflow::Copy.escalates_by_default())
}

/// Delete expired snapshots in the inspection region
pub async fn run_delete<S>(
    service: &S,
    config: &DeleteConfig,
    options: &RunOptions,
) -> Result<PassReport>
where
    S: SnapshotService + ?Sized,
{
    let listed = lister::list_all(service).await?;
    let candidates = filter::source_owned(&config.pattern, &listed);

    tracing::info!(
        candidates = candidates.len(),
        "Evaluating snapshots against {} day retention",
        config.retention.days
    );

    let report = dispatch::delete::delete_pass(service, &candidates, config, options).await;
    report.into_result(Workflow::Delete.escalates_by_default())
}

/// Share tagged snapshots with the destination account
pub async fn run_share<S>(
    service: &S,
    config: &ShareConfig,
    options: &RunOptions,
) -> Result<PassReport>
where
    S: SnapshotService + ?Sized,
{
    let listed = lister::list_all(service).await?;
    let candidates = filter::source_owned(&config.pattern, &listed);

    tracing::info!(
        candidates = candidates.len(),
        "Evaluating snapshots for sharing with {}",
        config.dest_account
    );

    let report = dispatch::share::share_pass(service, &candidates, config, options).await;
    report.into_result(config.escalate_failures || Workflow::Share.escalates_by_default())
}
