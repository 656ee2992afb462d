//! Per-pass outcome tracking and failure aggregation
//!
//! Each dispatcher pass returns a [`PassReport`]. The number of pending
//! items is the pass's failure count; [`PassReport::into_result`] turns a
//! nonzero count into the single retry signal for the next invocation.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::snapshot::SnapshotRecord;
use crate::workflow::Workflow;

/// What happened to one snapshot during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// Remote mutation issued successfully
    Acted,
    /// Mutation would have been issued, but the pass is a dry run
    DryRun,
    /// Not actionable in this pass; not a failure
    Skipped(String),
    /// Action did not complete; counts toward the failure total
    Pending(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Acted => "acted",
            Self::DryRun => "dry-run",
            Self::Skipped(_) => "skipped",
            Self::Pending(_) => "pending",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Skipped(reason) | Self::Pending(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Outcome for a single snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub identifier: String,
    pub arn: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Result of one dispatcher pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub workflow: Workflow,
    pub region: String,
    pub dry_run: bool,
    pub items: Vec<ItemReport>,
}

impl PassReport {
    pub fn new(workflow: Workflow, region: impl Into<String>, dry_run: bool) -> Self {
        Self {
            workflow,
            region: region.into(),
            dry_run,
            items: Vec::new(),
        }
    }

    pub fn record(&mut self, snapshot: &SnapshotRecord, outcome: Outcome) {
        self.items.push(ItemReport {
            identifier: snapshot.identifier.clone(),
            arn: snapshot.arn.clone(),
            outcome,
        });
    }

    /// Number of actions that did not complete in this pass
    pub fn pending_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Pending(_)))
    }

    pub fn acted_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Acted | Outcome::DryRun))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.outcome)).count()
    }

    /// Summary line for a pass with pending items
    pub fn pending_message(&self) -> String {
        let pending = self.pending_count();
        match self.workflow {
            Workflow::Copy => format!("Copies pending: {pending}. Needs retrying"),
            Workflow::Delete => format!("Snapshots pending delete: {pending}"),
            Workflow::Share => format!("Could not share all snapshots. Pending: {pending}"),
        }
    }

    /// Finish the pass
    ///
    /// With pending items, logs one summary error and, when `escalate` is
    /// set, returns [`Error::PendingFailures`] so the invocation is retried.
    pub fn into_result(self, escalate: bool) -> Result<Self> {
        let count = self.pending_count();
        if count == 0 {
            tracing::info!(
                workflow = %self.workflow,
                acted = self.acted_count(),
                skipped = self.skipped_count(),
                "Pass complete"
            );
            return Ok(self);
        }

        let message = self.pending_message();
        tracing::error!("{message}");

        if escalate {
            Err(Error::PendingFailures {
                workflow: self.workflow,
                count,
                message,
            })
        } else {
            Ok(self)
        }
    }
}
