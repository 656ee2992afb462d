//! SnapshotService trait definition
//!
//! This trait defines the remote control-plane operations the engine needs.
//! It allows the workflows to be decoupled from the specific SDK implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::snapshot::{SnapshotPage, Tags};

/// Cross-region copy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    /// Identifier kept for the copy in the destination region
    pub identifier: String,

    /// ARN of the snapshot being copied
    pub source_arn: String,

    pub source_region: String,

    pub dest_region: String,

    /// Key the source snapshot is encrypted with
    ///
    /// Informational only. CopyDBSnapshot accepts just the destination key,
    /// so adapters log this value and never send it.
    pub source_kms_key_id: Option<String>,

    /// Key to re-encrypt the copy with in the destination region
    pub dest_kms_key_id: Option<String>,
}

/// Snapshot deletion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteJob {
    pub identifier: String,
}

/// Cross-account restore permission grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareJob {
    pub identifier: String,
    pub account_id: String,
}

/// Trait for database snapshot control-plane operations in one region
///
/// This trait is implemented by the RDS adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotService: Send + Sync {
    /// Fetch one page of snapshots, starting after `marker`
    async fn list_snapshots(&self, marker: Option<String>) -> Result<SnapshotPage>;

    /// Copy a snapshot into this service's region
    async fn copy_snapshot(&self, job: &CopyJob) -> Result<()>;

    /// Delete a snapshot
    async fn delete_snapshot(&self, job: &DeleteJob) -> Result<()>;

    /// List the tags of a snapshot by ARN
    async fn list_tags(&self, arn: &str) -> Result<Tags>;

    /// Add an account to the snapshot's restore permissions
    async fn share_snapshot(&self, job: &ShareJob) -> Result<()>;
}
