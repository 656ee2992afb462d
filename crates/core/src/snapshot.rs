//! Snapshot metadata as observed at listing time
//!
//! Records are never mutated locally. Every invocation re-lists and works
//! from fresh remote state.

use std::collections::HashMap;
use std::fmt;

/// Tag set attached to a snapshot
pub type Tags = HashMap<String, String>;

/// Lifecycle status reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    Creating,
    Available,
    Failed,
    Other(String),
}

impl SnapshotStatus {
    /// Parse a remote status string, ignoring case
    pub fn parse(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "creating" => Self::Creating,
            "available" => Self::Available,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creating => f.write_str("creating"),
            Self::Available => f.write_str("available"),
            Self::Failed => f.write_str("failed"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// How the snapshot came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotType {
    Manual,
    Automated,
    Other,
}

impl SnapshotType {
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "manual" => Self::Manual,
            "automated" => Self::Automated,
            _ => Self::Other,
        }
    }
}

/// Metadata for one database snapshot
#[derive(Debug, Clone)]
pub struct SnapshotRecord {
    /// Snapshot identifier, unique within a region
    pub identifier: String,

    /// Resource name (ARN)
    pub arn: String,

    /// Identifier of the database instance the snapshot was taken from
    pub instance_identifier: String,

    pub status: SnapshotStatus,

    /// Region the snapshot lives in
    pub region: String,

    /// Region the snapshot was copied from, if it is the product of a copy
    pub source_region: Option<String>,

    pub snapshot_type: SnapshotType,

    pub encrypted: bool,

    pub kms_key_id: Option<String>,

    /// Tags returned with the listing; may be empty if the listing omits them
    pub tags: Tags,
}

impl SnapshotRecord {
    /// Create a manual, available, unencrypted snapshot record
    pub fn new(
        identifier: impl Into<String>,
        instance_identifier: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let identifier = identifier.into();
        let region = region.into();
        Self {
            arn: format!("arn:aws:rds:{region}:000000000000:snapshot:{identifier}"),
            identifier,
            instance_identifier: instance_identifier.into(),
            status: SnapshotStatus::Available,
            region,
            source_region: None,
            snapshot_type: SnapshotType::Manual,
            encrypted: false,
            kms_key_id: None,
            tags: Tags::new(),
        }
    }

    /// Whether this snapshot was copied into its region from another one
    pub fn is_copy_from_other_region(&self) -> bool {
        self.source_region
            .as_deref()
            .is_some_and(|source| source != self.region)
    }
}

/// One page of a snapshot listing
#[derive(Debug, Clone, Default)]
pub struct SnapshotPage {
    pub snapshots: Vec<SnapshotRecord>,

    /// Continuation marker; `None` on the last page
    pub marker: Option<String>,
}
