//! Partitioning of listed snapshots into source-owned and dest-owned sets

use std::collections::HashSet;

use crate::pattern::Pattern;
use crate::snapshot::{SnapshotRecord, SnapshotType};

/// Snapshots in the inspection region that a workflow may act on
///
/// Keeps manual snapshots whose identifier matches `pattern` and which were
/// not themselves copied in from another region.
pub fn source_owned<'a>(
    pattern: &Pattern,
    snapshots: &'a [SnapshotRecord],
) -> Vec<&'a SnapshotRecord> {
    snapshots
        .iter()
        .filter(|s| s.snapshot_type == SnapshotType::Manual)
        .filter(|s| pattern.is_match(&s.identifier))
        .filter(|s| !s.is_copy_from_other_region())
        .collect()
}

/// Identifiers of matching snapshots already present in a destination region
pub fn dest_owned(pattern: &Pattern, snapshots: &[SnapshotRecord]) -> HashSet<String> {
    snapshots
        .iter()
        .filter(|s| s.snapshot_type == SnapshotType::Manual)
        .filter(|s| pattern.is_match(&s.identifier))
        .map(|s| s.identifier.clone())
        .collect()
}
