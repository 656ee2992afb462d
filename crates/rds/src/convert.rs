//! Conversions from SDK shapes into core snapshot records

use aws_sdk_rds::types::{DbSnapshot, Tag};

use snaptool_core::{SnapshotRecord, SnapshotStatus, SnapshotType, Tags};

/// Convert one DescribeDBSnapshots entry listed in `region`
pub(crate) fn snapshot_record(snapshot: &DbSnapshot, region: &str) -> SnapshotRecord {
    SnapshotRecord {
        identifier: snapshot
            .db_snapshot_identifier()
            .unwrap_or_default()
            .to_string(),
        arn: snapshot.db_snapshot_arn().unwrap_or_default().to_string(),
        instance_identifier: snapshot
            .db_instance_identifier()
            .unwrap_or_default()
            .to_string(),
        status: SnapshotStatus::parse(snapshot.status().unwrap_or_default()),
        region: region.to_string(),
        source_region: snapshot.source_region().map(str::to_string),
        snapshot_type: SnapshotType::parse(snapshot.snapshot_type().unwrap_or_default()),
        encrypted: snapshot.encrypted().unwrap_or(false),
        kms_key_id: snapshot.kms_key_id().map(str::to_string),
        tags: tags(snapshot.tag_list()),
    }
}

pub(crate) fn tags(list: &[Tag]) -> Tags {
    list.iter()
        .filter_map(|t| Some((t.key()?.to_string(), t.value().unwrap_or_default().to_string())))
        .collect()
}
