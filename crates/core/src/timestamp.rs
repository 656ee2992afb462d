//! Creation time extraction from snapshot identifiers
//!
//! Snapshot identifiers carry their creation time as a `YYYY-MM-DD-HH-mm`
//! suffix after the instance identifier, e.g. `db-prod-01-2024-01-01-00-00`.
//! The suffix is read as UTC.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::snapshot::SnapshotRecord;

/// strftime-style format of the identifier suffix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// Derive the creation instant of a snapshot from its identifier
///
/// Returns `None` when the identifier does not contain `{instance}-` or the
/// text following it is not a well-formed timestamp.
pub fn extract(record: &SnapshotRecord) -> Option<Timestamp> {
    let suffix = suffix(&record.identifier, &record.instance_identifier)?;
    parse(suffix)
}

/// Parse a bare `YYYY-MM-DD-HH-mm` string
pub fn parse(suffix: &str) -> Option<Timestamp> {
    let civil = DateTime::strptime(TIMESTAMP_FORMAT, suffix).ok()?;
    civil.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

fn suffix<'a>(identifier: &'a str, instance_identifier: &str) -> Option<&'a str> {
    if instance_identifier.is_empty() {
        return None;
    }

    let marker = format!("{instance_identifier}-");
    let start = identifier.find(&marker)? + marker.len();
    identifier.get(start..)
}
