//! Paginated snapshot listing

use crate::error::Result;
use crate::snapshot::SnapshotRecord;
use crate::traits::SnapshotService;

/// List every snapshot visible to `service`, following continuation markers
///
/// A failed page aborts the listing; partial results are never returned.
pub async fn list_all<S>(service: &S) -> Result<Vec<SnapshotRecord>>
where
    S: SnapshotService + ?Sized,
{
    let mut snapshots = Vec::new();
    let mut marker: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = service.list_snapshots(marker.take()).await?;
        pages += 1;
        snapshots.extend(page.snapshots);

        match page.marker {
            Some(next) => marker = Some(next),
            None => break,
        }
    }

    tracing::debug!(pages, total = snapshots.len(), "Listed snapshots");
    Ok(snapshots)
}
