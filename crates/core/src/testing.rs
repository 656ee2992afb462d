//! In-memory SnapshotService used by workflow tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::dispatch::share::SHARE_TAG_KEY;
use crate::error::{Error, Result};
use crate::snapshot::{SnapshotPage, SnapshotRecord, Tags};
use crate::traits::{CopyJob, DeleteJob, ShareJob, SnapshotService};

/// Page size small enough to exercise pagination in every test
const PAGE_SIZE: usize = 2;

/// A region's worth of snapshots whose state changes as mutations succeed
pub struct FakeService {
    region: String,
    snapshots: Mutex<Vec<SnapshotRecord>>,
    copied: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    shared: Mutex<Vec<ShareJob>>,
    fail_mutations: bool,
    fail_listing: bool,
}

impl FakeService {
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
            snapshots: Mutex::new(Vec::new()),
            copied: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            shared: Mutex::new(Vec::new()),
            fail_mutations: false,
            fail_listing: false,
        }
    }

    pub fn with_snapshot(self, id: &str, instance: &str) -> Self {
        let record = SnapshotRecord::new(id, instance, &self.region);
        self.snapshots.lock().unwrap().push(record);
        self
    }

    /// Add a snapshot carrying a `shareAndCopy` tag
    pub fn with_tagged_snapshot(self, id: &str, instance: &str, share: &str) -> Self {
        let mut record = SnapshotRecord::new(id, instance, &self.region);
        record.tags.insert(SHARE_TAG_KEY.into(), share.into());
        self.snapshots.lock().unwrap().push(record);
        self
    }

    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn shared(&self) -> Vec<ShareJob> {
        self.shared.lock().unwrap().clone()
    }

    fn check_mutation(&self, id: &str) -> Result<()> {
        if self.fail_mutations {
            Err(Error::Network(format!("injected failure for {id}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SnapshotService for FakeService {
    async fn list_snapshots(&self, marker: Option<String>) -> Result<SnapshotPage> {
        if self.fail_listing {
            return Err(Error::Listing {
                region: self.region.clone(),
                message: "injected listing failure".into(),
            });
        }

        let start = marker.map_or(0, |m| m.parse::<usize>().unwrap_or(0));
        let snapshots = self.snapshots.lock().unwrap();
        let end = (start + PAGE_SIZE).min(snapshots.len());
        let page = snapshots.get(start..end).unwrap_or_default().to_vec();

        Ok(SnapshotPage {
            snapshots: page,
            marker: (end < snapshots.len()).then(|| end.to_string()),
        })
    }

    async fn copy_snapshot(&self, job: &CopyJob) -> Result<()> {
        self.check_mutation(&job.identifier)?;

        let mut record = SnapshotRecord::new(&job.identifier, "", &self.region);
        record.source_region = Some(job.source_region.clone());
        self.snapshots.lock().unwrap().push(record);
        self.copied.lock().unwrap().push(job.identifier.clone());
        Ok(())
    }

    async fn delete_snapshot(&self, job: &DeleteJob) -> Result<()> {
        self.check_mutation(&job.identifier)?;

        let mut snapshots = self.snapshots.lock().unwrap();
        let before = snapshots.len();
        snapshots.retain(|s| s.identifier != job.identifier);
        if snapshots.len() == before {
            return Err(Error::NotFound(job.identifier.clone()));
        }
        self.deleted.lock().unwrap().push(job.identifier.clone());
        Ok(())
    }

    async fn list_tags(&self, arn: &str) -> Result<Tags> {
        let snapshots = self.snapshots.lock().unwrap();
        snapshots
            .iter()
            .find(|s| s.arn == arn)
            .map(|s| s.tags.clone())
            .ok_or_else(|| Error::NotFound(arn.to_string()))
    }

    async fn share_snapshot(&self, job: &ShareJob) -> Result<()> {
        self.check_mutation(&job.identifier)?;
        self.shared.lock().unwrap().push(job.clone());
        Ok(())
    }
}
