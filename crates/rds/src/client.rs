//! RDS client implementation
//!
//! Wraps aws-sdk-rds and implements the SnapshotService trait from snaptool-core.

use async_trait::async_trait;
use aws_sdk_rds::error::{DisplayErrorContext, ProvideErrorMetadata};

use snaptool_core::{
    CopyJob, DeleteJob, Error, Result, ShareJob, SnapshotPage, SnapshotService, Tags,
};

use crate::convert;

/// Page size requested from DescribeDBSnapshots (the API maximum)
const MAX_RECORDS: i32 = 100;

/// Snapshot attribute controlling which accounts may restore a snapshot
const RESTORE_ATTRIBUTE: &str = "restore";

/// RDS client bound to one region
pub struct RdsClient {
    inner: aws_sdk_rds::Client,
    region: String,
}

impl RdsClient {
    /// Create a client for `region` using the default credential chain
    pub async fn new(region: impl Into<String>) -> Self {
        let region = region.into();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;

        Self {
            inner: aws_sdk_rds::Client::new(&config),
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl SnapshotService for RdsClient {
    async fn list_snapshots(&self, marker: Option<String>) -> Result<SnapshotPage> {
        let response = self
            .inner
            .describe_db_snapshots()
            .max_records(MAX_RECORDS)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| match classify(&e, "DescribeDBSnapshots") {
                Error::Auth(message) => Error::Auth(message),
                other => Error::Listing {
                    region: self.region.clone(),
                    message: other.to_string(),
                },
            })?;

        let snapshots = response
            .db_snapshots()
            .iter()
            .map(|s| convert::snapshot_record(s, &self.region))
            .collect();

        Ok(SnapshotPage {
            snapshots,
            marker: response.marker().map(str::to_string),
        })
    }

    async fn copy_snapshot(&self, job: &CopyJob) -> Result<()> {
        if let Some(key) = &job.source_kms_key_id {
            tracing::debug!("Source snapshot {} encrypted with {key}", job.identifier);
        }

        self.inner
            .copy_db_snapshot()
            .source_db_snapshot_identifier(&job.source_arn)
            .target_db_snapshot_identifier(&job.identifier)
            .copy_tags(true)
            .set_kms_key_id(job.dest_kms_key_id.clone())
            .send()
            .await
            .map_err(|e| classify(&e, "CopyDBSnapshot"))?;

        Ok(())
    }

    async fn delete_snapshot(&self, job: &DeleteJob) -> Result<()> {
        self.inner
            .delete_db_snapshot()
            .db_snapshot_identifier(&job.identifier)
            .send()
            .await
            .map_err(|e| classify(&e, "DeleteDBSnapshot"))?;

        Ok(())
    }

    async fn list_tags(&self, arn: &str) -> Result<Tags> {
        let response = self
            .inner
            .list_tags_for_resource()
            .resource_name(arn)
            .send()
            .await
            .map_err(|e| classify(&e, "ListTagsForResource"))?;

        Ok(convert::tags(response.tag_list()))
    }

    async fn share_snapshot(&self, job: &ShareJob) -> Result<()> {
        self.inner
            .modify_db_snapshot_attribute()
            .db_snapshot_identifier(&job.identifier)
            .attribute_name(RESTORE_ATTRIBUTE)
            .values_to_add(&job.account_id)
            .send()
            .await
            .map_err(|e| classify(&e, "ModifyDBSnapshotAttribute"))?;

        Ok(())
    }
}

/// Map an SDK error onto the core error taxonomy by its error code
fn classify<E>(err: &E, operation: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = format!("{operation}: {}", DisplayErrorContext(err));
    match err.code() {
        Some(code) if is_auth_code(code) => Error::Auth(message),
        Some(code) if is_not_found_code(code) => Error::NotFound(message),
        _ => Error::Network(message),
    }
}

fn is_auth_code(code: &str) -> bool {
    matches!(
        code,
        "AccessDenied"
            | "AccessDeniedException"
            | "AuthorizationError"
            | "UnauthorizedOperation"
            | "InvalidClientTokenId"
            | "ExpiredToken"
            | "SignatureDoesNotMatch"
    )
}

fn is_not_found_code(code: &str) -> bool {
    code.ends_with("NotFound") || code.ends_with("NotFoundFault")
}
