//! snaptool-core: snapshot selection and retention engine
//!
//! This crate provides the decision logic shared by the copy, delete and
//! share workflows:
//! - Paginated listing of snapshots
//! - Pattern-based filtering into source-owned and dest-owned sets
//! - Creation time extraction from identifier suffixes
//! - Retention evaluation with an open boundary on both sides
//! - Action dispatch and failure aggregation
//!
//! This crate is designed to be independent of any specific cloud SDK.
//! The control plane is reached only through [`SnapshotService`].

pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod lister;
pub mod pattern;
pub mod report;
pub mod retention;
pub mod snapshot;
pub mod timestamp;
pub mod traits;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use config::{
    CopyConfig, DeleteConfig, KeyOverride, Settings, SettingsManager, ShareConfig, Source,
};
pub use error::{Error, Result};
pub use pattern::Pattern;
pub use report::{ItemReport, Outcome, PassReport};
pub use retention::RetentionPolicy;
pub use snapshot::{SnapshotPage, SnapshotRecord, SnapshotStatus, SnapshotType, Tags};
pub use traits::{CopyJob, DeleteJob, ShareJob, SnapshotService};
pub use workflow::{RunOptions, Workflow, run_copy, run_delete, run_share};
