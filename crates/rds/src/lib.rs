//! snaptool-rds: RDS SDK adapter for snaptool
//!
//! This crate provides the implementation of the SnapshotService trait
//! using the aws-sdk-rds crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
mod convert;

pub use client::RdsClient;
