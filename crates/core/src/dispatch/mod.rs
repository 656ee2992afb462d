//! Action dispatchers
//!
//! Each dispatcher consumes the filtered candidate set, issues one remote
//! mutation per eligible snapshot, and records every outcome in a
//! [`PassReport`](crate::report::PassReport). Failures are counted and the
//! pass moves on; nothing is retried within an invocation.

pub mod copy;
pub mod delete;
pub mod share;

pub use copy::copy_pass;
pub use delete::delete_pass;
pub use share::share_pass;
