//! Error types for snaptool-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

use crate::workflow::Workflow;

/// Result type alias for snaptool-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for snaptool-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A page of the snapshot listing could not be fetched
    #[error("Listing failed in {region}: {message}")]
    Listing { region: String, message: String },

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Snapshot or resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote call failed (retryable on the next invocation)
    #[error("Network error: {0}")]
    Network(String),

    /// One or more per-snapshot actions did not complete during a pass
    #[error("{message}")]
    PendingFailures {
        workflow: Workflow,
        count: usize,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidPattern { .. } => 2, // UsageError
            Error::Listing { .. } | Error::Network(_) => 3,       // NetworkError
            Error::Auth(_) => 4,                                  // AuthError
            Error::PendingFailures { .. } => 5,                   // RetryPending
            _ => 1,                                               // GeneralError
        }
    }
}
