//! Error types for `docdump`.
//!
//! One variant per failure class. Every failure is terminal for the call:
//! there are no retries and no rollback of documents already inserted.

use thiserror::Error;

/// Primary error type for dump-loading operations.
#[derive(Error, Debug)]
pub enum LoadError {
    // === Parse Errors ===
    /// A line of the dump failed to parse as JSON. Nothing was inserted.
    #[error("dump parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    // === Fetch Errors ===
    /// The HTTP fetch of a dump URL failed (network error or non-2xx status).
    #[error("fetch failed for {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // === Database Errors ===
    /// The bulk insertion was rejected by the target database.
    #[error("bulk insert failed")]
    BulkInsert(#[source] anyhow::Error),

    /// The checkpoint bootstrap failed after a successful bulk insert.
    ///
    /// The documents are in the target database but no checkpoint was
    /// recorded; a later replication will re-transfer them. There is no
    /// compensating action.
    #[error("checkpoint bootstrap failed")]
    Checkpoint(#[source] anyhow::Error),
}

impl LoadError {
    /// Build a parse error from a line number and a `serde_json` failure.
    #[must_use]
    pub fn parse(line: usize, err: &serde_json::Error) -> Self {
        Self::Parse {
            line,
            reason: err.to_string(),
        }
    }
}

/// Result type using `LoadError`.
pub type Result<T> = std::result::Result<T, LoadError>;
