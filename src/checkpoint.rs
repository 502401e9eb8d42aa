//! Replication checkpoint persistence.
//!
//! A checkpoint is a local document associating a replication identifier
//! with the sequence a replication may resume from. Local documents do not
//! replicate, so each peer records its own copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{LoadError, Result};

/// The persisted checkpoint document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointDoc {
    /// Sequence the replication may resume from.
    pub last_seq: u64,
    /// When this checkpoint was written.
    pub written_at: DateTime<Utc>,
}

/// Writes checkpoints for one (source, target, replication-id) pairing.
pub struct Checkpointer<D: Database> {
    source: D,
    target: D,
    replication_id: String,
}

impl<D: Database> Checkpointer<D> {
    /// Bind a checkpointer to a replication pairing.
    #[must_use]
    pub fn new(source: D, target: D, replication_id: String) -> Self {
        Self {
            source,
            target,
            replication_id,
        }
    }

    /// The identifier checkpoints are stored under.
    #[must_use]
    pub fn replication_id(&self) -> &str {
        &self.replication_id
    }

    /// Persist `seq` as the resume point on both peers, target first.
    ///
    /// # Errors
    ///
    /// Returns `Checkpoint` if either write fails. A failure after the
    /// target write leaves the peers disagreeing; replication resolves
    /// that by resuming from the lower of the two.
    pub async fn write_checkpoint(&self, seq: u64) -> Result<()> {
        let doc = serde_json::to_value(CheckpointDoc {
            last_seq: seq,
            written_at: Utc::now(),
        })
        .map_err(|e| LoadError::Checkpoint(e.into()))?;

        self.target
            .put_local(&self.replication_id, doc.clone())
            .await
            .map_err(LoadError::Checkpoint)?;
        self.source
            .put_local(&self.replication_id, doc)
            .await
            .map_err(LoadError::Checkpoint)?;

        tracing::debug!(
            replication_id = %self.replication_id,
            seq,
            "wrote checkpoint"
        );
        Ok(())
    }

    /// Read the target's checkpoint for this pairing, if any.
    ///
    /// # Errors
    ///
    /// Returns `Checkpoint` if the read fails or the document is not a
    /// checkpoint.
    pub async fn read_checkpoint(&self) -> Result<Option<CheckpointDoc>> {
        let doc = self
            .target
            .get_local(&self.replication_id)
            .await
            .map_err(LoadError::Checkpoint)?;
        doc.map(|value| {
            serde_json::from_value(value).map_err(|e| LoadError::Checkpoint(e.into()))
        })
        .transpose()
    }
}
