//! Dump format parsing.
//!
//! A dump is newline-delimited JSON: each line is an object optionally
//! carrying `docs` (documents to insert, in order) and/or `seq` (a resume
//! marker). Lines may carry other fields; they are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, Result};

/// One line of a dump file.
#[derive(Debug, Deserialize)]
struct DumpLine {
    #[serde(default)]
    docs: Vec<Value>,
    #[serde(default)]
    seq: Option<u64>,
}

/// A fully parsed dump: documents in file order plus the resume marker.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dump {
    /// Concatenation of every `docs` array, in line order.
    pub docs: Vec<Value>,
    /// The last non-zero `seq` seen, in file order; 0 if none.
    pub last_seq: u64,
}

/// Parse dump text into documents and a resume marker.
///
/// Empty and whitespace-only lines are skipped. That is deliberately more
/// lenient than the strict empty-line rule of the dump format, which
/// would reject a line of bare whitespace as malformed JSON. `last_seq` is
/// last-write-wins, not maximum-seen: dump producers emit lines in seq
/// order and the final marker is the one replication resumes from, so a
/// smaller `seq` on a later line overwrites a larger earlier one. A `seq`
/// of 0 counts as absent.
///
/// # Errors
///
/// Returns `Parse` with the 1-based line number if any line is not valid
/// JSON. No partial result is produced.
pub fn parse(text: &str) -> Result<Dump> {
    let mut docs = Vec::new();
    let mut last_seq = 0;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: DumpLine =
            serde_json::from_str(trimmed).map_err(|e| LoadError::parse(idx + 1, &e))?;

        docs.extend(record.docs);
        match record.seq {
            Some(seq) if seq != 0 => last_seq = seq,
            _ => {}
        }
    }

    tracing::debug!(docs = docs.len(), last_seq, "parsed dump");
    Ok(Dump { docs, last_seq })
}
