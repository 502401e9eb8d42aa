//! The loader: parse or fetch a dump, bulk-insert it, and optionally
//! bootstrap a replication checkpoint.
//!
//! One logical operation per call. Steps are strictly sequenced and every
//! failure is terminal: documents already inserted stay inserted, and a
//! checkpoint failure after a successful insert is reported as the
//! operation's failure without any compensating action.

use serde_json::Value;

use crate::checkpoint::Checkpointer;
use crate::db::Database;
use crate::dump;
use crate::error::{LoadError, Result};
use crate::fetch::{self, FetchOptions};
use crate::replication::{self, ReplicationIdOptions};

/// Options for a load operation.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Identifier of the database the dump logically originated from.
    /// When set, a replication checkpoint between it and the target is
    /// written after the bulk insert.
    pub proxy: Option<String>,
    /// Replication filter name; contributes to replication-id derivation
    /// only.
    pub filter: Option<String>,
    /// Replication filter parameters; contribute to replication-id
    /// derivation only.
    pub query_params: Option<Value>,
    /// Options for the HTTP fetch when the input is a URL.
    pub fetch: FetchOptions,
}

impl LoadOptions {
    fn replication_id_options(&self) -> ReplicationIdOptions {
        ReplicationIdOptions {
            filter: self.filter.clone(),
            query_params: self.query_params.clone(),
        }
    }
}

/// Where dump text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// The input is the dump text itself.
    Inline(&'a str),
    /// The input is a URL to fetch the dump text from.
    Url(&'a str),
}

impl<'a> Source<'a> {
    /// Classify an input string.
    ///
    /// One rule: input whose first non-whitespace character is `{` is
    /// inline dump text, anything else is a URL. Call [`load_str`] or
    /// [`load_url`] directly to bypass detection.
    #[must_use]
    pub fn detect(input: &'a str) -> Self {
        if input.trim_start().starts_with('{') {
            Self::Inline(input)
        } else {
            Self::Url(input)
        }
    }
}

/// Load a dump into `db`, detecting whether `input` is dump text or a URL.
///
/// # Errors
///
/// See [`load_str`] and [`load_url`].
pub async fn load<D: Database>(db: &D, input: &str, opts: &LoadOptions) -> Result<()> {
    match Source::detect(input) {
        Source::Inline(text) => load_str(db, text, opts).await,
        Source::Url(url) => load_url(db, url, opts).await,
    }
}

/// Fetch a dump from `url` and load it into `db`.
///
/// The body is fetched as raw text and handed to [`load_str`]; a fetch
/// failure short-circuits without touching the database.
///
/// # Errors
///
/// Returns `Fetch` on any HTTP failure, otherwise as [`load_str`].
pub async fn load_url<D: Database>(db: &D, url: &str, opts: &LoadOptions) -> Result<()> {
    let text = fetch::fetch_text(url, &opts.fetch).await?;
    load_str(db, &text, opts).await
}

/// Load dump text into `db`.
///
/// All parsed documents go in as one bulk insertion with their revision
/// markers preserved verbatim. With `opts.proxy` set, the dump's resume
/// marker is then recorded as a checkpoint between the proxy and the
/// target, so a later live replication skips what the dump delivered.
///
/// # Errors
///
/// Returns `Parse` if the dump is malformed (nothing is inserted),
/// `BulkInsert` if the insertion fails, or `Checkpoint` if any step of the
/// checkpoint sequence fails after a successful insert.
pub async fn load_str<D: Database>(db: &D, text: &str, opts: &LoadOptions) -> Result<()> {
    let dump = dump::parse(text)?;
    let last_seq = dump.last_seq;

    tracing::info!(docs = dump.docs.len(), last_seq, "loading dump");
    db.bulk_docs(dump.docs, false)
        .await
        .map_err(LoadError::BulkInsert)?;

    let Some(proxy) = &opts.proxy else {
        return Ok(());
    };

    let info = db.info().await.map_err(LoadError::Checkpoint)?;
    let source = db.open(proxy).map_err(LoadError::Checkpoint)?;
    let target = db.open(&info.db_name).map_err(LoadError::Checkpoint)?;

    let repl_id =
        replication::replication_id(&source, &target, &opts.replication_id_options()).await?;
    Checkpointer::new(source, target, repl_id)
        .write_checkpoint(last_seq)
        .await
}
