//! Target database contract.
//!
//! The loader never touches storage itself; everything it needs from the
//! database is behind this trait. Implementations own their write
//! serialization and conflict semantics. Methods return `anyhow::Result`
//! so implementations can surface their own error types; the loader wraps
//! failures into [`crate::LoadError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a database, as returned by [`Database::info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Name the database answers to; used to build the target peer handle.
    pub db_name: String,
    /// Current update sequence of the database.
    #[serde(default)]
    pub update_seq: u64,
}

/// A handle to a document database the loader can insert into.
///
/// `open` must build a peer handle sharing this handle's construction
/// options, so that a proxy handle and a target handle are constructed the
/// same way the caller constructed the original.
///
/// # Errors
///
/// All methods report failures through `anyhow::Result`; the loader maps
/// them into its own error taxonomy.
#[async_trait]
pub trait Database: Sized + Send + Sync {
    /// Insert a batch of documents in one operation.
    ///
    /// With `new_edits` false the documents' own revision markers are
    /// stored verbatim instead of generating new revisions. The loader
    /// always passes false: a dump is a restore, not a set of edits.
    async fn bulk_docs(&self, docs: Vec<Value>, new_edits: bool) -> anyhow::Result<()>;

    /// Query the database's identity.
    async fn info(&self) -> anyhow::Result<DatabaseInfo>;

    /// Stable identity string for replication-id derivation.
    ///
    /// Two handles to the same database must return the same string across
    /// calls, or checkpoints will not be found again.
    async fn id(&self) -> anyhow::Result<String>;

    /// Read a document from the local (non-replicated) namespace.
    async fn get_local(&self, id: &str) -> anyhow::Result<Option<Value>>;

    /// Upsert a document in the local (non-replicated) namespace.
    async fn put_local(&self, id: &str, doc: Value) -> anyhow::Result<()>;

    /// Construct a peer handle to the named database, sharing this
    /// handle's construction options.
    fn open(&self, name: &str) -> anyhow::Result<Self>;
}
