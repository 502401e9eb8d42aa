//! `docdump` — load NDJSON document dumps into a document database.
//!
//! A dump is a newline-delimited JSON export: each line optionally carries
//! `docs` (documents to insert, in order) and/or `seq` (a resume marker).
//! Loading a dump bulk-inserts every document with its revision history
//! preserved and, when a `proxy` source is named, records a replication
//! checkpoint so a later live replication resumes where the dump left off
//! instead of re-transferring everything.
//!
//! The crate owns no storage: the caller supplies a handle implementing
//! [`Database`] and composes the loader explicitly. There is no global
//! registration and no load-time side effect.
//!
//! # Quick Start
//!
//! ```no_run
//! use docdump::{load, LoadOptions};
//! # async fn example<D: docdump::Database>(db: D) -> docdump::Result<()> {
//! // Inline dump text and URLs share one entry point.
//! load(&db, "http://example.com/dump.txt", &LoadOptions::default()).await?;
//!
//! // With a proxy, a replication checkpoint is bootstrapped too.
//! let opts = LoadOptions {
//!     proxy: Some("http://example.com/source_db".to_string()),
//!     ..Default::default()
//! };
//! load(&db, "{\"docs\":[{\"_id\":\"a\"}],\"seq\":3}", &opts).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`dump`] - dump text parsing
//! - [`load`](mod@crate::load) - the loader and entry dispatch
//! - [`db`] - the database collaborator contract
//! - [`fetch`] - HTTP fetch of remote dumps
//! - [`replication`] - replication-identifier derivation
//! - [`checkpoint`] - checkpoint persistence
//! - [`error`] - error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod checkpoint;
pub mod db;
pub mod dump;
pub mod error;
pub mod fetch;
pub mod load;
pub mod replication;

pub use checkpoint::{CheckpointDoc, Checkpointer};
pub use db::{Database, DatabaseInfo};
pub use dump::Dump;
pub use error::{LoadError, Result};
pub use fetch::FetchOptions;
pub use load::{LoadOptions, Source, load, load_str, load_url};
pub use replication::ReplicationIdOptions;
