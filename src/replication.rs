//! Replication identifier derivation.
//!
//! Checkpoints are namespaced per replication pairing: the same (source,
//! target, filter, query params) tuple must always map to the same
//! identifier, or a resumed replication will not find its checkpoint.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::db::Database;
use crate::error::{LoadError, Result};

/// Prefix placing replication checkpoints in the local document namespace.
const LOCAL_PREFIX: &str = "_local/";

/// Hex digits of the digest kept in the identifier.
const ID_HASH_LENGTH: usize = 32;

/// Options that participate in replication-id derivation.
///
/// Only fields that were actually supplied contribute to the seed, so a
/// replication configured without a filter keeps the identifier it had
/// before filters existed.
#[derive(Debug, Clone, Default)]
pub struct ReplicationIdOptions {
    pub filter: Option<String>,
    pub query_params: Option<Value>,
}

/// Derive the deterministic replication identifier for a (source, target,
/// options) tuple.
///
/// # Errors
///
/// Returns `Checkpoint` if either database's identity query fails.
pub async fn replication_id<D: Database>(
    source: &D,
    target: &D,
    opts: &ReplicationIdOptions,
) -> Result<String> {
    let source_id = source.id().await.map_err(LoadError::Checkpoint)?;
    let target_id = target.id().await.map_err(LoadError::Checkpoint)?;
    Ok(derive(&source_id, &target_id, opts))
}

/// Seed string: `source | target | filter | query_params`.
fn seed(source_id: &str, target_id: &str, opts: &ReplicationIdOptions) -> String {
    let mut seed = format!("{source_id}|{target_id}");
    if let Some(filter) = &opts.filter {
        seed.push('|');
        seed.push_str(filter);
    }
    if let Some(params) = &opts.query_params {
        seed.push('|');
        seed.push_str(&params.to_string());
    }
    seed
}

fn derive(source_id: &str, target_id: &str, opts: &ReplicationIdOptions) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed(source_id, target_id, opts).as_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(ID_HASH_LENGTH);
    for byte in digest.iter().take(ID_HASH_LENGTH / 2) {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("{LOCAL_PREFIX}{hex}")
}
