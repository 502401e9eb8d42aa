//! Shared test double: an in-memory document database.
//!
//! A `Registry` plays the role of the storage backend; every handle opened
//! from it shares state, so peer handles built by the loader land in the
//! same place. Each database call is recorded for order assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use docdump::{Database, DatabaseInfo};

/// One recorded database call, tagged with the handle's database name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    BulkDocs { count: usize, new_edits: bool },
    Info,
    Id,
    GetLocal(String),
    PutLocal(String),
    Open(String),
}

#[derive(Default)]
struct DbState {
    docs: Vec<Value>,
    local: HashMap<String, Value>,
}

#[derive(Default)]
struct RegistryInner {
    dbs: HashMap<String, DbState>,
    calls: Vec<(String, Call)>,
    fail_bulk_docs: bool,
    fail_info: bool,
    fail_put_local: bool,
}

/// Shared backend for a family of [`MemoryDb`] handles.
#[derive(Clone, Default)]
pub struct Registry(Arc<Mutex<RegistryInner>>);

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, name: &str) -> MemoryDb {
        MemoryDb {
            name: name.to_string(),
            registry: self.clone(),
        }
    }

    /// Every call made so far, in order, as (database name, call) pairs.
    pub fn calls(&self) -> Vec<(String, Call)> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn docs(&self, name: &str) -> Vec<Value> {
        let inner = self.0.lock().unwrap();
        inner.dbs.get(name).map(|s| s.docs.clone()).unwrap_or_default()
    }

    /// Local-namespace documents of a database, sorted by id.
    pub fn locals(&self, name: &str) -> Vec<(String, Value)> {
        let inner = self.0.lock().unwrap();
        let mut locals: Vec<_> = inner
            .dbs
            .get(name)
            .map(|s| s.local.clone().into_iter().collect())
            .unwrap_or_default();
        locals.sort_by(|a, b| a.0.cmp(&b.0));
        locals
    }

    pub fn fail_bulk_docs(&self) {
        self.0.lock().unwrap().fail_bulk_docs = true;
    }

    pub fn fail_info(&self) {
        self.0.lock().unwrap().fail_info = true;
    }

    pub fn fail_put_local(&self) {
        self.0.lock().unwrap().fail_put_local = true;
    }
}

/// A handle to one named database inside a [`Registry`].
#[derive(Clone)]
pub struct MemoryDb {
    name: String,
    registry: Registry,
}

impl MemoryDb {
    fn record(&self, call: Call) {
        let mut inner = self.registry.0.lock().unwrap();
        inner.calls.push((self.name.clone(), call));
    }
}

#[async_trait]
impl Database for MemoryDb {
    async fn bulk_docs(&self, docs: Vec<Value>, new_edits: bool) -> anyhow::Result<()> {
        self.record(Call::BulkDocs {
            count: docs.len(),
            new_edits,
        });
        let mut inner = self.registry.0.lock().unwrap();
        if inner.fail_bulk_docs {
            anyhow::bail!("bulk_docs rejected");
        }
        inner.dbs.entry(self.name.clone()).or_default().docs.extend(docs);
        Ok(())
    }

    async fn info(&self) -> anyhow::Result<DatabaseInfo> {
        self.record(Call::Info);
        let inner = self.registry.0.lock().unwrap();
        if inner.fail_info {
            anyhow::bail!("info unavailable");
        }
        let update_seq = inner.dbs.get(&self.name).map_or(0, |s| s.docs.len() as u64);
        Ok(DatabaseInfo {
            db_name: self.name.clone(),
            update_seq,
        })
    }

    async fn id(&self) -> anyhow::Result<String> {
        self.record(Call::Id);
        Ok(format!("memory://{}", self.name))
    }

    async fn get_local(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.record(Call::GetLocal(id.to_string()));
        let inner = self.registry.0.lock().unwrap();
        Ok(inner.dbs.get(&self.name).and_then(|s| s.local.get(id).cloned()))
    }

    async fn put_local(&self, id: &str, doc: Value) -> anyhow::Result<()> {
        self.record(Call::PutLocal(id.to_string()));
        let mut inner = self.registry.0.lock().unwrap();
        if inner.fail_put_local {
            anyhow::bail!("local write refused");
        }
        inner
            .dbs
            .entry(self.name.clone())
            .or_default()
            .local
            .insert(id.to_string(), doc);
        Ok(())
    }

    fn open(&self, name: &str) -> anyhow::Result<Self> {
        self.record(Call::Open(name.to_string()));
        Ok(self.registry.open(name))
    }
}
