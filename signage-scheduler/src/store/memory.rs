/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-process [`RecordStore`] backed by a `tokio` read/write lock.
//!
//! Records keep their insertion order, so `query` returns them exactly as a
//! storage-ordered backend would.  A store can be seeded from a YAML fixture:
//!
//! ```yaml
//! screens:
//!   - id: S2
//!     groupId: G1
//!     defaultPlaylistId: P-default
//! schedules:
//!   - id: R3
//!     groupId: G1
//!     playlistId: P-overlap
//!     days: "[1]"
//!     startTime: "10:00"
//!     endTime: "14:00"
//!     priority: 5
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{Collection, Filter, Record, RecordStore, StoreError};

/// Top-level layout of a YAML fixture file.
type FixtureFile = HashMap<Collection, Vec<Record>>;

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records`, keyed by collection.
    ///
    /// # Errors
    /// Returns an error if any record has no string `id`.
    pub fn with_records(records: HashMap<Collection, Vec<Record>>) -> Result<Self> {
        for (collection, list) in &records {
            for (idx, record) in list.iter().enumerate() {
                if record.get("id").and_then(Value::as_str).is_none() {
                    bail!("record #{idx} in '{collection}' has no string 'id'");
                }
            }
        }
        Ok(Self {
            collections: RwLock::new(records),
        })
    }

    /// Parses the YAML fixture at `path` into a new store.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// contains a record without an `id`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading store fixture from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open fixture file: {}", path.display()))?;

        if content.trim().is_empty() {
            info!("Store fixture is empty");
            return Ok(Self::new());
        }

        let file: FixtureFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        for (collection, records) in &file {
            debug!("  {}: {} record(s)", collection, records.len());
        }

        let store = Self::with_records(file)
            .with_context(|| format!("Invalid fixture: {}", path.display()))?;
        info!("Store fixture loaded");
        Ok(store)
    }

    /// Number of records currently held in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Record>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(&self, collection: Collection, id: &str, attrs: Record) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidRecord {
                collection,
                reason: "empty id".into(),
            });
        }

        let mut guard = self.collections.write().await;
        let records = guard.entry(collection).or_default();
        let existing = records
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id));

        match existing {
            Some(record) => {
                for (key, value) in attrs {
                    if key != "id" {
                        record.insert(key, value);
                    }
                }
            }
            None => {
                let mut record = attrs;
                record.insert("id".into(), Value::String(id.to_string()));
                records.push(record);
            }
        }
        debug!(%collection, id, "record stored");
        Ok(())
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<usize, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(records) = guard.get_mut(&collection) else {
            return Ok(0);
        };
        let before = records.len();
        records.retain(|r| !filter.matches(r));
        let removed = before - records.len();
        debug!(%collection, removed, "records deleted");
        Ok(removed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
