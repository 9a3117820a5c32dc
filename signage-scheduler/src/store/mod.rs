/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Record-store collaborator.
//!
//! The store is a generic attribute store: every record is an untyped JSON
//! object living in a named [`Collection`].  It supports three operations:
//!
//! | Operation | Semantics |
//! |---|---|
//! | `query(collection, filter)` | matching records, in storage order |
//! | `put(collection, id, attrs)` | upsert; attributes are merged into an existing record |
//! | `delete(collection, filter)` | remove matching records, return the count |
//!
//! Raw records never reach the resolution core: [`decode`] validates them
//! into the typed [`crate::model`] structs first.

pub mod decode;
pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// An untyped attribute bag as kept by the store.
pub type Record = Map<String, Value>;

// ── Collections ───────────────────────────────────────────────────────────────

/// Named record collections.
///
/// The serde names match the keys used in YAML fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Screens,
    Groups,
    Schedules,
    Playlists,
    PlaylistItems,
    Media,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Screens => "screens",
            Collection::Groups => "groups",
            Collection::Schedules => "schedules",
            Collection::Playlists => "playlists",
            Collection::PlaylistItems => "playlistItems",
            Collection::Media => "media",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Record predicate used by `query` and `delete`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every record.
    All,
    /// `record[field] == value`.  A missing field compares as `null`.
    Eq(String, Value),
    /// `record[field]` is present and not `null`.
    IsSet(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Shorthand for `Eq("id", id)`.
    pub fn id(id: impl Into<String>) -> Self {
        Filter::eq("id", id.into())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => record.get(field).unwrap_or(&Value::Null) == value,
            Filter::IsSet(field) => record.get(field).is_some_and(|v| !v.is_null()),
            Filter::And(filters) => filters.iter().all(|f| f.matches(record)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(record)),
        }
    }
}

// ── RecordStore ───────────────────────────────────────────────────────────────

/// Async record store.
///
/// Implementations must be `Send + Sync`: one instance is shared through an
/// `Arc` by every concurrently polling screen.  Each call observes one
/// consistent snapshot; nothing is promised across calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records of `collection` matching `filter`, in storage order.
    async fn query(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Record>, StoreError>;

    /// Insert or merge `attrs` into the record `id`.  The stored record
    /// always carries `"id": id`.
    async fn put(&self, collection: Collection, id: &str, attrs: Record)
        -> Result<(), StoreError>;

    /// Remove every record of `collection` matching `filter`.
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<usize, StoreError>;

    /// First record matching `Filter::id(id)`, if any.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>, StoreError> {
        let mut records = self.query(collection, &Filter::id(id)).await?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
