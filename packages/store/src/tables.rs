//! # Object store — namespaced record tables on an abstract storage backend
//!
//! This module is the core of the storage layer. [`ObjectStore`] provides
//! append-only record tables without assuming anything about the device it
//! runs on. All reads and writes go through the [`Storage`] trait, so the
//! same logic works against an in-memory store (tests, ephemeral sessions),
//! a filesystem store (desktop), or the browser's `localStorage` (web).
//!
//! ## [`Storage`] trait
//!
//! An async interface with three methods — `read`/`write` for whole-slot
//! contents and `remove` for clearing a slot. Implementations live in
//! sibling modules ([`crate::memory`], [`crate::file_store`]).
//!
//! ## Tables
//!
//! A table is a named ordered sequence of [`Record`]s kept in a single slot
//! (`trickle_<table>`) as a JSON array. Tables come into existence on first
//! write; a table that was never written reads as empty. Records are
//! append-only: there is no update or delete.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list_objects`](ObjectStore::list_objects) | Up to `limit` records in insertion order, optionally metadata-only. |
//! | [`create_object`](ObjectStore::create_object) | Wraps a payload as a new [`Record`] and appends it. |
//!
//! Appends are read-modify-write over the whole slot. A per-store async
//! mutex serializes them, so two tasks appending to the same table cannot
//! drop each other's records. Writers in other processes sharing the same
//! device storage still race last-write-wins.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::Record;

/// Slot prefix under which table contents are stored.
const TABLE_SLOT_PREFIX: &str = "trickle_";

/// Async trait for reading and writing named storage slots on the device.
pub trait Storage {
    /// Full contents of `slot`, or `None` when the slot was never written.
    fn read(
        &self,
        slot: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    /// Replace the full contents of `slot`.
    fn write(
        &self,
        slot: &str,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    /// Clear `slot`. Removing an absent slot is a no-op.
    fn remove(
        &self,
        slot: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Namespaced append-only record tables backed by a [`Storage`].
pub struct ObjectStore<S: Storage> {
    storage: S,
    // Serializes table appends within this process.
    write_lock: Mutex<()>,
}

impl<S: Storage> ObjectStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// The backend this store writes through. Non-table slots (session,
    /// preferences) live beside the tables in the same backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn table_slot(table: &str) -> String {
        format!("{TABLE_SLOT_PREFIX}{table}")
    }

    /// Read and parse a table's stored records. Contents that do not parse
    /// as a record array read as an empty table.
    async fn read_table(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let slot = Self::table_slot(table);
        let Some(raw) = self.storage.read(&slot).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(table, %err, "stored table is malformed, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    /// List up to `limit` records from `table`, in the order they were
    /// created. A missing table reads as empty, never as an error. When
    /// `include_data` is false the records come back metadata-only.
    pub async fn list_objects(
        &self,
        table: &str,
        limit: usize,
        include_data: bool,
    ) -> Result<Vec<Record>, StoreError> {
        let mut items = self.read_table(table).await?;
        items.truncate(limit);
        if !include_data {
            items = items.iter().map(Record::without_data).collect();
        }
        Ok(items)
    }

    /// Wrap `data` as a new [`Record`], append it to `table`, and return it.
    ///
    /// Fails only when the backend rejects the write; the table then keeps
    /// its previous contents.
    pub async fn create_object(&self, table: &str, data: Value) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;

        let slot = Self::table_slot(table);
        let mut items = self.read_table(table).await?;
        let created_at = Utc::now();
        let record = Record {
            object_id: next_object_id(&items, created_at),
            object_data: data,
            created_at,
        };
        items.push(record.clone());

        let contents = serde_json::to_string(&items)
            .map_err(|err| StoreError::unavailable(&slot, err))?;
        self.storage.write(&slot, &contents).await?;
        Ok(record)
    }
}

/// Next object id for a table: the creation timestamp in milliseconds,
/// bumped past the last record's id when the clock has not advanced since
/// the previous append.
fn next_object_id(items: &[Record], created_at: DateTime<Utc>) -> String {
    let mut id = created_at.timestamp_millis().max(0) as u64;
    if let Some(last) = items.last().and_then(|r| r.object_id.parse::<u64>().ok()) {
        if id <= last {
            id = last + 1;
        }
    }
    id.to_string()
}
