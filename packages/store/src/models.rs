//! # Stored record model
//!
//! A [`Record`] is the unit of storage in every table: an immutable,
//! uniquely identified wrapper around an arbitrary JSON payload. Records
//! serialize with camelCase field names (`objectId`, `objectData`,
//! `createdAt`), which is also the on-device slot format, so a table can be
//! round-tripped through its slot without a separate wire type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single immutable record in a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique, time-based identifier assigned at creation.
    pub object_id: String,
    /// Arbitrary JSON payload supplied by the caller. `Null` when the
    /// record came from a metadata-only listing.
    pub object_data: Value,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Copy of this record with the payload stripped.
    pub(crate) fn without_data(&self) -> Record {
        Record {
            object_id: self.object_id.clone(),
            object_data: Value::Null,
            created_at: self.created_at,
        }
    }
}
