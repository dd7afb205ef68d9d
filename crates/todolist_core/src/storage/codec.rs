//! JSON codec for the persisted collection.
//!
//! # Responsibility
//! - Serialize items into a versioned JSON envelope.
//! - Decode both the envelope and the legacy bare-array layout.
//!
//! # Invariants
//! - Missing optional item fields decode to their defaults, never to errors.
//! - Decoding never yields two items with the same id.

use super::{StorageError, StorageResult};
use crate::model::todo::TodoItem;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version written by [`encode`].
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    items: &'a [TodoItem],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default = "legacy_schema_version")]
    schema_version: u32,
    items: serde_json::Value,
}

fn legacy_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Encodes the full collection into one JSON document.
pub fn encode(items: &[TodoItem]) -> StorageResult<Vec<u8>> {
    let envelope = EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        items,
    };
    serde_json::to_vec_pretty(&envelope).map_err(StorageError::Encode)
}

/// Decodes a collection previously produced by [`encode`] or a bare item array.
///
/// # Errors
/// - `Decode` when the bytes are not a structurally valid collection.
/// - `UnsupportedSchemaVersion` when the document is newer than this build.
pub fn decode(bytes: &[u8]) -> StorageResult<Vec<TodoItem>> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(StorageError::Decode)?;

    let raw_items = if value.is_array() {
        value
    } else {
        // Why: check the version before the items so a newer layout reports
        // `UnsupportedSchemaVersion` instead of a field-level decode error.
        let envelope: Envelope = serde_json::from_value(value).map_err(StorageError::Decode)?;
        if envelope.schema_version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                found: envelope.schema_version,
                latest_supported: SCHEMA_VERSION,
            });
        }
        envelope.items
    };

    let items: Vec<TodoItem> =
        serde_json::from_value(raw_items).map_err(StorageError::Decode)?;
    Ok(dedupe_by_id(items))
}

fn dedupe_by_id(items: Vec<TodoItem>) -> Vec<TodoItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.id) {
            unique.push(item);
        } else {
            warn!(
                "event=codec_decode module=storage status=duplicate_dropped id={}",
                item.id
            );
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, SCHEMA_VERSION};
    use crate::storage::StorageError;

    #[test]
    fn encode_writes_schema_version() {
        let bytes = encode(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(value["items"], serde_json::json!([]));
    }

    #[test]
    fn decode_rejects_non_collection_document() {
        let err = decode(br#"{"title": "not a list"}"#).unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));
    }
}
