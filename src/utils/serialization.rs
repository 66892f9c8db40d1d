// Canonical JSON encoding - the single serialization every hash input goes
// through. Object keys serialize in lexicographic order (serde_json's map is
// a BTreeMap) with compact separators, so two semantically equal values
// always produce identical bytes.
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Canonical JSON string for any serializable value.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(value.to_string())
}

/// Canonical JSON for a structure with one top-level key removed.
///
/// Used where a hash commits to a structure minus its own derived field
/// (a block minus its `hash`, a product record minus its `product_id`).
pub fn canonical_json_without_key<T: Serialize>(value: &T, key: &str) -> Result<String> {
    let mut value = serde_json::to_value(value)?;
    if let Value::Object(ref mut map) = value {
        map.remove(key);
    }
    Ok(value.to_string())
}
