use serde_json::Value;

use crate::core::error::{Result, StoreError};
use crate::core::record::AttributeMap;

/// Turns a raw batch into an ordered sequence of attribute maps.
///
/// A JSON array passes through unchanged. A JSON object is ambiguous: if
/// any of its top-level keys is the configured primary key it is a single
/// record and is wrapped in a one-element batch, otherwise it is an
/// index-keyed batch and its values are taken in iteration order (the
/// index keys are discarded). This lets one call site accept a single
/// record without wrapping it explicitly.
pub fn normalize_batch(raw: &Value, primary_key: &str) -> Result<Vec<AttributeMap>> {
    match raw {
        Value::Array(items) => items.iter().map(as_record).collect(),
        Value::Object(map) => {
            if map.contains_key(primary_key) {
                Ok(vec![map.clone()])
            } else {
                map.values().map(as_record).collect()
            }
        }
        other => Err(StoreError::InvalidBatch(kind_name(other).to_string())),
    }
}

fn as_record(value: &Value) -> Result<AttributeMap> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| StoreError::InvalidBatch(kind_name(value).to_string()))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
