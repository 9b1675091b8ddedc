use serde_json::{Map, Value};

/// One record of a stored collection: an ordered, string-keyed attribute map.
pub type AttributeMap = Map<String, Value>;

/// Attribute keys that are reconciliation metadata and must never be
/// assigned as normal record data.
pub const UNASSIGNABLE_KEYS: [&str; 2] = ["id", "_destroy"];

/// The field marking a record for removal.
pub const DESTROY_KEY: &str = "_destroy";

/// Blankness in the loose sense used for primary-key presence and the
/// all-blank reject rule: null, false, empty/whitespace strings and empty
/// containers are blank. Numbers never are.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

pub fn is_present(value: &Value) -> bool {
    !is_blank(value)
}

/// Boolean coercion for flag-like values: `true`, `1`, `"1"` and `"true"`
/// are truthy, everything else is falsy.
pub fn value_to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Stringified form of a primary-key value, so `1` and `"1"` compare equal.
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whether the record carries a truthy `_destroy` flag.
pub fn has_destroy_flag(record: &AttributeMap) -> bool {
    record.get(DESTROY_KEY).map(value_to_boolean).unwrap_or(false)
}

/// A copy of the record without the unassignable metadata keys.
pub fn except_unassignable(record: &AttributeMap) -> AttributeMap {
    record
        .iter()
        .filter(|(key, _)| !UNASSIGNABLE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// True when every field is either the destroy flag or blank.
pub fn all_blank_except_destroy(record: &AttributeMap) -> bool {
    record
        .iter()
        .all(|(key, value)| key == DESTROY_KEY || is_blank(value))
}
