use crate::core::config::ReconcileConfig;
use crate::core::record::{
    AttributeMap, except_unassignable, has_destroy_flag, is_present, key_string,
};

/// Applies one normalized batch against the existing collection and
/// returns the assembled replacement.
///
/// Each incoming record is matched against a pool seeded with the
/// existing records. A match is consumed from the pool even when the
/// record is subsequently rejected; whatever is left in the pool after
/// the batch (records the batch never referenced) is appended unchanged,
/// in its original relative order.
pub fn merge_batch(
    existing: Vec<AttributeMap>,
    batch: Vec<AttributeMap>,
    config: &ReconcileConfig,
) -> Vec<AttributeMap> {
    let mut pool = existing;
    let mut assembled = Vec::with_capacity(batch.len() + pool.len());

    for attributes in &batch {
        match take_match(&mut pool, attributes, &config.primary_key) {
            Some(matched) => {
                if call_reject_rule(config, attributes) {
                    continue;
                }
                if let Some(record) =
                    merge_or_destroy(matched, attributes, config.allow_destroy)
                {
                    assembled.push(record);
                }
            }
            // No primary key, or a key that matches nothing: an insert
            // attempt, never an error.
            None => {
                if !reject_new_record(config, attributes) {
                    assembled.push(except_unassignable(attributes));
                }
            }
        }
    }

    assembled.extend(pool);
    assembled
}

/// Removes and returns the pool record whose stringified primary key
/// equals the incoming one. Absent or blank incoming keys never match.
fn take_match(
    pool: &mut Vec<AttributeMap>,
    attributes: &AttributeMap,
    primary_key: &str,
) -> Option<AttributeMap> {
    let wanted = attributes
        .get(primary_key)
        .filter(|value| is_present(value))
        .map(key_string)?;

    let index = pool.iter().position(|record| {
        record.get(primary_key).map(key_string).as_deref() == Some(wanted.as_str())
    })?;

    Some(pool.remove(index))
}

/// Merges the incoming attributes (minus the unassignable keys) onto the
/// matched record, or drops it when the incoming record carries a truthy
/// destroy flag and destruction is allowed.
fn merge_or_destroy(
    matched: AttributeMap,
    attributes: &AttributeMap,
    allow_destroy: bool,
) -> Option<AttributeMap> {
    let mut merged = matched;
    for (key, value) in except_unassignable(attributes) {
        merged.insert(key, value);
    }

    if has_destroy_flag(attributes) && allow_destroy {
        None
    } else {
        Some(merged)
    }
}

/// A new record is rejected when it is marked for destruction or when the
/// reject rule fires.
fn reject_new_record(config: &ReconcileConfig, attributes: &AttributeMap) -> bool {
    has_destroy_flag(attributes) || call_reject_rule(config, attributes)
}

/// Destroy takes precedence: the reject rule is never consulted for a
/// record carrying a truthy destroy flag.
fn call_reject_rule(config: &ReconcileConfig, attributes: &AttributeMap) -> bool {
    if has_destroy_flag(attributes) {
        return false;
    }
    config
        .reject_if
        .as_ref()
        .map(|rule| rule.rejects(attributes))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RejectRule;
    use crate::core::record::is_blank;
    use serde_json::{Value, json};

    fn records(value: Value) -> Vec<AttributeMap> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => map,
                    other => panic!("Expected object, got {}", other),
                })
                .collect(),
            other => panic!("Expected array, got {}", other),
        }
    }

    #[test]
    fn test_match_is_consumed_even_when_rejected() {
        let config = ReconcileConfig::builder()
            .reject_if(RejectRule::predicate(|record| {
                record.get("name").map(is_blank).unwrap_or(true)
            }))
            .build();

        let out = merge_batch(
            records(json!([{"id": 1, "name": "a"}])),
            records(json!([{"id": 1, "name": ""}])),
            &config,
        );

        // The matched record was taken out of the pool and the incoming
        // one rejected, so nothing survives.
        assert!(out.is_empty());
    }

    #[test]
    fn test_destroy_skips_reject_rule() {
        let config = ReconcileConfig::builder()
            .allow_destroy(true)
            .reject_if(RejectRule::predicate(|_| true))
            .build();

        let out = merge_batch(
            records(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}])),
            records(json!([{"id": 1, "_destroy": "1"}])),
            &config,
        );

        assert_eq!(out, records(json!([{"id": 2, "name": "b"}])));
    }

    #[test]
    fn test_untouched_records_keep_relative_order() {
        let config = ReconcileConfig::default();

        let out = merge_batch(
            records(json!([
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"},
                {"id": 3, "name": "c"}
            ])),
            records(json!([{"id": 2, "name": "B"}])),
            &config,
        );

        // Updated entries sort before untouched retained entries.
        assert_eq!(
            out,
            records(json!([
                {"id": 2, "name": "B"},
                {"id": 1, "name": "a"},
                {"id": 3, "name": "c"}
            ]))
        );
    }
}
