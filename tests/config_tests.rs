use nestedstore::{ReconcileConfig, RejectRule, StoreError};
use serde_json::json;

fn options(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().expect("options must be an object").clone()
}

#[test]
fn defaults() {
    let config = ReconcileConfig::default();
    assert_eq!(config.primary_key, "id");
    assert!(!config.allow_destroy);
    assert!(!config.update_only);
    assert!(config.reject_if.is_none());
    assert!(config.limit.is_none());
}

#[test]
fn builder_covers_all_options() {
    let config = ReconcileConfig::builder()
        .allow_destroy(true)
        .update_only(true)
        .primary_key("isbn")
        .reject_if(RejectRule::AllBlank)
        .limit(5)
        .build();

    assert!(config.allow_destroy);
    assert!(config.update_only);
    assert_eq!(config.primary_key, "isbn");
    assert!(matches!(config.reject_if, Some(RejectRule::AllBlank)));
    assert_eq!(config.limit.unwrap().resolve(), 5);
}

#[test]
fn from_options_parses_recognized_keys() {
    let config = ReconcileConfig::from_options(&options(json!({
        "allow_destroy": true,
        "update_only": true,
        "primary_key": "email",
        "limit": 10,
        "reject_if": "all_blank"
    })))
    .unwrap();

    assert!(config.allow_destroy);
    assert!(config.update_only);
    assert_eq!(config.primary_key, "email");
    assert_eq!(config.limit.unwrap().resolve(), 10);
    assert!(matches!(config.reject_if, Some(RejectRule::AllBlank)));
}

#[test]
fn from_options_defaults_match_builder_defaults() {
    let config = ReconcileConfig::from_options(&options(json!({}))).unwrap();
    assert_eq!(config.primary_key, "id");
    assert!(!config.allow_destroy);
    assert!(config.limit.is_none());
}

#[test]
fn from_options_rejects_unknown_keys() {
    let err = ReconcileConfig::from_options(&options(json!({
        "allow_destroy": true,
        "on_delete": "cascade"
    })))
    .unwrap_err();

    match err {
        StoreError::UnknownOption(key) => {
            assert_eq!(key, "on_delete");
            assert_eq!(
                format!("{}", StoreError::UnknownOption(key)),
                "Unknown option `on_delete`"
            );
        }
        other => panic!("Expected UnknownOption, got {}", other),
    }
}

#[test]
fn from_options_rejects_bad_values() {
    // Negative limits are not a thing.
    let err =
        ReconcileConfig::from_options(&options(json!({"limit": -1}))).unwrap_err();
    assert!(matches!(err, StoreError::InvalidOption(_)));

    // Only the all_blank keyword is expressible in data form.
    let err = ReconcileConfig::from_options(&options(json!({
        "reject_if": "all_filled"
    })))
    .unwrap_err();
    assert!(matches!(err, StoreError::InvalidOption(_)));

    let err = ReconcileConfig::from_options(&options(json!({
        "allow_destroy": "maybe"
    })))
    .unwrap_err();
    assert!(matches!(err, StoreError::InvalidOption(_)));
}

#[test]
fn configs_are_cheaply_clonable() {
    let config = ReconcileConfig::builder()
        .reject_if(RejectRule::predicate(|record| record.is_empty()))
        .build();
    let clone = config.clone();

    let record = serde_json::Map::new();
    assert!(clone.reject_if.unwrap().rejects(&record));
}
