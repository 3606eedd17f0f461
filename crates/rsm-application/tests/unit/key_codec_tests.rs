//! Key Codec Tests

use rsm_application::key_codec::{attribute_of, decode, encode, is_attribute_safe};
use rsm_domain::error::Error;
use rsm_domain::value_objects::{KeyProps, KeySchema, KeyedType};
use serde_json::{Value as JsonValue, json};

struct TodoItem;

impl KeyedType for TodoItem {
    const TYPE_NAME: &'static str = "TodoItem";
    const KEY_PROPS: &'static [&'static str] = &["listId", "itemId"];
}

fn props(value: JsonValue) -> KeyProps {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn test_empty_key_props_encode_to_bare_name() {
    let schema = KeySchema::new("EmptyType", Vec::<String>::new());

    let key = encode(&schema, &KeyProps::new()).unwrap();

    assert_eq!(key, "empty-type:");
    assert!(decode(&schema, &key).unwrap().is_empty());
}

#[test]
fn test_encode_kebab_cases_values() {
    let schema = KeySchema::of::<TodoItem>();

    let key = encode(&schema, &props(json!({"listId": "groceries", "itemId": "firstItem"}))).unwrap();

    assert_eq!(key, "todo-item:groceries:first-item");
}

#[test]
fn test_encode_stringifies_non_text_values() {
    let schema = KeySchema::of::<TodoItem>();

    let key = encode(&schema, &props(json!({"listId": 7, "itemId": true}))).unwrap();

    assert_eq!(key, "todo-item:7:true");
}

#[test]
fn test_encode_missing_value_is_empty_segment() {
    let schema = KeySchema::of::<TodoItem>();

    let key = encode(&schema, &props(json!({"listId": "a"}))).unwrap();

    assert_eq!(key, "todo-item:a:");
}

#[test]
fn test_encode_rejects_unsafe_values() {
    let schema = KeySchema::of::<TodoItem>();

    let err = encode(&schema, &props(json!({"listId": "a b", "itemId": "x"}))).unwrap_err();

    assert!(matches!(
        err,
        Error::Validation { ref property, ref value, .. } if property == "listId" && value == "a b"
    ));
}

#[test]
fn test_encode_rejects_separator_in_values() {
    let schema = KeySchema::of::<TodoItem>();

    let err = encode(&schema, &props(json!({"listId": "a:b", "itemId": "x"}))).unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_encode_undeclared_type_is_configuration_error() {
    let schema = KeySchema::undeclared("Anonymous");

    let err = encode(&schema, &KeyProps::new()).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("Anonymous"));
}

#[test]
fn test_decode_round_trip() {
    let schema = KeySchema::of::<TodoItem>();
    let original = props(json!({"listId": "groceries", "itemId": "milk"}));

    let decoded = decode(&schema, &encode(&schema, &original).unwrap()).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn test_decode_missing_trailing_values_are_null() {
    let schema = KeySchema::new("Grid", ["row", "column", "layer"]);

    let decoded = decode(&schema, "grid:r1").unwrap();

    assert_eq!(decoded["row"], "r1");
    assert_eq!(decoded["column"], JsonValue::Null);
    assert_eq!(decoded["layer"], JsonValue::Null);
}

#[test]
fn test_decode_empty_last_value_is_null_but_inner_is_empty_string() {
    let schema = KeySchema::new("Grid", ["row", "column", "layer"]);

    let decoded = decode(&schema, "grid::c1:").unwrap();

    assert_eq!(decoded["row"], "");
    assert_eq!(decoded["column"], "c1");
    assert_eq!(decoded["layer"], JsonValue::Null);
}

#[test]
fn test_decode_name_mismatch() {
    let schema = KeySchema::of::<TodoItem>();

    let err = decode(&schema, "todo-list:a:b").unwrap_err();

    assert!(matches!(
        err,
        Error::NameMismatch { ref expected, ref actual, .. }
            if expected == "todo-item" && actual == "todo-list"
    ));
}

#[test]
fn test_decode_too_many_parts() {
    let schema = KeySchema::of::<TodoItem>();

    let err = decode(&schema, "todo-item:a:b:c").unwrap_err();

    assert!(matches!(err, Error::TooManyParts { expected: 2, actual: 3, .. }));
}

#[test]
fn test_decode_values_for_keyless_type() {
    let schema = KeySchema::new("EmptyType", Vec::<String>::new());

    let err = decode(&schema, "empty-type:x").unwrap_err();

    assert!(matches!(err, Error::TooManyParts { expected: 0, actual: 1, .. }));
}

#[test]
fn test_decode_without_separator_is_malformed() {
    let schema = KeySchema::of::<TodoItem>();

    let err = decode(&schema, "todo-item").unwrap_err();

    assert!(matches!(err, Error::MalformedKey { .. }));
}

#[test]
fn test_attribute_of() {
    assert_eq!(attribute_of("todo-item:a:b").unwrap(), "::todo-item");
    assert_eq!(attribute_of("empty-type:").unwrap(), "::empty-type");
    assert!(matches!(
        attribute_of("no-separator"),
        Err(Error::MalformedKey { .. })
    ));
}

#[test]
fn test_attribute_safe_alphabet() {
    assert!(is_attribute_safe("a-z_0-9"));
    assert!(is_attribute_safe(""));
    assert!(!is_attribute_safe("Upper"));
    assert!(!is_attribute_safe("dot.ted"));
}
