//! Key codec
//!
//! Bidirectional mapping between a property bag and a flat key of the form
//! `kebab-type-name:value1:...:valueN`. Keys double as DOM attribute values,
//! so every value must stay within `[a-z0-9_-]` after kebab-casing.
//!
//! ## Example
//!
//! ```
//! use rsm_application::key_codec::{decode, encode};
//! use rsm_domain::KeySchema;
//! use serde_json::json;
//!
//! let schema = KeySchema::new("UserProfile", ["userId", "tab"]);
//! let props = json!({"userId": "u42", "tab": "settings"});
//! let key = encode(&schema, props.as_object().unwrap()).unwrap();
//! assert_eq!(key, "user-profile:u42:settings");
//! assert_eq!(decode(&schema, &key).unwrap()["tab"], "settings");
//! ```

use rsm_domain::constants::{KEY_ATTRIBUTE_NAMESPACE, KEY_SEPARATOR};
use rsm_domain::error::{Error, Result};
use rsm_domain::value_objects::{KeyProps, KeySchema};
use serde_json::Value as JsonValue;
use std::sync::LazyLock;

static ATTRIBUTE_SAFE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[a-z0-9_-]*$").expect("Invalid regex"));

/// Encode `props` into the key of `schema`'s type
///
/// Fails with a configuration error when the type never declared its key
/// properties, and with a validation error when a value is not attribute-safe.
pub fn encode(schema: &KeySchema, props: &KeyProps) -> Result<String> {
    let order = schema.order.as_ref().ok_or_else(|| {
        Error::configuration(format!(
            "Type '{}' does not declare its key properties",
            schema.type_name
        ))
    })?;

    let values = order
        .iter()
        .map(|property| {
            let value = camel_to_kebab(&stringify(props.get(property)));
            if !is_attribute_safe(&value) {
                return Err(Error::validation(&schema.type_name, property, value));
            }
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut key = camel_to_kebab(&schema.type_name);
    key.push(KEY_SEPARATOR);
    key.push_str(&values.join(&KEY_SEPARATOR.to_string()));
    Ok(key)
}

/// Decode `key` back into the property bag of `schema`'s type
///
/// Values are assigned positionally. Missing trailing values decode to `null`,
/// and so does an empty value in the last declared position; an empty value
/// anywhere else decodes to `""`.
pub fn decode(schema: &KeySchema, key: &str) -> Result<KeyProps> {
    let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    if segments.len() < 2 {
        return Err(Error::malformed_key(
            key,
            format!("expected '<type>{KEY_SEPARATOR}<values>'"),
        ));
    }

    let expected = camel_to_kebab(&schema.type_name);
    if segments[0] != expected {
        return Err(Error::name_mismatch(key, expected, segments[0]));
    }

    let order = schema.order.as_deref().unwrap_or_default();
    let values = &segments[1..];
    let mut props = KeyProps::new();

    if order.is_empty() && values.len() == 1 && values[0].is_empty() {
        return Ok(props);
    }
    if values.len() > order.len() {
        return Err(Error::too_many_parts(
            key,
            &schema.type_name,
            order.len(),
            values.len(),
        ));
    }

    let last = order.len() - 1;
    for (index, property) in order.iter().enumerate() {
        let value = match values.get(index) {
            None => JsonValue::Null,
            Some(text) if text.is_empty() && index == last => JsonValue::Null,
            Some(text) => JsonValue::String((*text).to_string()),
        };
        props.insert(property.clone(), value);
    }
    Ok(props)
}

/// Namespaced attribute name for a key (`user-profile:u42` → `::user-profile`)
pub fn attribute_of(key: &str) -> Result<String> {
    let (name, _) = key
        .split_once(KEY_SEPARATOR)
        .ok_or_else(|| Error::malformed_key(key, format!("missing '{KEY_SEPARATOR}'")))?;
    Ok(format!("{KEY_ATTRIBUTE_NAMESPACE}{name}"))
}

/// `camelCase` / `PascalCase` → `kebab-case`; a leading separator is dropped
pub fn camel_to_kebab(text: &str) -> String {
    let mut kebab = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        if ch.is_ascii_uppercase() {
            if !kebab.is_empty() {
                kebab.push('-');
            }
            kebab.push(ch.to_ascii_lowercase());
        } else {
            kebab.push(ch);
        }
    }
    kebab
}

/// `kebab-case` → `camelCase`
pub fn kebab_to_camel(text: &str) -> String {
    let mut camel = String::with_capacity(text.len());
    let mut upper_next = false;
    for ch in text.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            camel.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            camel.push(ch);
        }
    }
    camel
}

/// Whether `text` only uses attribute-safe key characters
pub fn is_attribute_safe(text: &str) -> bool {
    ATTRIBUTE_SAFE.is_match(text)
}

fn stringify(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
