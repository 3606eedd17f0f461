//! Service/component key schemas

use serde_json::{Map, Value as JsonValue};

/// Property bag encoded into (and decoded from) a key
///
/// Decoding marks trailing omissions with `null`, distinct from `""`.
pub type KeyProps = Map<String, JsonValue>;

/// Type name plus the ordered properties that identify an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    /// Type name, usually PascalCase (`UserProfile` → `user-profile:`)
    pub type_name: String,
    /// Ordered key properties; `None` when the type never declared any
    pub order: Option<Vec<String>>,
}

impl KeySchema {
    /// Create a schema with declared key properties
    pub fn new<T, I, P>(type_name: T, order: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            order: Some(order.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a schema for a type that never declared its key properties
    pub fn undeclared<T: Into<String>>(type_name: T) -> Self {
        Self {
            type_name: type_name.into(),
            order: None,
        }
    }

    /// Schema of a [`KeyedType`]
    pub fn of<T: KeyedType>() -> Self {
        Self::new(T::TYPE_NAME, T::KEY_PROPS.iter().copied())
    }
}

/// A Rust type whose instances are identified by a service/component key
///
/// # Example
///
/// ```
/// use rsm_domain::{KeySchema, KeyedType};
///
/// struct TodoItem;
///
/// impl KeyedType for TodoItem {
///     const TYPE_NAME: &'static str = "TodoItem";
///     const KEY_PROPS: &'static [&'static str] = &["listId", "itemId"];
/// }
///
/// assert_eq!(KeySchema::of::<TodoItem>().order.unwrap(), vec!["listId", "itemId"]);
/// ```
pub trait KeyedType {
    /// Type name the key is prefixed with
    const TYPE_NAME: &'static str;
    /// Ordered key properties
    const KEY_PROPS: &'static [&'static str];
}
