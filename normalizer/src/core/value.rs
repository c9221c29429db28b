//! In-memory options tree.
//!
//! Options arrive as untyped JSON, but the engine must tell a cleared field
//! apart from an explicit `null` (`null` is a meaningful color). The tree
//! therefore carries its own [`OptionValue::Unset`] variant on top of the JSON
//! shapes. Unset entries keep their slot in a [`Mapping`] and are dropped when
//! the tree is serialized.

use std::fmt;

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A node of an options tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    /// Field cleared by the engine, or never set.
    #[default]
    Unset,
    /// Explicit `null` from the source tree.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<OptionValue>),
    Mapping(Mapping),
}

/// Three-state view of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Key missing, or present with [`OptionValue::Unset`].
    Unset,
    /// Key present with an explicit `null`.
    ExplicitNull,
    /// Any other value.
    Value(&'a OptionValue),
}

impl<'a> Field<'a> {
    pub fn value(self) -> Option<&'a OptionValue> {
        match self {
            Field::Value(value) => Some(value),
            Field::Unset | Field::ExplicitNull => None,
        }
    }

    pub fn is_truthy(self) -> bool {
        self.value().is_some_and(OptionValue::is_truthy)
    }

    /// Store key for the field, if it holds any truthy value.
    pub fn identifier(self) -> Option<String> {
        self.value().and_then(OptionValue::identifier)
    }
}

impl OptionValue {
    /// JavaScript-style truthiness: `Unset`, `null`, `false`, zero and the
    /// empty string are falsy. Containers are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Unset | OptionValue::Null => false,
            OptionValue::Bool(value) => *value,
            OptionValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            OptionValue::String(text) => !text.is_empty(),
            OptionValue::Sequence(_) | OptionValue::Mapping(_) => true,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, OptionValue::Unset)
    }

    /// True for mappings and sequences.
    pub fn is_container(&self) -> bool {
        matches!(self, OptionValue::Sequence(_) | OptionValue::Mapping(_))
    }

    pub fn field(&self) -> Field<'_> {
        match self {
            OptionValue::Unset => Field::Unset,
            OptionValue::Null => Field::ExplicitNull,
            other => Field::Value(other),
        }
    }

    /// Store key for a truthy value: strings as-is, anything else in its
    /// compact JSON form (`5`, `true`, `{"k":1}`).
    pub fn identifier(&self) -> Option<String> {
        self.is_truthy().then(|| self.store_key())
    }

    /// Text form used when this value keys the props store.
    pub fn store_key(&self) -> String {
        match self {
            OptionValue::String(text) => text.clone(),
            other => other.to_json().to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            OptionValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            OptionValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<OptionValue>> {
        match self {
            OptionValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Move the value out, leaving [`OptionValue::Unset`] behind.
    pub fn take(&mut self) -> OptionValue {
        std::mem::take(self)
    }

    /// Convert to JSON, dropping unset mapping entries. Unset sequence
    /// elements (and an unset root) become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::Unset | OptionValue::Null => Value::Null,
            OptionValue::Bool(value) => Value::Bool(*value),
            OptionValue::Number(number) => Value::Number(number.clone()),
            OptionValue::String(text) => Value::String(text.clone()),
            OptionValue::Sequence(items) => {
                Value::Array(items.iter().map(OptionValue::to_json).collect())
            }
            OptionValue::Mapping(map) => Value::Object(
                map.iter()
                    .filter(|(_, value)| !value.is_unset())
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Mapping node that keeps keys in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: IndexMap<String, OptionValue>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys, including unset ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.get_mut(key)
    }

    pub fn field(&self, key: &str) -> Field<'_> {
        self.get(key).map_or(Field::Unset, OptionValue::field)
    }

    /// Set `key`, keeping its position if already present. Returns the
    /// previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.entries.insert(key.into(), value)
    }

    /// Mark `key` as unset (adding the slot if missing) and return what it
    /// held before.
    pub fn clear(&mut self, key: &str) -> OptionValue {
        self.insert(key, OptionValue::Unset).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut OptionValue)> {
        self.entries
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, OptionValue)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => OptionValue::Null,
            Value::Bool(value) => OptionValue::Bool(value),
            Value::Number(number) => OptionValue::Number(number),
            Value::String(text) => OptionValue::String(text),
            Value::Array(items) => {
                OptionValue::Sequence(items.into_iter().map(OptionValue::from).collect())
            }
            Value::Object(map) => OptionValue::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, OptionValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<Mapping> for OptionValue {
    fn from(value: Mapping) -> Self {
        OptionValue::Mapping(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Number(Number::from(value))
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Unset | OptionValue::Null => serializer.serialize_unit(),
            OptionValue::Bool(value) => serializer.serialize_bool(*value),
            OptionValue::Number(number) => number.serialize(serializer),
            OptionValue::String(text) => serializer.serialize_str(text),
            OptionValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            OptionValue::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.iter().filter(|(_, value)| !value.is_unset()).count();
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.iter().filter(|(_, value)| !value.is_unset()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(OptionValue::from)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
