//! Values produced by a fill and raw answers read from a resource source.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A handle to an external resource, passed through fills unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub locator: String,
    pub contents: String,
}

impl Resource {
    pub fn new(locator: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            contents: contents.into(),
        }
    }
}

/// A raw value that was actually present at a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raw {
    Text(String),
    Resource(Resource),
}

impl Raw {
    /// The textual content, used by parsing coercions.
    pub fn as_text(&self) -> &str {
        match self {
            Raw::Text(s) => s,
            Raw::Resource(r) => &r.contents,
        }
    }
}

/// The answer of a resource source for one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Present(Raw),
    Absent,
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Present(Raw::Text(s.into()))
    }

    pub fn resource(resource: Resource) -> Self {
        RawValue::Present(Raw::Resource(resource))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }

    pub fn into_raw(self) -> Option<Raw> {
        match self {
            RawValue::Present(raw) => Some(raw),
            RawValue::Absent => None,
        }
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawValue::Absent, RawValue::text)
    }
}

/// A coerced, typed value.
///
/// Records keep insertion order so that diagnostics and instantiation see
/// fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Resource(Resource),
    Array(Vec<Value>),
    Record(IndexMap<String, Value>),
}

impl Value {
    /// An open record with no entries.
    pub fn empty_record() -> Self {
        Value::Record(IndexMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|map| map.get(key))
    }

    /// Converts into a TOML value for deserialization into a typed instance.
    ///
    /// Returns `None` for `Null`; nulls inside records and arrays are dropped
    /// so that `Option` fields come out as `None`.
    pub fn to_toml(&self) -> Option<toml::Value> {
        let value = match self {
            Value::Null => return None,
            Value::Integer(i) => toml::Value::Integer(*i),
            Value::Float(f) => toml::Value::Float(*f),
            Value::Boolean(b) => toml::Value::Boolean(*b),
            Value::String(s) => toml::Value::String(s.clone()),
            Value::Resource(r) => {
                let mut table = toml::Table::new();
                table.insert("locator".into(), toml::Value::String(r.locator.clone()));
                table.insert("contents".into(), toml::Value::String(r.contents.clone()));
                toml::Value::Table(table)
            }
            Value::Array(items) => toml::Value::Array(items.iter().filter_map(Value::to_toml).collect()),
            Value::Record(map) => toml::Value::Table(
                map.iter()
                    .filter_map(|(k, v)| v.to_toml().map(|v| (k.clone(), v)))
                    .collect(),
            ),
        };
        Some(value)
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Boolean(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            toml::Value::Table(table) => {
                Value::Record(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(value: Vec<V>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Record(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parses the `{a, b, c}` literal array syntax.
///
/// Strings without surrounding braces pass through unchanged.
pub fn parse_array_literal(s: &str) -> Value {
    let Some(inner) = s.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) else {
        return Value::String(s.to_string());
    };

    if inner.trim().is_empty() {
        return Value::Array(Vec::new());
    }

    Value::Array(
        inner
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .collect(),
    )
}
