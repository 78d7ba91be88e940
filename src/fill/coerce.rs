//! Conversion of raw resource values into typed values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::value::{Raw, Value};

/// The primitive kind a leaf field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Integer,
    Float,
    /// Integer if it parses as one, float otherwise.
    Number,
    Boolean,
    String,
    RawResource,
    Null,
    /// A caller-registered descriptor.
    Custom(&'static str),
}

impl TypeDescriptor {
    /// The descriptor matching the runtime type of a value, used for open
    /// records where no declared type exists.
    ///
    /// Returns `None` for arrays and records, which are not coerced.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(TypeDescriptor::Null),
            Value::Integer(_) => Some(TypeDescriptor::Integer),
            Value::Float(_) => Some(TypeDescriptor::Float),
            Value::Boolean(_) => Some(TypeDescriptor::Boolean),
            Value::String(_) => Some(TypeDescriptor::String),
            Value::Resource(_) => Some(TypeDescriptor::RawResource),
            Value::Array(_) | Value::Record(_) => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Integer => f.write_str("integer"),
            TypeDescriptor::Float => f.write_str("float"),
            TypeDescriptor::Number => f.write_str("number"),
            TypeDescriptor::Boolean => f.write_str("boolean"),
            TypeDescriptor::String => f.write_str("string"),
            TypeDescriptor::RawResource => f.write_str("resource"),
            TypeDescriptor::Null => f.write_str("null"),
            TypeDescriptor::Custom(name) => f.write_str(name),
        }
    }
}

/// A conversion from a raw value to a typed value; the error is a
/// human-readable message.
pub type Coercer = Arc<dyn Fn(&Raw) -> Result<Value, String> + Send + Sync>;

/// Maps type descriptors to their coercion functions.
///
/// Starts out with the built-in primitives; entries can be added or
/// replaced with [`with`](Self::with).
#[derive(Clone)]
pub struct CoercionTable {
    entries: HashMap<TypeDescriptor, Coercer>,
}

impl CoercionTable {
    /// A table containing only the built-in primitive coercions.
    pub fn builtin() -> Self {
        let mut entries: HashMap<TypeDescriptor, Coercer> = HashMap::new();
        entries.insert(TypeDescriptor::Integer, Arc::new(coerce_integer));
        entries.insert(TypeDescriptor::Float, Arc::new(coerce_float));
        entries.insert(TypeDescriptor::Number, Arc::new(coerce_number));
        entries.insert(TypeDescriptor::Boolean, Arc::new(coerce_boolean));
        entries.insert(TypeDescriptor::String, Arc::new(coerce_string));
        entries.insert(TypeDescriptor::RawResource, Arc::new(coerce_resource));
        entries.insert(TypeDescriptor::Null, Arc::new(coerce_null));
        Self { entries }
    }

    /// Registers or overrides the coercion for `descriptor`.
    #[must_use]
    pub fn with<F>(mut self, descriptor: TypeDescriptor, coercer: F) -> Self
    where
        F: Fn(&Raw) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.entries.insert(descriptor, Arc::new(coercer));
        self
    }

    /// Removes the coercion for `descriptor`; fields of that type are then
    /// left unfilled.
    #[must_use]
    pub fn without(mut self, descriptor: TypeDescriptor) -> Self {
        self.entries.remove(&descriptor);
        self
    }

    pub fn get(&self, descriptor: TypeDescriptor) -> Option<&Coercer> {
        self.entries.get(&descriptor)
    }

    pub fn contains(&self, descriptor: TypeDescriptor) -> bool {
        self.entries.contains_key(&descriptor)
    }

    /// Coerces `raw` to `descriptor`.
    ///
    /// Returns `None` when no coercion is registered for the descriptor.
    pub fn coerce(&self, descriptor: TypeDescriptor, raw: &Raw) -> Option<Result<Value, String>> {
        self.entries.get(&descriptor).map(|coercer| coercer(raw))
    }
}

impl Default for CoercionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for CoercionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

fn coerce_integer(raw: &Raw) -> Result<Value, String> {
    let s = raw.as_text();
    s.parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| format!("'{s}' is not a valid integer"))
}

fn coerce_float(raw: &Raw) -> Result<Value, String> {
    let s = raw.as_text();
    s.parse::<f64>()
        .map(Value::Float)
        .map_err(|_| format!("'{s}' is not a valid float"))
}

fn coerce_number(raw: &Raw) -> Result<Value, String> {
    let s = raw.as_text();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Value::Integer(i));
    }
    s.parse::<f64>()
        .map(Value::Float)
        .map_err(|_| format!("'{s}' is not a valid number"))
}

fn coerce_boolean(raw: &Raw) -> Result<Value, String> {
    let s = raw.as_text();
    if s.eq_ignore_ascii_case("true") {
        Ok(Value::Boolean(true))
    } else if s.eq_ignore_ascii_case("false") {
        Ok(Value::Boolean(false))
    } else {
        Err(format!("'{s}' is not a valid boolean (expected true or false)"))
    }
}

fn coerce_string(raw: &Raw) -> Result<Value, String> {
    Ok(Value::String(raw.as_text().to_string()))
}

fn coerce_resource(raw: &Raw) -> Result<Value, String> {
    match raw {
        Raw::Resource(resource) => Ok(Value::Resource(resource.clone())),
        Raw::Text(s) => Ok(Value::String(s.clone())),
    }
}

fn coerce_null(_raw: &Raw) -> Result<Value, String> {
    Err("ambiguous type: the field defaults to null and declares no type; \
         give it an explicit type"
        .to_string())
}
