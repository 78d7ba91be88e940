//! Explicit schema descriptions of fillable types.

use super::coerce::TypeDescriptor;
use super::value::Value;

/// The declared type of a record field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A leaf coerced through the coercion table.
    Scalar(TypeDescriptor),
    /// A nested structured record.
    Record(fn() -> Record),
    /// A nested open-ended record, shaped by the field's default value.
    Open,
    /// A named alias for another type.
    Alias(&'static str, Box<FieldType>),
    /// A type that cannot be filled from a resource (e.g. a callback);
    /// such fields are left to other means.
    Unsupported(&'static str),
}

impl FieldType {
    pub const INTEGER: FieldType = FieldType::Scalar(TypeDescriptor::Integer);
    pub const FLOAT: FieldType = FieldType::Scalar(TypeDescriptor::Float);
    pub const NUMBER: FieldType = FieldType::Scalar(TypeDescriptor::Number);
    pub const BOOLEAN: FieldType = FieldType::Scalar(TypeDescriptor::Boolean);
    pub const STRING: FieldType = FieldType::Scalar(TypeDescriptor::String);
    pub const RESOURCE: FieldType = FieldType::Scalar(TypeDescriptor::RawResource);

    pub fn alias(name: &'static str, target: FieldType) -> Self {
        FieldType::Alias(name, Box::new(target))
    }

    /// Follows aliases down to the referent type.
    pub fn resolve(&self) -> &FieldType {
        match self {
            FieldType::Alias(_, target) => target.resolve(),
            other => other,
        }
    }
}

/// One declared field of a structured record.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
        }
    }

    /// Marks the field as nullable; a missing value then fills as its
    /// default, or null.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The default to fall back on when the field cannot be resolved.
    ///
    /// Nullable fields always have one (null if nothing else); other fields
    /// only when a non-null default was declared.
    pub fn fallback(&self) -> Option<Value> {
        match &self.default {
            Some(default) if self.nullable || !default.is_null() => Some(default.clone()),
            None if self.nullable => Some(Value::Null),
            _ => None,
        }
    }
}

/// A structured record: named fields in declaration order.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// The shape of a fill target.
#[derive(Debug, Clone)]
pub enum Shape {
    Structured(Record),
    /// An open-ended record guided by its default value.
    Open(Value),
}

/// A type that can be filled from a resource source.
///
/// ```
/// use dragon_fill::{FieldDescriptor, FieldType, Record, Schema, Shape};
///
/// struct Server;
///
/// impl Schema for Server {
///     fn name() -> &'static str {
///         "Server"
///     }
///
///     fn shape() -> Shape {
///         Shape::Structured(
///             Record::new("Server")
///                 .field(FieldDescriptor::new("host", FieldType::STRING).with_default("localhost"))
///                 .field(FieldDescriptor::new("port", FieldType::INTEGER)),
///         )
///     }
/// }
/// ```
pub trait Schema {
    fn name() -> &'static str;

    fn shape() -> Shape;
}
