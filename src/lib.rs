//! Fill typed values from flat key/value resources.
//!
//! A [`Filler`] walks a [`Schema`] (or an open-ended default [`Value`]),
//! reads each field from one or more [`ResourceSource`]s at a locator
//! derived from the field's path, coerces it to the field's declared type
//! and reports every field it could not resolve at once.

pub mod fill;
pub mod source;
mod error;

pub use error::Error;
pub use fill::{
    FieldDescriptor, FieldType, FillError, Filler, Raw, RawValue, Record, Report, Resource,
    Schema, Shape, SourceConfig, TypeDescriptor, Value,
};
pub use source::{
    EnvSource, FnSource, MapSource, PropertiesSource, ResourceSource, SourceError, TomlSource,
};
