//! Filling typed values from flat resource sources.

mod builder;
mod coerce;
mod error;
mod filler;
mod locator;
mod report;
mod schema;
mod value;

pub use builder::Filler;
pub use coerce::{Coercer, CoercionTable, TypeDescriptor};
pub use error::FillError;
pub use filler::{Failure, FailureKind, ResultNode};
pub use locator::{build_locator, LocatorTemplate, SourceConfig};
pub use report::Report;
pub use schema::{FieldDescriptor, FieldType, Record, Schema, Shape};
pub use value::{parse_array_literal, Raw, RawValue, Resource, Value};
