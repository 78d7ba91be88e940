use serde::de::DeserializeOwned;

use super::coerce::{CoercionTable, TypeDescriptor};
use super::filler::{ResultNode, Walker};
use super::locator::SourceConfig;
use super::report::Report;
use super::schema::{Record, Schema, Shape};
use super::value::{Raw, RawValue, Value};
use super::FillError;
use crate::source::ResourceSource;

/// Fills schemas from one or more resource sources.
///
/// Sources are consulted newest-first, so later registrations override
/// earlier ones. A fill walks the whole schema, substitutes defaults for
/// anything it cannot resolve, and fails once with a [`Report`] listing
/// every field that had no usable default.
///
/// ## Example
///
/// ```
/// use dragon_fill::{
///     FieldDescriptor, FieldType, Filler, PropertiesSource, Record, Schema, Shape,
///     SourceConfig,
/// };
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
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
///
/// let server: Server = Filler::new(SourceConfig::properties())
///     .with_source(PropertiesSource::from_args(["-Pport=8080"])?)
///     .fill()?;
///
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// # Ok::<(), dragon_fill::Error>(())
/// ```
#[derive(Debug)]
#[must_use = "a filler does nothing until one of its fill methods is called"]
pub struct Filler {
    config: SourceConfig,
    coercions: CoercionTable,
    sources: Vec<Box<dyn ResourceSource>>,
}

impl Filler {
    /// Creates a filler with the built-in coercions and no sources.
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            coercions: CoercionTable::builtin(),
            sources: Vec::new(),
        }
    }

    /// Adds a resource source; it overrides previously added ones.
    pub fn with_source(mut self, source: impl ResourceSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Registers or overrides a single coercion.
    pub fn with_coercion<F>(mut self, descriptor: TypeDescriptor, coercer: F) -> Self
    where
        F: Fn(&Raw) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.coercions = self.coercions.with(descriptor, coercer);
        self
    }

    /// Replaces the whole coercion table.
    pub fn with_coercions(mut self, coercions: CoercionTable) -> Self {
        self.coercions = coercions;
        self
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Reads a locator from the newest source that has a value for it.
    pub fn read(&self, locator: &str) -> RawValue {
        self.sources
            .iter()
            .rev()
            .map(|source| source.read(locator))
            .find(|raw| !raw.is_absent())
            .unwrap_or(RawValue::Absent)
    }

    /// Produces the result tree for a shape without checking it for failures.
    pub fn fill_tree(&self, shape: &Shape) -> ResultNode {
        let reader = |locator: &str| self.read(locator);
        let walker = Walker {
            config: &self.config,
            coercions: &self.coercions,
            reader: &reader,
        };
        match shape {
            Shape::Structured(record) => ResultNode::Record(walker.fill_structured(record, &[])),
            Shape::Open(default) => walker.fill_open(default, &[]),
        }
    }

    /// Fills a shape into a coerced value tree, or fails with every
    /// unresolved field.
    pub fn fill_shape(&self, name: &str, shape: &Shape) -> Result<Value, FillError> {
        log::trace!("Filling `{name}` from {:?}", self.config);
        let tree = self.fill_tree(shape);
        Report::collect(name, &tree).into_result()?;
        Ok(tree.into_value().unwrap_or(Value::Null))
    }

    /// Fills a structured record into a coerced record value.
    pub fn fill_record(&self, record: &Record) -> Result<Value, FillError> {
        self.fill_shape(&record.name, &Shape::Structured(record.clone()))
    }

    /// Fills an open record guided by `default`, returning the tree itself.
    pub fn fill_open(&self, name: &str, default: &Value) -> Result<Value, FillError> {
        self.fill_shape(name, &Shape::Open(default.clone()))
    }

    /// Fills `T` and deserializes the coerced tree into it.
    pub fn fill<T: Schema + DeserializeOwned>(&self) -> Result<T, FillError> {
        let value = self.fill_shape(T::name(), &T::shape())?;
        instantiate(&value)
    }
}

/// Builds a typed instance from a fully coerced tree.
fn instantiate<T: DeserializeOwned>(value: &Value) -> Result<T, FillError> {
    let value = value
        .to_toml()
        .unwrap_or_else(|| toml::Value::Table(toml::Table::new()));
    value.try_into().map_err(FillError::Instantiate)
}
