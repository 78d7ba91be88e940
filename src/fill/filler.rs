//! The recursive, type-directed fill of structured and open records.

use indexmap::IndexMap;

use super::coerce::{CoercionTable, TypeDescriptor};
use super::locator::SourceConfig;
use super::schema::{FieldDescriptor, FieldType, Record};
use super::value::{parse_array_literal, Raw, RawValue, Value};

/// Why a field could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was found at the field's locator.
    Read,
    /// A raw value was found but did not coerce to the field's type.
    Coerce,
}

/// An unresolved field, identified by its path from the fill root.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub path: Vec<String>,
}

impl Failure {
    /// The path joined with dots, as shown in reports.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// One node of a fill result. Failures are kept as values so the whole
/// tree can be walked before anything is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultNode {
    Value(Value),
    Record(IndexMap<String, ResultNode>),
    Failure(Failure),
}

impl ResultNode {
    /// Appends every failure in the tree to `out`, depth-first in field order.
    pub fn collect_failures<'a>(&'a self, out: &mut Vec<&'a Failure>) {
        match self {
            ResultNode::Value(_) => {}
            ResultNode::Failure(failure) => out.push(failure),
            ResultNode::Record(children) => {
                for child in children.values() {
                    child.collect_failures(out);
                }
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        match self {
            ResultNode::Value(_) => false,
            ResultNode::Failure(_) => true,
            ResultNode::Record(children) => children.values().any(ResultNode::has_failures),
        }
    }

    /// Converts a failure-free tree into a value.
    ///
    /// Returns `None` if any failure remains.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ResultNode::Value(value) => Some(value),
            ResultNode::Failure(_) => None,
            ResultNode::Record(children) => children
                .into_iter()
                .map(|(name, child)| child.into_value().map(|v| (name, v)))
                .collect::<Option<IndexMap<_, _>>>()
                .map(Value::Record),
        }
    }
}

/// Walks a schema or open default tree and produces a result tree.
pub(crate) struct Walker<'a> {
    pub config: &'a SourceConfig,
    pub coercions: &'a CoercionTable,
    pub reader: &'a dyn Fn(&str) -> RawValue,
}

impl Walker<'_> {
    /// Fills every fillable field of a structured record.
    pub fn fill_structured(&self, record: &Record, path: &[String]) -> IndexMap<String, ResultNode> {
        log::trace!("Filling record `{}` at {:?}", record.name, path);
        let mut results = IndexMap::new();

        for field in &record.fields {
            let child_path = child(path, &field.name);
            let Some(node) = self.fill_field(field, &child_path) else {
                log::debug!("Skipping field `{}` of type {:?}", field.name, field.ty);
                continue;
            };
            results.insert(field.name.clone(), node);
        }

        results
    }

    fn fill_field(&self, field: &FieldDescriptor, path: &[String]) -> Option<ResultNode> {
        match field.ty.resolve() {
            FieldType::Open => {
                let shape = field.default.clone().unwrap_or_else(Value::empty_record);
                Some(self.fill_open(&shape, path))
            }
            // Defaults apply per leaf inside the nested record.
            FieldType::Record(schema) => {
                Some(ResultNode::Record(self.fill_structured(&schema(), path)))
            }
            FieldType::Scalar(descriptor) => {
                let leaf = self.fill_leaf(*descriptor, path)?;
                Some(with_fallback(leaf, field.fallback(), path))
            }
            _ => None,
        }
    }

    /// Fills an open record using `default` as the guide for its shape.
    pub fn fill_open(&self, default: &Value, path: &[String]) -> ResultNode {
        log::trace!("Filling open record at {:?}", path);
        match default {
            Value::Record(entries) if !entries.is_empty() => {
                let mut results = IndexMap::new();
                for (name, entry) in entries {
                    let child_path = child(path, name);
                    let node = match entry {
                        Value::Record(_) => self.fill_open(entry, &child_path),
                        _ => match TypeDescriptor::of(entry) {
                            Some(descriptor) => match self.fill_leaf(descriptor, &child_path) {
                                Some(leaf) => {
                                    let fallback = (!entry.is_null()).then(|| entry.clone());
                                    with_fallback(leaf, fallback, &child_path)
                                }
                                None => {
                                    log::debug!("No coercion for {descriptor}, keeping default");
                                    ResultNode::Value(entry.clone())
                                }
                            },
                            None => self.fill_open_leaf(entry, &child_path),
                        },
                    };
                    results.insert(name.clone(), node);
                }
                ResultNode::Record(results)
            }
            _ => self.fill_open_leaf(default, path),
        }
    }

    /// Reads an open leaf without a type: strings go through the array
    /// literal parser, resources pass through, a missing value yields the
    /// default.
    fn fill_open_leaf(&self, default: &Value, path: &[String]) -> ResultNode {
        let locator = self.config.locator(path);
        log::trace!("Reading open leaf {locator}");
        let value = match (self.reader)(&locator) {
            RawValue::Absent => default.clone(),
            RawValue::Present(Raw::Text(s)) => parse_array_literal(&s),
            RawValue::Present(Raw::Resource(resource)) => Value::Resource(resource),
        };
        ResultNode::Value(value)
    }

    /// Reads and coerces one leaf. Returns `None` when no coercion is
    /// registered for `descriptor`; nothing is read in that case.
    fn fill_leaf(&self, descriptor: TypeDescriptor, path: &[String]) -> Option<ResultNode> {
        let coercer = self.coercions.get(descriptor)?;
        let locator = self.config.locator(path);
        log::trace!("Reading {locator} as {descriptor}");

        let Some(raw) = (self.reader)(&locator).into_raw() else {
            return Some(ResultNode::Failure(Failure {
                kind: FailureKind::Read,
                message: format!("value not supplied; {}", self.config.supply_hint(&locator)),
                path: path.to_vec(),
            }));
        };

        let node = match coercer(&raw) {
            Ok(value) => ResultNode::Value(value),
            Err(message) => ResultNode::Failure(Failure {
                kind: FailureKind::Coerce,
                message: format!("cannot read {locator} as {descriptor}: {message}"),
                path: path.to_vec(),
            }),
        };
        Some(node)
    }
}

/// Replaces a failed node with the fallback, if there is one.
fn with_fallback(node: ResultNode, fallback: Option<Value>, path: &[String]) -> ResultNode {
    match fallback {
        Some(default) if node.has_failures() => {
            log::debug!("Using default for {:?}", path);
            ResultNode::Value(default)
        }
        _ => node,
    }
}

fn child(path: &[String], name: &str) -> Vec<String> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(name.to_string());
    child
}
