//! TOML-backed resource source.

use std::path::Path;

use toml::{Table, Value};

use super::{locator_key, ResourceSource, SourceError};
use crate::fill::RawValue;

/// A resource source that answers locators from a TOML table.
///
/// The locator's key is split on `separator` and walked through nested
/// tables, so `prop:server.port` reads `[server] port`. Scalars are
/// answered as text; arrays use the `{a, b}` literal syntax; tables are
/// absent.
#[derive(Debug, Clone)]
pub struct TomlSource {
    table: Table,
    separator: String,
}

impl TomlSource {
    pub fn new(table: Table, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self { table, separator }
    }

    /// Loads a TOML file.
    ///
    /// If `required` is false, a missing file yields an empty source.
    pub fn from_file(
        path: impl AsRef<Path>,
        required: bool,
        separator: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let table = load_toml_file(path.as_ref(), required)?.unwrap_or_default();
        Ok(Self::new(table, separator))
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split(self.separator.as_str());
        let mut current = self.table.get(parts.next()?)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }
}

impl ResourceSource for TomlSource {
    fn read(&self, locator: &str) -> RawValue {
        self.lookup(locator_key(locator))
            .and_then(value_to_string)
            .into()
    }
}

/// Loads and parses a TOML file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_toml_file(path: &Path, required: bool) -> Result<Option<Table>, SourceError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| SourceError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(SourceError::FileNotFound(path.to_path_buf()))
            } else {
                log::debug!("Optional source file {} not found", path.display());
                Ok(None)
            }
        }
        Err(e) => Err(SourceError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Converts a TOML value to its raw string form.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(items) => {
            let items: Option<Vec<String>> = items.iter().map(value_to_string).collect();
            Some(format!("{{{}}}", items?.join(", ")))
        }
        Value::Table(_) => None,
    }
}
