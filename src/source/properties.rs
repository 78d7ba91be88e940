use indexmap::IndexMap;

use super::{locator_key, ResourceSource, SourceError};
use crate::fill::RawValue;

/// Externally supplied properties, typically from the command line.
///
/// A locator `prop:server.port` reads the property `server.port`.
#[derive(Debug, Clone, Default)]
pub struct PropertiesSource {
    properties: IndexMap<String, String>,
}

impl PropertiesSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `-Pkey=value` or `key=value` arguments. Later duplicates win.
    pub fn from_args<I, S>(args: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new();
        for arg in args {
            let arg = arg.as_ref();
            let item = arg.strip_prefix("-P").unwrap_or(arg);
            match item.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    source.properties.insert(key.to_string(), value.to_string());
                }
                _ => return Err(SourceError::InvalidProperty(arg.to_string())),
            }
        }
        Ok(source)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ResourceSource for PropertiesSource {
    fn read(&self, locator: &str) -> RawValue {
        self.properties.get(locator_key(locator)).cloned().into()
    }
}
