use std::collections::HashMap;
use std::fmt;

use super::ResourceSource;
use crate::fill::{RawValue, Resource};

/// Answers exact locators from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    entries: HashMap<String, RawValue>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, locator: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(locator.into(), RawValue::text(value));
        self
    }

    /// Serves a resource handle at its own locator.
    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.entries
            .insert(resource.locator.clone(), RawValue::resource(resource));
        self
    }
}

impl ResourceSource for MapSource {
    fn read(&self, locator: &str) -> RawValue {
        self.entries.get(locator).cloned().unwrap_or(RawValue::Absent)
    }
}

/// Adapts a function, such as an HTTP fetch, into a resource source.
pub struct FnSource<F> {
    read: F,
}

impl<F> FnSource<F>
where
    F: Fn(&str) -> RawValue + Send + Sync,
{
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F> ResourceSource for FnSource<F>
where
    F: Fn(&str) -> RawValue + Send + Sync,
{
    fn read(&self, locator: &str) -> RawValue {
        (self.read)(locator)
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}
