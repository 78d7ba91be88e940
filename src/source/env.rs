use std::collections::HashMap;

use super::{locator_key, ResourceSource};
use crate::fill::RawValue;

/// A resource source backed by environment variables.
///
/// The environment is captured when the source is created, so every read
/// during a fill sees the same snapshot. A locator `env:database_port` is
/// looked up as `database_port` first and `DATABASE_PORT` second.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshots the current process environment.
    pub fn new() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Uses the given variables instead of the process environment.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl ResourceSource for EnvSource {
    fn read(&self, locator: &str) -> RawValue {
        let key = locator_key(locator);
        self.vars
            .get(key)
            .or_else(|| self.vars.get(&key.to_ascii_uppercase()))
            .cloned()
            .into()
    }
}
