//! Resource sources answering locator reads.

mod env;
mod error;
mod file;
mod map;
mod properties;

pub use env::EnvSource;
pub use error::SourceError;
pub use file::TomlSource;
pub use map::{FnSource, MapSource};
pub use properties::PropertiesSource;

use crate::fill::RawValue;

/// Answers reads of resource locators.
///
/// Reads must be repeatable: the same locator read twice during one fill
/// returns the same answer. Absence is an ordinary answer, not an error.
pub trait ResourceSource: Send + Sync + std::fmt::Debug {
    fn read(&self, locator: &str) -> RawValue;
}

/// Strips the `scheme:` prefix from a locator, along with the `//` of
/// hierarchical schemes.
pub(crate) fn locator_key(locator: &str) -> &str {
    let key = match locator.split_once(':') {
        Some((_, rest)) => rest,
        None => locator,
    };
    key.strip_prefix("//").unwrap_or(key)
}
