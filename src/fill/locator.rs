//! Resource locators and the source configurations that build them.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::FillError;

/// Builds a locator from a scheme, a separator and a field path.
pub type LocatorTemplate = Arc<dyn Fn(&str, &str, &[String]) -> String + Send + Sync>;

/// Which kind of source a configuration addresses; only affects how
/// read failures tell the user to supply a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Env,
    Properties,
    Https,
    Custom,
}

/// Describes how field paths map onto locators of one resource source.
///
/// ```
/// use dragon_fill::SourceConfig;
///
/// let config = SourceConfig::properties();
/// let path = vec!["database".to_string(), "port".to_string()];
/// assert_eq!(config.locator(&path), "prop:database.port");
/// ```
#[derive(Clone)]
pub struct SourceConfig {
    scheme: String,
    separator: String,
    template: Option<LocatorTemplate>,
    kind: SourceKind,
}

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w+:$").expect("scheme pattern is valid"))
}

impl SourceConfig {
    /// Creates a configuration with the default `scheme + path.join(separator)`
    /// template.
    ///
    /// Fails if `scheme` is not a run of word characters followed by `:`.
    pub fn new(scheme: impl Into<String>, separator: impl Into<String>) -> Result<Self, FillError> {
        let scheme = scheme.into();
        if !scheme_pattern().is_match(&scheme) {
            return Err(FillError::InvalidScheme(scheme));
        }
        Ok(Self {
            scheme,
            separator: separator.into(),
            template: None,
            kind: SourceKind::Custom,
        })
    }

    /// Environment variables: `env:` joined with `_`.
    pub fn env() -> Self {
        Self::preset("env:", "_", SourceKind::Env)
    }

    /// Externally supplied properties: `prop:` joined with `.`.
    pub fn properties() -> Self {
        Self::preset("prop:", ".", SourceKind::Properties)
    }

    /// Networked resources: `https://` followed by the path joined with `/`.
    pub fn https() -> Self {
        Self::preset("https:", "/", SourceKind::Https).with_template(|scheme, separator, path| {
            format!("{scheme}//{}", path.join(separator))
        })
    }

    fn preset(scheme: &str, separator: &str, kind: SourceKind) -> Self {
        Self {
            scheme: scheme.to_string(),
            separator: separator.to_string(),
            template: None,
            kind,
        }
    }

    /// Replaces the locator template.
    #[must_use]
    pub fn with_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&str, &str, &[String]) -> String + Send + Sync + 'static,
    {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Builds the locator for a field path.
    pub fn locator(&self, path: &[String]) -> String {
        match &self.template {
            Some(template) => template(&self.scheme, &self.separator, path),
            None => build_locator(&self.scheme, &self.separator, path),
        }
    }

    /// Tells the user how to supply the value for `locator`.
    pub(crate) fn supply_hint(&self, locator: &str) -> String {
        let key = locator.strip_prefix(self.scheme.as_str()).unwrap_or(locator);
        match self.kind {
            SourceKind::Env => format!("set the environment variable '{key}'"),
            SourceKind::Properties => format!("pass it as -P{key}=<value>"),
            SourceKind::Https => format!("serve a value at '{locator}'"),
            SourceKind::Custom => format!("provide a value at '{locator}'"),
        }
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("scheme", &self.scheme)
            .field("separator", &self.separator)
            .field("custom_template", &self.template.is_some())
            .finish()
    }
}

/// The default locator template: `scheme + path.join(separator)`.
pub fn build_locator(scheme: &str, separator: &str, path: &[String]) -> String {
    format!("{scheme}{}", path.join(separator))
}
