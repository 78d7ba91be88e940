//! Aggregation of fill failures into a single diagnostic.

use std::fmt;

use super::filler::{Failure, ResultNode};
use super::FillError;

/// Every unresolved field of one fill, in depth-first field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub target: String,
    pub failures: Vec<Failure>,
}

impl Report {
    /// Collects the failures of a result tree.
    pub fn collect(target: impl Into<String>, tree: &ResultNode) -> Self {
        let mut failures = Vec::new();
        tree.collect_failures(&mut failures);
        Self {
            target: target.into(),
            failures: failures.into_iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Dotted paths of all failures.
    pub fn paths(&self) -> Vec<String> {
        self.failures.iter().map(Failure::dotted_path).collect()
    }

    /// Succeeds if there are no failures; otherwise fails with the whole report.
    pub fn into_result(self) -> Result<(), FillError> {
        if self.is_empty() {
            return Ok(());
        }
        log::debug!(
            "Fill of `{}` left {} field(s) unresolved",
            self.target,
            self.failures.len()
        );
        Err(FillError::Unresolved(self))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not fill '{}':", self.target)?;

        let paths = self.paths();
        let width = paths.iter().map(|p| p.chars().count()).max().unwrap_or(0);
        for (path, failure) in paths.iter().zip(&self.failures) {
            let padding = " ".repeat(width - path.chars().count());
            write!(f, "\n  '{path}'{padding}: {}", failure.message)?;
        }
        Ok(())
    }
}
