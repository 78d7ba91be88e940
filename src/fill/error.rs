use thiserror::Error;

use super::Report;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FillError {
    #[error("invalid source scheme '{0}' (expected word characters followed by ':')")]
    InvalidScheme(String),

    #[error("{0}")]
    Unresolved(Report),

    #[error("failed to build typed instance: {0}")]
    Instantiate(#[from] toml::de::Error),
}
