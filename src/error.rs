use crate::fill::FillError;
use crate::source::SourceError;
use thiserror::Error;

/// Top-level error type for the dragon-fill library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("fill error: {0}")]
    Fill(#[from] FillError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}
