//! Error types for surface operations.

use reflow_types::IndexPath;
use thiserror::Error;

/// Errors produced by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no batch is open")]
    BatchNotOpen,

    #[error("a batch is already open")]
    BatchAlreadyOpen,

    #[error("section {index} out of bounds (count {count})")]
    SectionOutOfBounds { index: usize, count: usize },

    #[error("item {path} out of bounds (count {count})")]
    ItemOutOfBounds { path: IndexPath, count: usize },

    #[error("conflicting updates: {0}")]
    Conflict(String),

    #[error("invalid number of {what}: expected {expected}, got {actual}")]
    CountMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("data source has no entry for {0}")]
    MissingData(String),
}

/// Convenience alias for surface results.
pub type Result<T> = std::result::Result<T, SurfaceError>;
