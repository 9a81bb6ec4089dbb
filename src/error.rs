//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors reported by problem construction, configuration validation,
/// operators, and QAPLib loading.
#[derive(Debug, Error)]
pub enum QapError {
    /// A matrix does not have the `n×n` shape the problem size requires.
    #[error("matrix must be {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// A permutation has the wrong length, a duplicate, or an out-of-range value.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A solver or strategy configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operator was asked to sample more individuals than are available.
    #[error("population too small: need {required}, have {available}")]
    PopulationTooSmall { required: usize, available: usize },

    /// The bees worker pool could not be created.
    #[error("worker pool: {0}")]
    WorkerPool(String),

    /// Malformed QAPLib text.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QapError>;
