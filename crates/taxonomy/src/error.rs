//! Error types for the taxonomy crate.

use thiserror::Error;

/// Result type alias for taxonomy operations.
pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Errors that can occur while loading or querying a taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A line is not of the form `<id> - <path>`
    #[error("Malformed taxonomy line {line_number}: {line:?}")]
    MalformedLine {
        /// 1-based line number in the source
        line_number: usize,
        /// The offending line, trimmed
        line: String,
    },

    /// The category id is not part of the taxonomy
    #[error("Unknown category id: {0}")]
    UnknownCategoryId(u32),

    /// No category has this display path
    #[error("Unknown category name: {0:?}")]
    UnknownCategoryName(String),

    /// Reading the taxonomy source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error code for integration with CLI exit handling.
/// Range: 12xxx for taxonomy errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyErrorCode {
    /// Malformed source line
    MalformedLine = 12001,
    /// Unknown category id
    UnknownCategoryId = 12002,
    /// Unknown category name
    UnknownCategoryName = 12003,
    /// I/O failure
    Io = 12004,
}

impl TaxonomyError {
    /// Returns the error code for this error.
    pub fn code(&self) -> TaxonomyErrorCode {
        match self {
            TaxonomyError::MalformedLine { .. } => TaxonomyErrorCode::MalformedLine,
            TaxonomyError::UnknownCategoryId(_) => TaxonomyErrorCode::UnknownCategoryId,
            TaxonomyError::UnknownCategoryName(_) => TaxonomyErrorCode::UnknownCategoryName,
            TaxonomyError::Io(_) => TaxonomyErrorCode::Io,
        }
    }
}
