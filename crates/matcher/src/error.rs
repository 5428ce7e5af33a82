//! Error types for the matcher crate.

use catmatch_taxonomy::TaxonomyError;
use thiserror::Error;

/// Result type alias for matcher operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while building or running the matcher.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Query is empty or has no segments after trimming
    #[error("Empty input")]
    EmptyInput,

    /// No category qualifies as a match
    #[error("No matching category found")]
    NoMatch,

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Taxonomy lookup error
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
}

/// Error code for integration with CLI exit handling.
/// Range: 11xxx for matcher errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorCode {
    /// Empty query
    EmptyInput = 11001,
    /// No category qualifies
    NoMatch = 11002,
    /// Invalid configuration
    InvalidConfig = 11003,
    /// Taxonomy error
    Taxonomy = 11004,
}

impl MatchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MatchErrorCode {
        match self {
            MatchError::EmptyInput => MatchErrorCode::EmptyInput,
            MatchError::NoMatch => MatchErrorCode::NoMatch,
            MatchError::InvalidConfig(_) => MatchErrorCode::InvalidConfig,
            MatchError::Taxonomy(_) => MatchErrorCode::Taxonomy,
        }
    }
}
