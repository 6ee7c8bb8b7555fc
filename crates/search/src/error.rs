//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A record violates the data-layer contract (missing mandatory field)
    #[error("Invalid recipe {id}: missing {field}")]
    InvalidRecord {
        /// Identifier of the offending record
        id: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Invalid query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while loading recipes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal failure (poisoned lock, serialization of a fingerprint)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error code for integration with the shared error code ranges.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Record missing a mandatory field
    InvalidRecord = 11001,
    /// Query could not be parsed
    InvalidQuery = 11002,
    /// Configuration problem
    Config = 11003,
    /// I/O failure
    Io = 11004,
    /// JSON parsing error
    JsonParsing = 11005,
    /// Internal failure
    Internal = 11099,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidRecord { .. } => SearchErrorCode::InvalidRecord,
            SearchError::InvalidQuery(_) => SearchErrorCode::InvalidQuery,
            SearchError::Config(_) => SearchErrorCode::Config,
            SearchError::Io(_) => SearchErrorCode::Io,
            SearchError::Json(_) => SearchErrorCode::JsonParsing,
            SearchError::Internal(_) => SearchErrorCode::Internal,
        }
    }
}
