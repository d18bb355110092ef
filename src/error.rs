//! Error types for fieldlab
//!
//! Only one condition originates inside the query engine itself
//! (`InvalidArgument`); everything else belongs to the catalog surface or
//! the flat-file loader. No condition here is fatal to the process.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Fieldlab error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required query parameter is missing or empty.
    ///
    /// The HTTP boundary wrapping this crate maps this to a 400 response.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity id has no matching record.
    ///
    /// Raised only by direct id lookups; enrichment surfaces a dangling
    /// reference as a `None` projection instead.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Collection the lookup ran against
        kind: &'static str,
        /// The id that had no match
        id: String,
    },

    /// Rejected experiment construction (empty title, inverted date range)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Flat-file storage error
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
