//! Error types for the data-loader crate.
//!
//! Only the catalog source itself can fail: a missing file or a document
//! that is not JSON at all. Individual fields never produce errors, they
//! coerce to defaults during normalization.

use thiserror::Error;

/// Errors that can occur while loading the menu catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Catalog file could not be found
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is not valid JSON
    #[error("Malformed catalog JSON in {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },

    /// Valid JSON, but neither an array of rows nor an object with `items`
    #[error("Unexpected catalog shape: {0}")]
    UnexpectedShape(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
