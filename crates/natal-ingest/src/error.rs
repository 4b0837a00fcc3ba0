//! Error types for record loading and balancing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or balancing the record collections.
///
/// Every variant is fatal at startup: no partially loaded dataset is ever
/// handed to the views.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// Source file is missing, unreadable, or not parseable as CSV.
    #[error("source unavailable {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// A required column is absent from a source.
    #[error("required column '{column}' not found in {path}")]
    SchemaMismatch { column: String, path: PathBuf },

    /// Failed to write a collection back to disk.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Balancing Errors ===
    /// The eligible control pool is smaller than the case collection.
    #[error("insufficient controls: {required} required, {available} eligible")]
    InsufficientControls { required: usize, available: usize },

    // === DataFrame Errors ===
    /// Column not found in a loaded collection.
    #[error("column '{column}' not found in collection")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::InsufficientControls {
            required: 10,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "insufficient controls: 10 required, 4 eligible"
        );
        let err = IngestError::SchemaMismatch {
            column: "fagecomb".to_string(),
            path: PathBuf::from("/data/dead.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'fagecomb' not found in /data/dead.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
