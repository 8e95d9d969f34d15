//! Error types for table loading and generation.

use std::path::PathBuf;
use thiserror::Error;

use crate::loader::DataFormat;

/// Errors that can occur while loading, generating or sampling a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// The file extension does not map to a supported parser.
    #[error("unsupported file format '{extension}' (expected csv, tsv or json)")]
    UnsupportedFormat { extension: String },

    /// The upload is larger than the accepted limit.
    #[error("file is too large: {size} bytes (limit {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    /// The upload contains no bytes.
    #[error("uploaded file is empty")]
    EmptyUpload,

    /// Failed to read a file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file to disk.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The content could not be parsed in the declared format.
    #[error("failed to parse {format} data: {message}")]
    Parse { format: DataFormat, message: String },

    // === Generation Errors ===
    /// The generator pattern name is not recognized.
    #[error("unknown pattern '{name}' (expected linear, sine or gaussian)")]
    UnknownPattern { name: String },

    /// A random distribution could not be constructed.
    #[error("failed to build random distribution: {message}")]
    Distribution { message: String },

    // === Sampling Errors ===
    /// The preview mode name is not recognized.
    #[error("unknown sample mode '{mode}' (expected head, tail or random)")]
    UnknownSampleMode { mode: String },

    // === DataFrame Errors ===
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
        let err = IngestError::UnsupportedFormat {
            extension: "xlsx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format 'xlsx' (expected csv, tsv or json)"
        );
        let err = IngestError::Parse {
            format: DataFormat::Json,
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse JSON data: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
