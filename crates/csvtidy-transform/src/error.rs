//! Error types for the cleaning stage.

use std::io;
use std::path::PathBuf;

use csvtidy_ingest::IngestError;
use thiserror::Error;

/// Errors that abort a rewrite. Row-level problems are never errors.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Reading the source failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    // === Output Errors ===
    /// Creating, writing or syncing the temporary sibling failed.
    #[error("failed to {operation} temporary file {path}: {source}")]
    TempFile {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The csv writer rejected a record.
    #[error("failed to write record to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Replacing the destination with the finished temporary file failed.
    #[error("failed to replace {target_path} with {temp_path}: {source}")]
    AtomicReplace {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;
