//! Error types for diagnostics.

use std::io;
use std::path::PathBuf;

use csvtidy_ingest::IngestError;
use thiserror::Error;

/// Errors that prevent a diagnostic pass from producing a result.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Reading the source file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The cleaned file is missing.
    #[error("cleaned file not found: {path}")]
    CleanedMissing { path: PathBuf },

    /// The cleaned file exists but could not be read.
    #[error("failed to read cleaned file {path}: {source}")]
    CleanedRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ValidateError {
    /// Classifies an I/O failure on the cleaned file.
    pub fn cleaned(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::CleanedMissing { path }
        } else {
            Self::CleanedRead { path, source }
        }
    }
}

/// Result type for diagnostic operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
