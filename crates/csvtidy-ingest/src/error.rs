//! Error types for file ingestion.

use std::io;
use std::path::{Path, PathBuf};

use csvtidy_model::{ModelError, TextEncoding};
use thiserror::Error;

/// Errors that can occur while reading or detecting a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Source file exists but could not be read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // === Content Errors ===
    /// The detected encoding cannot decode a line of the file.
    #[error("line {line} of {path} cannot be decoded as {encoding}")]
    Decode {
        path: PathBuf,
        line: usize,
        encoding: TextEncoding,
    },

    /// File has no header line.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// Detected values do not form a valid configuration.
    #[error("invalid dataset configuration for {path}: {source}")]
    InvalidConfiguration {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// Classifies an open/read failure, separating a missing file from other I/O errors.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// True for the I/O family (missing, unreadable).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::FileRead { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");

        let err = IngestError::Decode {
            path: PathBuf::from("data.csv"),
            line: 7,
            encoding: TextEncoding::Utf8,
        };
        assert_eq!(err.to_string(), "line 7 of data.csv cannot be decoded as utf-8");
    }

    #[test]
    fn test_from_io_classifies_not_found() {
        let err = IngestError::from_io(
            Path::new("missing.csv"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        assert!(err.is_io());

        let err = IngestError::from_io(
            Path::new("locked.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
        assert!(!err.is_decode());
    }
}
