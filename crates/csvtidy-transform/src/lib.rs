//! Cleaning stage: per-field normalization and whole-file rewriting.
//!
//! [`RowNormalizer`] is a pure function over one line. [`FileRewriter`] streams
//! the source through it and replaces the destination only once the new file
//! is complete and synced.
//!
//! # Example
//!
//! ```ignore
//! use csvtidy_ingest::DialectDetector;
//! use csvtidy_transform::FileRewriter;
//!
//! let config = DialectDetector::new("raw.csv").detect()?;
//! let stats = FileRewriter::new(&config).rewrite("raw.csv".as_ref(), "clean.csv".as_ref())?;
//! println!("{} of {} rows written", stats.cleaned_rows(), stats.total_rows());
//! ```

pub mod normalize;

mod error;
mod rewrite;

// === Error Types ===
pub use error::{Result, TransformError};

// === Normalization ===
pub use normalize::{NormalizedRow, RowNormalizer};

// === Rewriting ===
pub use rewrite::{FileRewriter, PROGRESS_INTERVAL, temp_sibling};
