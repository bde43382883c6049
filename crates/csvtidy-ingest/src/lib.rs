//! Reading delimited text files of unknown dialect.
//!
//! This crate turns a raw file into text the rest of the pipeline can trust:
//!
//! - **Encoding**: probe `utf-8`, `latin-1`, `iso-8859-1`, `cp1252` in order
//! - **Lines**: stream decoded physical lines with the byte-order mark removed
//! - **Records**: assemble physical lines into logical records (quoted fields
//!   may span lines) and split them into fields with the csv reader
//! - **Detection**: infer the [`DatasetConfiguration`] consumed by every later stage
//!
//! # Example
//!
//! ```ignore
//! use csvtidy_ingest::DialectDetector;
//!
//! let config = DialectDetector::new("data/customers.csv").detect()?;
//! println!("{} columns, {} rows", config.column_count(), config.row_count());
//! ```
//!
//! [`DatasetConfiguration`]: csvtidy_model::DatasetConfiguration

mod detect;
mod encoding;
mod error;
mod lines;
mod records;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encoding ===
pub use encoding::{ENCODING_PROBE_CHARS, decode, detect_encoding, probe_encoding};

// === Line Reading ===
pub use lines::{DecodedLines, count_lines, read_decoded};

// === Record Reading ===
pub use records::{LogicalRecords, ParsedRow, RawRecord, naive_split, parse_record, read_rows};

// === Detection ===
pub use detect::{
    DialectDetector, QUALITY_SCAN_ROWS, QUOTE_SCAN_BYTES, detect_delimiter, detect_quote_char,
    scan_quality,
};
