//! Read-only diagnostics around the cleaning stage.
//!
//! - [`QualityAnalyzer`] inspects the source before cleaning
//! - [`IntegrityValidator`] compares source and cleaned file afterwards
//!
//! Neither writes anything; findings are returned as data and every failing
//! check is reported rather than raised.

mod analyzer;
mod error;
mod integrity;

// === Error Types ===
pub use error::{Result, ValidateError};

// === Analysis ===
pub use analyzer::{DUPLICATE_SAMPLE_ROWS, QualityAnalyzer, STRUCTURE_SAMPLE_ROWS};

// === Validation ===
pub use integrity::{ENCODING_SAMPLE_CHARS, IntegrityValidator, check_encoding};
