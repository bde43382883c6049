//! Data model shared by every stage of the delimited-file cleaning pipeline.
//!
//! The detector produces one [`DatasetConfiguration`] per run; every later
//! stage reads it by reference and never mutates it. Stage outputs are plain
//! value types ([`CleaningStatistics`], [`AnalysisStats`], [`ValidationReport`])
//! so the orchestrator can hand them to the report renderers unchanged.

pub mod analysis;
pub mod charset;
pub mod config;
pub mod error;
pub mod issues;
pub mod stats;
pub mod validation;

pub use analysis::{AnalysisStats, RowInconsistency};
pub use charset::{
    ALLOWED_ACCENTED, HTML_ENTITY_PATTERN, has_problematic_char, html_entity_regex,
    is_problematic_char, looks_like_html_entity,
};
pub use config::{DELIMITER_CANDIDATES, DatasetConfiguration, Dialect, TextEncoding};
pub use error::{ModelError, Result};
pub use issues::{IssueKind, QualityIssues};
pub use stats::{CleaningStatistics, NormalizationCounts};
pub use validation::{
    EncodingCheck, IntegrityCheck, MAX_STRUCTURE_EXAMPLES, ROW_DRIFT_TOLERANCE, StructureCheck,
    ValidationReport,
};
