//! Post-cleaning validation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

use csvtidy_ingest::{IngestError, count_lines, read_rows};
use csvtidy_model::{
    DatasetConfiguration, Dialect, EncodingCheck, IntegrityCheck, StructureCheck, TextEncoding,
    ValidationReport, html_entity_regex, is_problematic_char,
};
use tracing::{info, warn};

use crate::error::{Result, ValidateError};

/// Problematic characters listed in an [`EncodingCheck`].
pub const ENCODING_SAMPLE_CHARS: usize = 10;

/// Compares a source file with its cleaned counterpart.
///
/// The cleaned file is always read as UTF-8 with the dialect that wrote it.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityValidator {
    dialect: Dialect,
    source_encoding: TextEncoding,
}

impl IntegrityValidator {
    pub fn new(config: &DatasetConfiguration) -> Self {
        Self {
            dialect: config.dialect(),
            source_encoding: config.encoding(),
        }
    }

    /// Runs the structure, encoding and integrity checks.
    ///
    /// Failing checks are part of the returned report; only unreadable files
    /// produce an error.
    pub fn validate(&self, original: &Path, cleaned: &Path) -> Result<ValidationReport> {
        let start = Instant::now();
        let structure = self.check_structure(cleaned)?;
        let encoding = check_encoding(cleaned)?;
        let integrity = self.check_integrity(original, structure.total_rows)?;

        let report = ValidationReport {
            structure,
            encoding,
            integrity,
        };
        if report.passed() {
            info!(
                cleaned = %cleaned.display(),
                duration_ms = start.elapsed().as_millis(),
                "validation passed"
            );
        } else {
            warn!(
                cleaned = %cleaned.display(),
                structure = report.structure.passed(),
                encoding = report.encoding.passed(),
                integrity = report.integrity.passed(),
                duration_ms = start.elapsed().as_millis(),
                "validation found problems"
            );
        }
        Ok(report)
    }

    /// Re-parses the cleaned file against its own header.
    ///
    /// Bytes that are not UTF-8 mark the file invalid instead of failing.
    pub fn check_structure(&self, cleaned: &Path) -> Result<StructureCheck> {
        let mut check = StructureCheck {
            is_valid_csv: true,
            consistent_columns: true,
            ..StructureCheck::default()
        };

        let mut rows = read_rows(cleaned, TextEncoding::Utf8, self.dialect)
            .map_err(|e| cleaned_error(cleaned, e))?;

        match rows.next() {
            Some(Ok(header)) => {
                check.total_columns = header.fields.len();
                check.header = header.fields;
            }
            Some(Err(e)) => return soft_failure(cleaned, e, check),
            None => {
                check.is_valid_csv = false;
                check.errors.push("File is empty".to_string());
                return Ok(check);
            }
        }

        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(e) => return soft_failure(cleaned, e, check),
            };
            check.total_rows += 1;
            if row.fields.len() != check.total_columns {
                check.record_mismatch(row.line, row.fields.len());
            }
        }
        Ok(check)
    }

    /// Original data lines (physical, source encoding) against cleaned data records.
    pub fn check_integrity(&self, original: &Path, cleaned_rows: usize) -> Result<IntegrityCheck> {
        let original_rows = count_lines(original, self.source_encoding)?.saturating_sub(1);
        Ok(IntegrityCheck::compare(original_rows, cleaned_rows))
    }
}

/// Scans the cleaned file for characters outside ASCII and the allow-list,
/// and for residual entity patterns.
///
/// Undecodable bytes show up as U+FFFD and are counted as problematic.
pub fn check_encoding(cleaned: &Path) -> Result<EncodingCheck> {
    let bytes = fs::read(cleaned).map_err(|e| ValidateError::cleaned(cleaned.to_path_buf(), e))?;
    let text = String::from_utf8_lossy(&bytes);

    let problematic: BTreeSet<char> = text.chars().filter(|c| is_problematic_char(*c)).collect();
    Ok(EncodingCheck {
        problematic_chars: problematic.len(),
        html_entities: html_entity_regex().find_iter(&text).count(),
        sample_chars: problematic.into_iter().take(ENCODING_SAMPLE_CHARS).collect(),
    })
}

fn cleaned_error(path: &Path, err: IngestError) -> ValidateError {
    match err {
        IngestError::FileNotFound { path } => ValidateError::CleanedMissing { path },
        IngestError::FileRead { source, .. } => ValidateError::cleaned(path.to_path_buf(), source),
        other => ValidateError::Ingest(other),
    }
}

fn soft_failure(path: &Path, err: IngestError, mut check: StructureCheck) -> Result<StructureCheck> {
    if !err.is_decode() {
        return Err(cleaned_error(path, err));
    }
    check.is_valid_csv = false;
    check.errors.push(err.to_string());
    Ok(check)
}
